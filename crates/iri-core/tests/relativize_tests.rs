//! Relativization tests, including the resolve round-trip the algorithm
//! guarantees.

use iri_core::{Iri, RelativizeError};

fn relativize(base: &str, target: &str) -> Result<String, RelativizeError> {
    let base = Iri::parse(base).expect("valid base");
    let target = Iri::parse(target).expect("valid target");
    Ok(base.relativize(&target)?.into_inner())
}

fn assert_relativizes(base: &str, target: &str, expected: &str) {
    assert_eq!(
        relativize(base, target).as_deref(),
        Ok(expected),
        "relativizing {target:?} against {base:?}"
    );
    // The produced reference must resolve back to the target
    let base = Iri::parse(base).unwrap();
    assert_eq!(
        base.resolve(expected).unwrap().as_str(),
        target,
        "resolving {expected:?} against {base:?}"
    );
}

#[test]
fn test_directory_walks() {
    assert_relativizes("http://a/b/c/d;p", "http://a/b/g", "../g");
    assert_relativizes("http://a/b/c/d", "http://a/b/c/e", "e");
    assert_relativizes("http://a/b/c", "http://a/b/c/d/e", "c/d/e");
    assert_relativizes("http://a/b/c/d", "http://a/x/y", "../../x/y");
    assert_relativizes("http://a/b/c", "http://a/b/", ".");
    assert_relativizes("http://a/b/", "http://a/b/c", "c");
}

#[test]
fn test_same_path_strategies() {
    // Identical paths and queries reduce to nothing or a fragment
    assert_relativizes("http://a/b/c?q", "http://a/b/c?q", "");
    assert_relativizes("http://a/b/c", "http://a/b/c#f", "#f");
    // A differing query becomes a query tail
    assert_relativizes("http://a/b/c?q1", "http://a/b/c?q2", "?q2");
    assert_relativizes("http://a/b/c", "http://a/b/c?q#f", "?q#f");
    // Shedding the base query re-states the final segment
    assert_relativizes("http://a/b/c?q", "http://a/b/c", "c");
    assert_relativizes("http://a/b/?q", "http://a/b/", ".");
}

#[test]
fn test_authority_and_scheme_divergence() {
    assert_relativizes("http://a/x", "http://b/y", "//b/y");
    assert_relativizes("http://a/x?q", "http://b/y?r#f", "//b/y?r#f");
    assert_eq!(
        relativize("http://a/x", "https://a/x").as_deref(),
        Ok("https://a/x")
    );
    assert_eq!(
        relativize("http://a/x", "mailto:john").as_deref(),
        Ok("mailto:john")
    );
}

#[test]
fn test_empty_target_path() {
    assert_relativizes("http://h/x", "http://h", "//h");
    assert_relativizes("http://h/x", "http://h?q", "//h?q");
    // Both paths empty: ordinary same-path handling
    assert_relativizes("http://h", "http://h#f", "#f");
}

#[test]
fn test_colon_in_first_emitted_segment_is_guarded() {
    assert_relativizes("http://h/d/p", "http://h/d/x:y", "./x:y");
    assert_relativizes("file:/d/p", "file:/d/x:y", "./x:y");
}

#[test]
fn test_no_authority_schemes() {
    assert_relativizes("file:/a/b/c", "file:/a/x", "../x");
    assert_relativizes("mailto:john", "mailto:jane", "jane");
}

#[test]
fn test_dot_segments_cannot_be_relativized() {
    assert_eq!(
        relativize("http://a/b/c", "http://a/b/../c"),
        Err(RelativizeError::PathWithDotSegments)
    );
    assert_eq!(
        relativize("http://a/b/c", "http://a/./c"),
        Err(RelativizeError::PathWithDotSegments)
    );
}

#[test]
fn test_double_slash_path_needs_the_authority_form() {
    // "//x" as a path would read back as an authority, so the
    // scheme-relative form is produced instead
    let base = Iri::parse("http://h/a/b").unwrap();
    let target = Iri::parse("http://h//x").unwrap();
    let relative = base.relativize(&target).unwrap();
    assert_eq!(relative.as_str(), "//h//x");
    assert_eq!(base.resolve(relative.as_str()).unwrap().as_str(), "http://h//x");
}

#[test]
fn test_relative_positions_are_valid() {
    let base = Iri::parse("http://a/b/c/d;p").unwrap();
    let target = Iri::parse("http://a/b/g?q#f").unwrap();
    let relative = base.relativize(&target).unwrap();
    assert_eq!(relative.as_str(), "../g?q#f");
    assert_eq!(relative.scheme(), None);
    assert_eq!(relative.authority(), None);
    assert_eq!(relative.path(), "../g");
    assert_eq!(relative.query(), Some("q"));
    assert_eq!(relative.fragment(), Some("f"));
}

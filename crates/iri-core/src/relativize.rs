//! The inverse of resolution: express a target IRI relative to a base.
//!
//! Strategy selection per component comparison: full target when the schemes
//! differ, scheme-relative when the authorities differ, a query/fragment
//! tail when the paths match, and a `../`-walk over the common directory
//! prefix otherwise. Every produced reference resolves against the base back
//! to the target.

use crate::error::RelativizeError;
use crate::types::{Components, Positions};

type Relative = (String, Positions);

/// Relativizes `target` against `base`. Both are parsed absolute IRIs.
pub(crate) fn relativize(
    base_text: &str,
    base_positions: &Positions,
    target_text: &str,
    target_positions: &Positions,
) -> Result<Relative, RelativizeError> {
    let base = Components::from_parsed(base_text, base_positions);
    let target = Components::from_parsed(target_text, target_positions);

    // A dot segment would be re-normalized away during resolution, so such
    // targets cannot round-trip
    if target
        .path
        .split('/')
        .any(|segment| segment == "." || segment == "..")
    {
        return Err(RelativizeError::PathWithDotSegments);
    }

    if base.scheme != target.scheme {
        return Ok(full_target(target_text, target_positions));
    }
    if base.authority != target.authority {
        return Ok(match target.authority {
            None => full_target(target_text, target_positions),
            Some(_) => scheme_relative(&target),
        });
    }
    if target.path.is_empty() && !base.path.is_empty() {
        return Ok(match target.authority {
            None => full_target(target_text, target_positions),
            Some(_) => scheme_relative(&target),
        });
    }
    if base.path == target.path {
        // With an empty path there is no final segment to re-state, so a
        // base query can only be shed by naming the target in full
        if target.path.is_empty() && target.query.is_none() && base.query.is_some() {
            return Ok(match target.authority {
                None => full_target(target_text, target_positions),
                Some(_) => scheme_relative(&target),
            });
        }
        return Ok(same_path(&base, &target));
    }
    match target.authority {
        None => Ok(no_authority(&base, &target, target_text, target_positions)),
        Some(_) => Ok(with_authority(&base, &target)),
    }
}

fn full_target(target_text: &str, target_positions: &Positions) -> Relative {
    (target_text.to_owned(), *target_positions)
}

fn append_query_and_fragment(out: &mut String, positions: &mut Positions, target: &Components<'_>) {
    if let Some(query) = target.query {
        out.push('?');
        out.push_str(query);
    }
    positions.query_end = out.len();
    if let Some(fragment) = target.fragment {
        out.push('#');
        out.push_str(fragment);
    }
}

/// `//authority/path?query#fragment`
fn scheme_relative(target: &Components<'_>) -> Relative {
    let mut out = String::new();
    let mut positions = Positions::default();
    out.push_str("//");
    out.push_str(target.authority.unwrap_or(""));
    positions.authority_end = out.len();
    out.push_str(target.path);
    positions.path_end = out.len();
    append_query_and_fragment(&mut out, &mut positions, target);
    (out, positions)
}

/// Identical paths: an empty reference or a bare fragment when the queries
/// match; otherwise the query tail, or the path's final segment when the
/// target must shed a query the base carries.
fn same_path(base: &Components<'_>, target: &Components<'_>) -> Relative {
    let mut out = String::new();
    let mut positions = Positions::default();
    if base.query == target.query {
        positions.query_end = 0;
        if let Some(fragment) = target.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        return (out, positions);
    }
    if target.query.is_none() {
        // An empty reference would inherit the base query; re-state the
        // last path segment instead
        let filename = match target.path.rfind('/') {
            Some(i) => &target.path[i + 1..],
            None => target.path,
        };
        if filename.is_empty() {
            out.push('.');
        } else if filename.contains(':') {
            out.push_str("./");
            out.push_str(filename);
        } else {
            out.push_str(filename);
        }
        positions.path_end = out.len();
        positions.query_end = out.len();
        if let Some(fragment) = target.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        return (out, positions);
    }
    append_query_and_fragment(&mut out, &mut positions, target);
    (out, positions)
}

/// Differing paths without an authority.
fn no_authority(
    base: &Components<'_>,
    target: &Components<'_>,
    target_text: &str,
    target_positions: &Positions,
) -> Relative {
    // A relative target path cannot be reached by resolution against an
    // absolute base path
    if base.path.starts_with('/') && !target.path.starts_with('/') {
        return full_target(target_text, target_positions);
    }
    let mut out = relative_path(base.path, target.path);
    let mut positions = Positions::default();
    positions.path_end = out.len();
    append_query_and_fragment(&mut out, &mut positions, target);
    (out, positions)
}

/// Differing paths under one authority.
fn with_authority(base: &Components<'_>, target: &Components<'_>) -> Relative {
    // "//" opening the path would read back as an authority
    if target.path.starts_with("//") && !base.path.starts_with("//") {
        return scheme_relative(target);
    }
    let mut out = relative_path(base.path, target.path);
    let mut positions = Positions::default();
    positions.path_end = out.len();
    append_query_and_fragment(&mut out, &mut positions, target);
    (out, positions)
}

/// Walks the common directory prefix and emits `../` hops plus the target
/// remainder. `"."` stands in for an empty result, and an ambiguous leading
/// segment gets a `./` prefix.
fn relative_path(base_path: &str, target_path: &str) -> String {
    let base_segments: Vec<&str> = base_path.split('/').collect();
    let target_segments: Vec<&str> = target_path.split('/').collect();
    let base_dirs = &base_segments[..base_segments.len() - 1];
    let target_dirs = &target_segments[..target_segments.len() - 1];

    let mut common = 0;
    while common < base_dirs.len()
        && common < target_dirs.len()
        && base_dirs[common] == target_dirs[common]
    {
        common += 1;
    }

    let ups = base_dirs.len() - common;
    let mut out = String::new();
    for _ in 0..ups {
        out.push_str("../");
    }
    out.push_str(&target_segments[common..].join("/"));
    if out.is_empty() {
        out.push('.');
    } else if ups == 0 {
        let first_segment = out.split('/').next().unwrap_or("");
        if first_segment.contains(':') {
            out.insert_str(0, "./");
        }
    }
    out
}

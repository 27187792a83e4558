//! Property tests over generated component material.

use iri_core::{Iri, IriRef};
use proptest::prelude::*;

/// Simple absolute IRIs with clean (dot-free) paths.
fn iri_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9+.-]{0,5}",
        "[a-z0-9][a-z0-9.-]{0,11}",
        prop::option::of("[0-9]{1,4}"),
        prop::collection::vec("[a-zA-Z0-9_;=~-]{1,6}", 0..4),
        prop::option::of("[a-zA-Z0-9_=&~-]{0,8}"),
        prop::option::of("[a-zA-Z0-9_~-]{0,8}"),
    )
        .prop_map(|(scheme, host, port, segments, query, fragment)| {
            let mut iri = format!("{scheme}://{host}");
            if let Some(port) = port {
                iri.push(':');
                iri.push_str(&port);
            }
            for segment in &segments {
                iri.push('/');
                iri.push_str(segment);
            }
            if let Some(query) = query {
                iri.push('?');
                iri.push_str(&query);
            }
            if let Some(fragment) = fragment {
                iri.push('#');
                iri.push_str(&fragment);
            }
            iri
        })
}

proptest! {
    #[test]
    fn prop_parse_round_trips(iri in iri_strategy()) {
        let parsed = IriRef::parse(iri.as_str()).unwrap();
        prop_assert_eq!(parsed.as_str(), iri.as_str());

        // The positions split the text back into its components
        let p = parsed.positions();
        prop_assert!(p.scheme_end <= p.authority_end);
        prop_assert!(p.authority_end <= p.path_end);
        prop_assert!(p.path_end <= p.query_end);
        prop_assert!(p.query_end <= iri.len());

        let mut rebuilt = String::new();
        if let Some(scheme) = parsed.scheme() {
            rebuilt.push_str(scheme);
            rebuilt.push(':');
        }
        if let Some(authority) = parsed.authority() {
            rebuilt.push_str("//");
            rebuilt.push_str(authority);
        }
        rebuilt.push_str(parsed.path());
        if let Some(query) = parsed.query() {
            rebuilt.push('?');
            rebuilt.push_str(query);
        }
        if let Some(fragment) = parsed.fragment() {
            rebuilt.push('#');
            rebuilt.push_str(fragment);
        }
        prop_assert_eq!(rebuilt, iri);
    }

    #[test]
    fn prop_normalize_is_idempotent(iri in iri_strategy()) {
        let once = Iri::parse(iri).unwrap().normalize();
        let twice = once.normalize();
        prop_assert_eq!(once.as_str(), twice.as_str());
        prop_assert_eq!(once.positions(), twice.positions());
    }

    #[test]
    fn prop_relativize_round_trips(base in iri_strategy(), target in iri_strategy()) {
        let base = Iri::parse(base).unwrap();
        let target = Iri::parse(target).unwrap();
        // Dot-free targets always relativize
        let relative = base.relativize(&target).unwrap();
        let resolved = base.resolve(relative.as_str()).unwrap();
        prop_assert_eq!(resolved.as_str(), target.as_str());
    }

    #[test]
    fn prop_resolution_output_is_reparsable(base in iri_strategy(), reference in "[a-z0-9./]{0,12}") {
        let base = Iri::parse(base).unwrap();
        if let Ok(resolved) = base.resolve(&reference) {
            let reparsed = Iri::parse(resolved.as_str()).unwrap();
            prop_assert_eq!(reparsed.positions(), resolved.positions());
        }
    }

    #[test]
    fn prop_resolved_path_has_no_dot_segments(base in iri_strategy(), reference in "[a-z0-9./]{0,12}") {
        let base = Iri::parse(base).unwrap();
        if let Ok(resolved) = base.resolve(&reference) {
            let path = resolved.path().to_string();
            prop_assert!(
                !path.split('/').any(|segment| segment == "." || segment == ".."),
                "dot segment survived in {}", path
            );
        }
    }
}

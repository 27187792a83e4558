//! Bidirectional text checks of RFC 3987 section 4.2.
//!
//! A component may not mix left-to-right and right-to-left characters, and a
//! right-to-left component must both start and end with a right-to-left
//! character. Neutral characters (digits, punctuation, escape triples) are
//! ignored by the scan. Hosts are checked label by label.

use unicode_bidi::{bidi_class, BidiClass};

use crate::error::{ParseError, Result};

fn is_rtl(class: BidiClass) -> bool {
    matches!(class, BidiClass::R | BidiClass::AL)
}

/// Checks one component. The empty component is valid.
pub(crate) fn validate_component(component: &str) -> Result<()> {
    let mut has_ltr = false;
    let mut has_rtl = false;
    for c in component.chars() {
        let class = bidi_class(c);
        has_ltr |= class == BidiClass::L;
        has_rtl |= is_rtl(class);
    }
    if has_ltr && has_rtl {
        return Err(ParseError::BidiMixed(format!("\"{component}\"")));
    }
    if has_rtl {
        let first = component.chars().next();
        let last = component.chars().next_back();
        let boundary_ok = first.map_or(false, |c| is_rtl(bidi_class(c)))
            && last.map_or(false, |c| is_rtl(bidi_class(c)));
        if !boundary_ok {
            return Err(ParseError::BidiBoundary(format!("\"{component}\"")));
        }
    }
    Ok(())
}

/// Checks every label of a reg-name host, naming the full host in the error.
/// IP literals carry no natural-language text and are skipped.
pub(crate) fn validate_host(host: &str) -> Result<()> {
    if host.starts_with('[') {
        return Ok(());
    }
    for label in host.split('.') {
        validate_component(label).map_err(|e| match e {
            ParseError::BidiMixed(_) => {
                ParseError::BidiMixed(format!("label \"{label}\" of host \"{host}\""))
            }
            ParseError::BidiBoundary(_) => {
                ParseError::BidiBoundary(format!("label \"{label}\" of host \"{host}\""))
            }
            other => other,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // U+05D0..U+05D2 are Hebrew letters (class R); U+0660 is an
    // Arabic-Indic digit (class AN, neutral for rule 1)

    #[test]
    fn test_ltr_and_empty_components_pass() {
        validate_component("").unwrap();
        validate_component("abc").unwrap();
        validate_component("a-1_b").unwrap();
    }

    #[test]
    fn test_pure_rtl_component_passes() {
        validate_component("\u{5D0}\u{5D1}\u{5D2}").unwrap();
    }

    #[test]
    fn test_mixed_direction_rejected() {
        let err = validate_component("a\u{5D0}").unwrap_err();
        assert!(matches!(err, ParseError::BidiMixed(_)));
    }

    #[test]
    fn test_rtl_boundary_rule() {
        // Neutral character at the end of an RTL component
        let err = validate_component("\u{5D0}\u{5D1}-").unwrap_err();
        assert!(matches!(err, ParseError::BidiBoundary(_)));
        // Neutral character at the start
        let err = validate_component("-\u{5D0}").unwrap_err();
        assert!(matches!(err, ParseError::BidiBoundary(_)));
        // Neutral in the middle is fine
        validate_component("\u{5D0}-\u{5D1}").unwrap();
    }

    #[test]
    fn test_host_checked_per_label() {
        validate_host("example.com").unwrap();
        validate_host("\u{5D0}\u{5D1}.example").unwrap();
        let err = validate_host("a\u{5D0}.example").unwrap_err();
        match err {
            ParseError::BidiMixed(context) => {
                assert!(context.contains("a\u{5D0}.example"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_ip_literals_skipped() {
        validate_host("[2001:db8::1]").unwrap();
    }
}

//! Character classes of RFC 3986 / RFC 3987.
//!
//! The state machine consumes Unicode scalars one at a time, so the rules are
//! expressed as predicates over `char` rather than as byte parsers. Each
//! predicate quotes the grammar rule it implements.

// ALPHA = %x41-5A / %x61-7A
pub(crate) fn is_ascii_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

// DIGIT = %x30-39
pub(crate) fn is_ascii_digit(c: char) -> bool {
    c.is_ascii_digit()
}

// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F" (case-insensitive)
pub(crate) fn is_ascii_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub(crate) fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

// sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
pub(crate) fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

// ucschar = %xA0-D7FF / %xF900-FDCF / %xFDF0-FFEF
//         / %x10000-1FFFD / %x20000-2FFFD / %x30000-3FFFD
//         / %x40000-4FFFD / %x50000-5FFFD / %x60000-6FFFD
//         / %x70000-7FFFD / %x80000-8FFFD / %x90000-9FFFD
//         / %xA0000-AFFFD / %xB0000-BFFFD / %xC0000-CFFFD
//         / %xD0000-DFFFD / %xE1000-EFFFD
pub(crate) fn is_ucschar(c: char) -> bool {
    matches!(
        c,
        '\u{A0}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFEF}'
            | '\u{10000}'..='\u{1FFFD}'
            | '\u{20000}'..='\u{2FFFD}'
            | '\u{30000}'..='\u{3FFFD}'
            | '\u{40000}'..='\u{4FFFD}'
            | '\u{50000}'..='\u{5FFFD}'
            | '\u{60000}'..='\u{6FFFD}'
            | '\u{70000}'..='\u{7FFFD}'
            | '\u{80000}'..='\u{8FFFD}'
            | '\u{90000}'..='\u{9FFFD}'
            | '\u{A0000}'..='\u{AFFFD}'
            | '\u{B0000}'..='\u{BFFFD}'
            | '\u{C0000}'..='\u{CFFFD}'
            | '\u{D0000}'..='\u{DFFFD}'
            | '\u{E1000}'..='\u{EFFFD}'
    )
}

// iunreserved = ALPHA / DIGIT / "-" / "." / "_" / "~" / ucschar
pub(crate) fn is_iunreserved(c: char) -> bool {
    is_unreserved(c) || is_ucschar(c)
}

// iprivate = %xE000-F8FF / %xF0000-FFFFD / %x100000-10FFFD
pub(crate) fn is_iprivate(c: char) -> bool {
    matches!(
        c,
        '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}'
    )
}

// The bidi formatting characters of RFC 3987 section 4.1: LRM, RLM and the
// explicit embedding/override controls. They are never valid, anywhere.
pub(crate) fn is_forbidden_bidi(c: char) -> bool {
    matches!(c, '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}')
}

// iunreserved / sub-delims, the base alphabet shared by every component
pub(crate) fn is_iunreserved_or_sub_delim(c: char) -> bool {
    !is_forbidden_bidi(c) && (is_iunreserved(c) || is_sub_delim(c))
}

// ASCII characters that are not grammatically valid but are accepted and
// percent-encoded instead of rejected
pub(crate) fn is_lax_ascii(c: char) -> bool {
    matches!(c, '<' | '>' | '"' | ' ' | '{' | '}' | '|' | '\\' | '^' | '`')
}

// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub(crate) fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

// iuserinfo = *( iunreserved / pct-encoded / sub-delims / ":" )
pub(crate) fn is_userinfo_char(c: char) -> bool {
    is_iunreserved_or_sub_delim(c) || c == ':'
}

// ireg-name = *( iunreserved / pct-encoded / sub-delims )
// "." is carried explicitly; "[", "]" and ":" only exist on the IP-literal
// and port split paths.
pub(crate) fn is_reg_name_char(c: char) -> bool {
    is_iunreserved_or_sub_delim(c) || c == '.'
}

// ipchar = iunreserved / pct-encoded / sub-delims / ":" / "@", plus the "/"
// separating segments
pub(crate) fn is_path_char(c: char) -> bool {
    is_iunreserved_or_sub_delim(c) || matches!(c, ':' | '@' | '/')
}

// iquery = *( ipchar / iprivate / "/" / "?" )
pub(crate) fn is_query_char(c: char) -> bool {
    is_path_char(c) || c == '?' || is_iprivate(c)
}

// ifragment = *( ipchar / "/" / "?" )
pub(crate) fn is_fragment_char(c: char) -> bool {
    is_path_char(c) || c == '?'
}

// The address part of IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
pub(crate) fn is_ip_future_addr_char(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || c == ':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved() {
        for c in ['a', 'Z', '0', '9', '-', '.', '_', '~'] {
            assert!(is_unreserved(c), "{c} should be unreserved");
        }
        for c in ['%', '/', ':', ' ', 'é'] {
            assert!(!is_unreserved(c), "{c} should not be unreserved");
        }
    }

    #[test]
    fn test_sub_delims() {
        for c in ['!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '='] {
            assert!(is_sub_delim(c));
        }
        assert!(!is_sub_delim('-'));
        assert!(!is_sub_delim('?'));
    }

    #[test]
    fn test_ucschar_ranges() {
        // Boundary values of the first and last ranges
        assert!(is_ucschar('\u{A0}'));
        assert!(is_ucschar('\u{D7FF}'));
        assert!(is_ucschar('\u{E1000}'));
        assert!(is_ucschar('\u{EFFFD}'));
        // Surrogate-adjacent and interchange-invalid code points are excluded
        assert!(!is_ucschar('\u{9F}'));
        assert!(!is_ucschar('\u{E000}'));
        assert!(!is_ucschar('\u{FFFF}'));
        assert!(!is_ucschar('\u{1FFFE}'));
        // Plain ASCII is not a ucschar
        assert!(!is_ucschar('a'));
    }

    #[test]
    fn test_iprivate() {
        assert!(is_iprivate('\u{E000}'));
        assert!(is_iprivate('\u{F8FF}'));
        assert!(is_iprivate('\u{100000}'));
        assert!(!is_iprivate('\u{D7FF}'));
        assert!(!is_iprivate('a'));
    }

    #[test]
    fn test_forbidden_bidi_is_never_iunreserved() {
        for c in ['\u{200E}', '\u{200F}', '\u{202A}', '\u{202C}', '\u{202E}'] {
            assert!(is_forbidden_bidi(c));
            // Inside the A0-D7FF ucschar block, but excluded from the
            // combined predicate
            assert!(is_ucschar(c));
            assert!(!is_iunreserved_or_sub_delim(c));
        }
    }

    #[test]
    fn test_lax_ascii() {
        for c in ['<', '>', '"', ' ', '{', '}', '|', '\\', '^', '`'] {
            assert!(is_lax_ascii(c));
        }
        assert!(!is_lax_ascii('%'));
        assert!(!is_lax_ascii('a'));
    }

    #[test]
    fn test_component_alphabets() {
        assert!(is_userinfo_char(':'));
        assert!(!is_userinfo_char('@'));
        assert!(is_reg_name_char('.'));
        assert!(!is_reg_name_char('['));
        assert!(!is_reg_name_char(':'));
        assert!(is_path_char('@'));
        assert!(is_path_char(':'));
        assert!(!is_path_char('?'));
        assert!(is_query_char('?'));
        assert!(is_query_char('\u{E000}'));
        assert!(is_fragment_char('?'));
        assert!(!is_fragment_char('\u{E000}'));
    }
}

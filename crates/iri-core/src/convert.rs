//! Conversion between IRIs and ASCII-only URIs (RFC 3987 section 3).

use unicode_normalization::UnicodeNormalization;

use crate::parser::authority;
use crate::parser::percent;
use crate::types::{Components, Positions};

/// Maps a parsed IRI to an ASCII-only URI: NFC, percent-encoding of every
/// non-ASCII scalar, and IDNA ToASCII for reg-name hosts.
pub(crate) fn to_uri(text: &str, positions: &Positions) -> String {
    let c = Components::from_parsed(text, positions);
    let mut out = String::with_capacity(text.len());
    if let Some(scheme) = c.scheme {
        out.push_str(scheme);
        out.push(':');
    }
    if let Some(a) = c.authority {
        out.push_str("//");
        let parts = authority::split(a);
        if let Some(userinfo) = parts.userinfo {
            encode_component(userinfo, &mut out);
            out.push('@');
        }
        if parts.host.starts_with('[') || parts.host.is_ascii() {
            out.push_str(parts.host);
        } else {
            match idna::domain_to_ascii(parts.host) {
                Ok(ascii) => out.push_str(&ascii),
                Err(_) => encode_component(parts.host, &mut out),
            }
        }
        if let Some(port) = parts.port {
            out.push(':');
            out.push_str(port);
        }
    }
    encode_component(c.path, &mut out);
    if let Some(query) = c.query {
        out.push('?');
        encode_component(query, &mut out);
    }
    if let Some(fragment) = c.fragment {
        out.push('#');
        encode_component(fragment, &mut out);
    }
    out
}

fn encode_component(component: &str, out: &mut String) {
    for c in component.nfc() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut buffer = [0; 4];
            for byte in c.encode_utf8(&mut buffer).bytes() {
                percent::percent_encode_byte(byte, out);
            }
        }
    }
}

/// Maps a URI back towards an IRI by decoding the escape triples whose bytes
/// form non-ASCII UTF-8 free of forbidden bidi controls. Single-byte triples
/// and undecodable runs stay escaped; the caller re-parses the result.
pub(crate) fn uri_to_iri(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    let mut rest = uri;
    while let Some(i) = rest.find('%') {
        out.push_str(&rest[..i]);
        rest = &rest[i..];

        // Gather the run of consecutive well-formed escape triples
        let mut bytes = Vec::new();
        let mut consumed = 0;
        while rest[consumed..].starts_with('%') {
            let hex = rest.as_bytes().get(consumed + 1..consumed + 3);
            match hex {
                Some([h, l]) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit() => {
                    // Guarded above, the radix parse cannot fail
                    let byte = u8::from_str_radix(&rest[consumed + 1..consumed + 3], 16)
                        .unwrap_or_default();
                    bytes.push(byte);
                    consumed += 3;
                }
                _ => break,
            }
        }
        if bytes.is_empty() {
            out.push('%');
            rest = &rest[1..];
            continue;
        }
        decode_run(&bytes, &rest[..consumed], &mut out);
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    out
}

fn decode_run(bytes: &[u8], run_text: &str, out: &mut String) {
    let mut i = 0;
    while i < bytes.len() {
        // UTF-8 sequence length from the lead byte; ASCII and stray
        // continuation bytes stay escaped
        let len = match bytes[i] {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => {
                out.push_str(&run_text[i * 3..(i + 1) * 3]);
                i += 1;
                continue;
            }
        };
        match bytes.get(i..i + len) {
            Some(sequence) if percent::validate_decoded_bytes(sequence) => {
                match std::str::from_utf8(sequence) {
                    Ok(decoded) => {
                        out.push_str(decoded);
                        i += len;
                    }
                    Err(_) => {
                        out.push_str(&run_text[i * 3..(i + 1) * 3]);
                        i += 1;
                    }
                }
            }
            _ => {
                out.push_str(&run_text[i * 3..(i + 1) * 3]);
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_to_iri_decodes_utf8_runs() {
        assert_eq!(uri_to_iri("/r%C3%A9sum%C3%A9"), "/résumé");
        assert_eq!(uri_to_iri("%E2%82%AC"), "€");
        // ASCII triples stay escaped
        assert_eq!(uri_to_iri("/a%2Fb%20c"), "/a%2Fb%20c");
        // Mixed runs decode only the non-ASCII part
        assert_eq!(uri_to_iri("%2F%C3%A9"), "%2F\u{e9}");
    }

    #[test]
    fn test_uri_to_iri_keeps_invalid_sequences() {
        // Lone continuation byte
        assert_eq!(uri_to_iri("%A9x"), "%A9x");
        // Truncated two-byte sequence
        assert_eq!(uri_to_iri("%C3"), "%C3");
        // Forbidden bidi control U+202E (RLO)
        assert_eq!(uri_to_iri("%E2%80%AE"), "%E2%80%AE");
        // Malformed escape
        assert_eq!(uri_to_iri("100%"), "100%");
        assert_eq!(uri_to_iri("a%zzb"), "a%zzb");
    }
}

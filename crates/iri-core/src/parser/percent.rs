//! Percent-encoding codec.
//!
//! The parser keeps accepted escape triples byte-for-byte (original hex
//! casing included); only the normalizer rewrites them.

use crate::error::{ParseError, Result};
use crate::parser::chars;
use crate::parser::cursor::Cursor;
use crate::parser::sink::Sink;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Reads the two hex digits of an escape triple, the `%` having already been
/// consumed, and echoes the triple verbatim.
pub(crate) fn read_echar<O: Sink>(input: &mut Cursor<'_>, output: &mut O) -> Result<()> {
    let c1 = input.next();
    let c2 = input.next();
    match (c1, c2) {
        (Some(c1), Some(c2)) if chars::is_ascii_hex(c1) && chars::is_ascii_hex(c2) => {
            output.push('%');
            output.push(c1);
            output.push(c2);
            Ok(())
        }
        _ => Err(ParseError::InvalidPercent(
            std::iter::once('%').chain(c1).chain(c2).collect(),
        )),
    }
}

/// The single interior validation gate used by every component parser.
///
/// `c` has already been consumed. Escape triples are delegated to
/// [`read_echar`]; in unchecked mode anything else is echoed verbatim;
/// otherwise the character must satisfy `valid` or be a lax ASCII character,
/// which is percent-encoded instead of rejected.
pub(crate) fn read_codepoint_or_echar<O: Sink>(
    c: char,
    input: &mut Cursor<'_>,
    output: &mut O,
    valid: fn(char) -> bool,
    unchecked: bool,
) -> Result<()> {
    if c == '%' {
        read_echar(input, output)
    } else if unchecked || valid(c) {
        output.push(c);
        Ok(())
    } else if chars::is_lax_ascii(c) {
        percent_encode(c, output);
        Ok(())
    } else {
        Err(ParseError::InvalidChar(c))
    }
}

/// Writes one byte as an uppercase-hex escape triple.
pub(crate) fn percent_encode_byte<O: Sink>(byte: u8, output: &mut O) {
    output.push('%');
    output.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
    output.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
}

/// Writes `c` unchanged when unreserved, otherwise as the uppercase-hex
/// escape triples of its UTF-8 bytes.
pub(crate) fn percent_encode<O: Sink>(c: char, output: &mut O) {
    if chars::is_unreserved(c) {
        output.push(c);
        return;
    }
    let mut buffer = [0; 4];
    for byte in c.encode_utf8(&mut buffer).bytes() {
        percent_encode_byte(byte, output);
    }
}

/// Rewrites the escape triples of an already-validated component: triples
/// decoding to an unreserved ASCII byte are replaced by that byte, the rest
/// keep their bytes but get uppercase hex. Everything else is copied
/// untouched.
pub(crate) fn normalize_percent_encoding(component: &str) -> String {
    let mut output = String::with_capacity(component.len());
    let mut rest = component;
    while let Some(i) = rest.find('%') {
        output.push_str(&rest[..i]);
        rest = &rest[i..];
        let mut tail = rest.chars();
        tail.next(); // '%'
        match (tail.next(), tail.next()) {
            (Some(c1), Some(c2)) if c1.is_ascii_hexdigit() && c2.is_ascii_hexdigit() => {
                match (c1.to_digit(16), c2.to_digit(16)) {
                    (Some(high), Some(low)) => {
                        let byte = (high * 16 + low) as u8;
                        if byte.is_ascii() && chars::is_unreserved(char::from(byte)) {
                            output.push(char::from(byte));
                        } else {
                            output.push('%');
                            output.push(c1.to_ascii_uppercase());
                            output.push(c2.to_ascii_uppercase());
                        }
                        rest = &rest[3..];
                    }
                    _ => {
                        output.push('%');
                        rest = &rest[1..];
                    }
                }
            }
            _ => {
                output.push('%');
                rest = &rest[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

/// True when `bytes` form valid UTF-8 free of the forbidden bidi controls.
pub(crate) fn validate_decoded_bytes(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(s) => !s.chars().any(chars::is_forbidden_bidi),
        Err(_) => false,
    }
}

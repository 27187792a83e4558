//! Bracketed IP-literal grammar.
//!
//! IP-literal = "[" ( IPv6address / IPvFuture ) "]"
//! IPvFuture  = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
//!
//! The IPvFuture shell is parsed with nom; IPv6 addresses get the standard
//! library semantics, so zone-free textual forms accepted by `Ipv6Addr` are
//! accepted here.

use std::net::Ipv6Addr;
use std::str::FromStr;

use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::IResult;

use crate::error::{ParseError, Result};
use crate::parser::chars;

fn version_digits(input: &str) -> IResult<&str, &str> {
    take_while1(chars::is_ascii_hex)(input)
}

fn dot(input: &str) -> IResult<&str, char> {
    char('.')(input)
}

fn future_addr(input: &str) -> IResult<&str, &str> {
    take_while1(chars::is_ip_future_addr_char)(input)
}

/// Validates the inside of a bracketed host (brackets already stripped).
pub(crate) fn validate_ip_literal(inner: &str) -> Result<()> {
    if inner.starts_with('v') || inner.starts_with('V') {
        validate_ip_future(inner)
    } else {
        match Ipv6Addr::from_str(inner) {
            Ok(_) => Ok(()),
            Err(e) => Err(ParseError::InvalidIpLiteral(format!(
                "\"{inner}\" is not an IPv6 address ({e})"
            ))),
        }
    }
}

/// Validates an IPvFuture literal. `inner` starts with `v` or `V`.
fn validate_ip_future(inner: &str) -> Result<()> {
    let rest = &inner[1..];
    let (rest, _version) = version_digits(rest).map_err(|_| {
        ParseError::InvalidIpVFuture(format!("missing or non-hexadecimal version in \"{inner}\""))
    })?;
    let (rest, _) = dot(rest).map_err(|_| {
        ParseError::InvalidIpVFuture(format!("missing \".\" separator in \"{inner}\""))
    })?;
    all_consuming(future_addr)(rest).map_err(|_| {
        ParseError::InvalidIpVFuture(format!("missing or invalid address part in \"{inner}\""))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv6_literals() {
        validate_ip_literal("2001:db8::1").unwrap();
        validate_ip_literal("::1").unwrap();
        validate_ip_literal("::ffff:192.0.2.1").unwrap();

        assert!(matches!(
            validate_ip_literal("2001:db8:::1").unwrap_err(),
            ParseError::InvalidIpLiteral(_)
        ));
        assert!(matches!(
            validate_ip_literal("example.com").unwrap_err(),
            ParseError::InvalidIpLiteral(_)
        ));
        assert!(matches!(
            validate_ip_literal("").unwrap_err(),
            ParseError::InvalidIpLiteral(_)
        ));
    }

    #[test]
    fn test_ip_future() {
        validate_ip_literal("v1.addr").unwrap();
        validate_ip_literal("vF.a:b:c").unwrap();
        validate_ip_literal("V7.x,y").unwrap();

        // Version missing or non-hex
        assert!(matches!(
            validate_ip_literal("v.addr").unwrap_err(),
            ParseError::InvalidIpVFuture(_)
        ));
        assert!(matches!(
            validate_ip_literal("vz.addr").unwrap_err(),
            ParseError::InvalidIpVFuture(_)
        ));
        // Separator missing
        assert!(matches!(
            validate_ip_literal("v1addr").unwrap_err(),
            ParseError::InvalidIpVFuture(_)
        ));
        // Address part missing or invalid
        assert!(matches!(
            validate_ip_literal("v1.").unwrap_err(),
            ParseError::InvalidIpVFuture(_)
        ));
        assert!(matches!(
            validate_ip_literal("v1.a/b").unwrap_err(),
            ParseError::InvalidIpVFuture(_)
        ));
    }
}

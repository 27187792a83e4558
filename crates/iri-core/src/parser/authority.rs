//! Authority splitting, validation and normalization.
//!
//! iauthority = [ iuserinfo "@" ] ihost [ ":" port ]
//!
//! Splitting is stateless and positional: everything before the LAST `@` is
//! userinfo, a leading `[` makes the host run to the LAST `]`, and otherwise
//! the LAST `:` separates host and port. Userinfo and port are reported by
//! presence so that accepted inputs re-emit byte-for-byte (`user@host:` keeps
//! its delimiters, an empty port is legal).

use crate::error::{ParseError, Result};
use crate::parser::bidi;
use crate::parser::chars;
use crate::parser::cursor::Cursor;
use crate::parser::host;
use crate::parser::percent;
use crate::parser::sink::Sink;

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct AuthorityParts<'a> {
    pub(crate) userinfo: Option<&'a str>,
    pub(crate) host: &'a str,
    pub(crate) port: Option<&'a str>,
}

/// Splits an authority into userinfo, host and port.
pub(crate) fn split(authority: &str) -> AuthorityParts<'_> {
    let (userinfo, rest) = match authority.rfind('@') {
        Some(i) => (Some(&authority[..i]), &authority[i + 1..]),
        None => (None, authority),
    };
    if rest.starts_with('[') {
        if let Some(i) = rest.rfind(']') {
            if let Some(port) = rest[i + 1..].strip_prefix(':') {
                return AuthorityParts {
                    userinfo,
                    host: &rest[..=i],
                    port: Some(port),
                };
            }
        }
        // Unclosed bracket or trailing junk: leave it on the host for the
        // validator to reject
        AuthorityParts {
            userinfo,
            host: rest,
            port: None,
        }
    } else {
        match rest.rfind(':') {
            Some(i) => AuthorityParts {
                userinfo,
                host: &rest[..i],
                port: Some(&rest[i + 1..]),
            },
            None => AuthorityParts {
                userinfo,
                host: rest,
                port: None,
            },
        }
    }
}

/// Validates the split authority and re-emits it into the sink.
pub(crate) fn validate_and_emit<O: Sink>(
    parts: &AuthorityParts<'_>,
    output: &mut O,
    unchecked: bool,
    check_bidi: bool,
) -> Result<()> {
    if let Some(userinfo) = parts.userinfo {
        if check_bidi {
            bidi::validate_component(userinfo)?;
        }
        let mut cursor = Cursor::new(userinfo);
        while let Some(c) = cursor.next() {
            percent::read_codepoint_or_echar(
                c,
                &mut cursor,
                output,
                chars::is_userinfo_char,
                unchecked,
            )?;
        }
        output.push('@');
    }

    emit_host(parts.host, output, unchecked, check_bidi)?;

    if let Some(port) = parts.port {
        output.push(':');
        if !unchecked {
            if let Some(c) = port.chars().find(|c| !chars::is_ascii_digit(*c)) {
                return Err(ParseError::InvalidPort(c));
            }
        }
        output.push_str(port);
    }
    Ok(())
}

fn emit_host<O: Sink>(host: &str, output: &mut O, unchecked: bool, check_bidi: bool) -> Result<()> {
    if host.starts_with('[') {
        if !unchecked {
            if !host.ends_with(']') || host.len() < 2 {
                return Err(ParseError::InvalidIpLiteral(format!(
                    "missing closing \"]\" in \"{host}\""
                )));
            }
            host::validate_ip_literal(&host[1..host.len() - 1])?;
        }
        output.push_str(host);
        return Ok(());
    }
    if check_bidi {
        bidi::validate_host(host)?;
    }
    let mut cursor = Cursor::new(host);
    while let Some(c) = cursor.next() {
        percent::read_codepoint_or_echar(c, &mut cursor, output, chars::is_reg_name_char, unchecked)?;
    }
    Ok(())
}

/// Default ports elided by scheme-based normalization.
fn default_port(scheme: &str) -> Option<u32> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        "ftp" => Some(21),
        _ => None,
    }
}

/// Normalizes host and port for a scheme.
///
/// The host is lowercased (bracketed literals included) and, when it is a
/// reg-name, canonicalized through IDNA ToASCII then ToUnicode; `ß` is then
/// mapped to `ss`, the one Nameprep mapping IDNA no longer performs. The port
/// is dropped when empty or equal to the scheme's default.
pub(crate) fn normalize_host_and_port(
    host: &str,
    port: Option<&str>,
    scheme: Option<&str>,
) -> (String, Option<String>) {
    let mut host = host.to_lowercase();
    if !host.starts_with('[') {
        if let Ok(ascii) = idna::domain_to_ascii(&host) {
            let (unicode, errors) = idna::domain_to_unicode(&ascii);
            if errors.is_ok() {
                host = unicode;
            }
        }
        if host.contains('ß') {
            host = host.replace('ß', "ss");
        }
    }
    let port = port.filter(|p| !p.is_empty()).and_then(|p| {
        let is_default = scheme
            .and_then(default_port)
            .map_or(false, |d| p.parse::<u32>() == Ok(d));
        if is_default {
            None
        } else {
            Some(p.to_string())
        }
    });
    (host, port)
}

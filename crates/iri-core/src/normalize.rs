//! Syntax-based normalization (RFC 3986 section 6.2).

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::parser::authority;
use crate::parser::machine::IriMachine;
use crate::parser::percent;
use crate::parser::sink::VoidSink;
use crate::resolve::dot_segments::remove_dot_segments;
use crate::types::{Components, Positions};

/// Normalizes a parsed reference and returns the canonical text with its
/// positions. Returns the input unchanged when normalization is the
/// identity.
///
/// Steps: lowercase the scheme; canonicalize host and port; rewrite the
/// escape triples of every component; collapse dot segments; force an empty
/// path to `/` under an authority; recompose; apply NFC; re-parse for the
/// canonical positions.
pub(crate) fn normalize_parsed(text: &str, positions: &Positions) -> Result<(String, Positions)> {
    let c = Components::from_parsed(text, positions);

    let scheme = c.scheme.map(str::to_ascii_lowercase);

    let authority = c.authority.map(|a| {
        let parts = authority::split(a);
        // Escape triples first: a "%41" must decode before case folding so
        // that a second pass finds nothing left to do
        let host = percent::normalize_percent_encoding(parts.host);
        let (host, port) =
            authority::normalize_host_and_port(&host, parts.port, scheme.as_deref());
        let mut out = String::with_capacity(a.len());
        if let Some(userinfo) = parts.userinfo {
            out.push_str(&percent::normalize_percent_encoding(userinfo));
            out.push('@');
        }
        // Case folding lowercased the hex of any surviving triple
        out.push_str(&percent::normalize_percent_encoding(&host));
        if let Some(port) = port {
            out.push(':');
            out.push_str(&port);
        }
        out
    });

    let mut path = remove_dot_segments(&percent::normalize_percent_encoding(c.path));
    if authority.is_some() && path.is_empty() {
        path.push('/');
    }
    if authority.is_none() {
        // Collapsing dot segments must not change what the text re-parses
        // as: "/.//x" would recompose into an authority form, and a bare
        // first segment with a ":" into a scheme form
        if path.starts_with("//") {
            path.insert_str(0, "/.");
        } else if scheme.is_none() && !path.starts_with('/') {
            let first_segment = path.split('/').next().unwrap_or("");
            if first_segment.contains(':') {
                path.insert_str(0, "./");
            }
        }
    }
    let query = c.query.map(percent::normalize_percent_encoding);
    let fragment = c.fragment.map(percent::normalize_percent_encoding);

    let mut recomposed = String::with_capacity(text.len());
    if let Some(scheme) = &scheme {
        recomposed.push_str(scheme);
        recomposed.push(':');
    }
    if let Some(authority) = &authority {
        recomposed.push_str("//");
        recomposed.push_str(authority);
    }
    recomposed.push_str(&path);
    if let Some(query) = &query {
        recomposed.push('?');
        recomposed.push_str(query);
    }
    if let Some(fragment) = &fragment {
        recomposed.push('#');
        recomposed.push_str(fragment);
    }

    let recomposed: String = recomposed.nfc().collect();
    if recomposed == text {
        tracing::trace!(iri = text, "normalization left the IRI unchanged");
        return Ok((recomposed, *positions));
    }

    // Re-parse (unchecked: the text is already valid) for canonical offsets
    let positions = IriMachine::parse(&recomposed, true, &mut VoidSink::default())?;
    Ok((recomposed, positions))
}

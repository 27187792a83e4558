//! Reference deconstruction and resolution (RFC 3986 section 5.2).

pub(crate) mod dot_segments;

use crate::error::{ParseError, Result};
use crate::parser::chars;
use crate::parser::machine::IriMachine;
use crate::parser::sink::Sink;
use crate::types::{Components, Positions};

use dot_segments::{merge_paths, remove_dot_segments};

/// A previously parsed absolute IRI serving as the resolution base. The
/// caller guarantees validity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Base<'a> {
    pub(crate) text: &'a str,
    pub(crate) positions: Positions,
}

/// The five components of a deconstructed reference. `scheme` carries its
/// presence through emptiness; the other optional components have explicit
/// flags so empty-but-present forms (`"?"`, `"#"`, `"//"`) survive.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct RefParts<'a> {
    pub(crate) scheme: &'a str,
    pub(crate) authority: &'a str,
    pub(crate) path: &'a str,
    pub(crate) query: &'a str,
    pub(crate) fragment: &'a str,
    pub(crate) has_authority: bool,
    pub(crate) has_query: bool,
    pub(crate) has_fragment: bool,
}

/// Splits a reference into its components: fragment first, then query, then
/// an optional scheme, then a `//`-authority running to the next `/`.
pub(crate) fn deconstruct(reference: &str) -> RefParts<'_> {
    let mut parts = RefParts::default();
    let mut rest = reference;
    if let Some(i) = rest.find('#') {
        parts.fragment = &rest[i + 1..];
        parts.has_fragment = true;
        rest = &rest[..i];
    }
    if let Some(i) = rest.find('?') {
        parts.query = &rest[i + 1..];
        parts.has_query = true;
        rest = &rest[..i];
    }
    if let Some(scheme) = extract_scheme(rest) {
        parts.scheme = scheme;
        rest = &rest[scheme.len() + 1..];
    }
    if let Some(after) = rest.strip_prefix("//") {
        parts.has_authority = true;
        match after.find('/') {
            Some(i) => {
                parts.authority = &after[..i];
                parts.path = &after[i..];
            }
            None => parts.authority = after,
        }
    } else {
        parts.path = rest;
    }
    parts
}

/// Returns the scheme of `s` when the characters before its first `:` form
/// one.
fn extract_scheme(s: &str) -> Option<&str> {
    let i = s.find(':')?;
    let candidate = &s[..i];
    let mut candidate_chars = candidate.chars();
    let first = candidate_chars.next()?;
    if chars::is_ascii_letter(first) && candidate_chars.all(chars::is_scheme_char) {
        Some(candidate)
    } else {
        None
    }
}

/// Resolves `reference` against `base` and recomposes the target into
/// `output`, returning the component boundaries.
///
/// In checked mode the reference is first parsed standalone into a scratch
/// buffer; that both validates it and applies lax encoding, so the
/// recomposed target is itself a valid IRI. Unchecked mode deconstructs the
/// raw input.
pub(crate) fn resolve<O: Sink>(
    reference: &str,
    base: Base<'_>,
    unchecked: bool,
    output: &mut O,
) -> Result<Positions> {
    tracing::trace!(reference, base = base.text, "resolving reference");
    let validated;
    let reference = if unchecked {
        reference
    } else {
        let mut buffer = String::with_capacity(reference.len());
        IriMachine::parse(reference, false, &mut buffer)?;
        validated = buffer;
        &validated
    };

    let r = deconstruct(reference);
    if !unchecked && !r.scheme.is_empty() && !r.has_authority && !r.path.starts_with('/') {
        // "a:b" resolved against a base is indistinguishable from a
        // relative path whose first segment contains a colon
        return Err(ParseError::InvalidFirstSegmentColon);
    }

    let b = Components::from_parsed(base.text, &base.positions);
    let base_scheme = b.scheme.unwrap_or("");
    let base_path = b.path;

    let scheme;
    let authority;
    let has_authority;
    let path;
    let query;
    let has_query;
    if !r.scheme.is_empty() {
        scheme = r.scheme;
        authority = r.authority;
        has_authority = r.has_authority;
        path = remove_dot_segments(r.path);
        query = r.query;
        has_query = r.has_query;
    } else {
        scheme = base_scheme;
        if r.has_authority {
            authority = r.authority;
            has_authority = true;
            path = remove_dot_segments(r.path);
            query = r.query;
            has_query = r.has_query;
        } else {
            authority = b.authority.unwrap_or("");
            has_authority = b.authority.is_some();
            if r.path.is_empty() {
                path = base_path.to_owned();
                if r.has_query {
                    query = r.query;
                    has_query = true;
                } else {
                    query = b.query.unwrap_or("");
                    has_query = b.query.is_some();
                }
            } else {
                if r.path.starts_with('/') {
                    path = remove_dot_segments(r.path);
                } else {
                    let merge_base = if base_path.is_empty() && b.authority.is_some() {
                        "/"
                    } else {
                        base_path
                    };
                    path = merge_paths(merge_base, r.path);
                }
                query = r.query;
                has_query = r.has_query;
            }
        }
    }

    if !has_authority && path.starts_with("//") {
        return Err(ParseError::PathStartsWithSlashes);
    }

    // Recomposition, RFC 3986 section 5.3
    let mut positions = Positions::default();
    output.push_str(scheme);
    output.push(':');
    positions.scheme_end = output.len();
    if has_authority {
        output.push_str("//");
        output.push_str(authority);
    }
    positions.authority_end = output.len();
    output.push_str(&path);
    positions.path_end = output.len();
    if has_query {
        output.push('?');
        output.push_str(query);
    }
    positions.query_end = output.len();
    if r.has_fragment {
        output.push('#');
        output.push_str(r.fragment);
    }
    Ok(positions)
}

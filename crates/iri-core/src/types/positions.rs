//! Component boundary offsets of a parsed IRI reference.

/// Byte offsets of the component end points inside a parsed IRI reference.
///
/// Every offset is exclusive and points into the parse output; the start of a
/// component is the end of the previous one. The offsets are ordered:
/// `0 <= scheme_end <= authority_end <= path_end <= query_end <= len`.
///
/// * `scheme_end == 0` means the reference is relative; otherwise the byte at
///   `scheme_end - 1` is the `:` closing the scheme.
/// * An authority is present iff `authority_end > scheme_end` and the two
///   bytes at `scheme_end` are `//`.
/// * A query is present iff `query_end > path_end`; the byte at `path_end` is
///   then the `?`.
/// * A fragment is present iff `query_end` is less than the total length; the
///   byte at `query_end` is then the `#`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Positions {
    /// End of the scheme, including its closing `:`
    pub scheme_end: usize,
    /// End of the authority, including the leading `//`
    pub authority_end: usize,
    /// End of the path; a present query's `?` sits here
    pub path_end: usize,
    /// End of the query; a present fragment's `#` sits here
    pub query_end: usize,
}

/// Borrowed component view over a parsed reference, derived from its
/// [`Positions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Components<'a> {
    pub(crate) scheme: Option<&'a str>,
    pub(crate) authority: Option<&'a str>,
    pub(crate) path: &'a str,
    pub(crate) query: Option<&'a str>,
    pub(crate) fragment: Option<&'a str>,
}

impl<'a> Components<'a> {
    pub(crate) fn from_parsed(text: &'a str, positions: &Positions) -> Self {
        let scheme = if positions.scheme_end > 0 {
            Some(&text[..positions.scheme_end - 1])
        } else {
            None
        };
        let authority = if positions.authority_end > positions.scheme_end
            && text[positions.scheme_end..].starts_with("//")
        {
            Some(&text[positions.scheme_end + 2..positions.authority_end])
        } else {
            None
        };
        let path = &text[positions.authority_end..positions.path_end];
        let query = if positions.query_end > positions.path_end {
            Some(&text[positions.path_end + 1..positions.query_end])
        } else {
            None
        };
        let fragment = if positions.query_end < text.len() {
            Some(&text[positions.query_end + 1..])
        } else {
            None
        };
        Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        }
    }
}

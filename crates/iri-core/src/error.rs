use thiserror::Error;

/// A type alias for handling `Result`s with `ParseError`
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while parsing or resolving an IRI reference
///
/// The parser surfaces the first error it encounters and terminates; there is
/// no local recovery. Every variant carries enough context to point at the
/// offending character or component.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No scheme found while an absolute IRI was expected
    #[error("no scheme found in an absolute IRI")]
    NoScheme,

    /// A path without an authority begins with "//"
    #[error("a path of an IRI without an authority cannot begin with \"//\"")]
    PathStartsWithSlashes,

    /// Character outside of the valid set for the current component
    #[error("invalid character '{0}' in IRI")]
    InvalidChar(char),

    /// Relative-path reference with a colon in its first segment
    #[error("a relative path cannot contain ':' in its first segment")]
    InvalidFirstSegmentColon,

    /// `%` not followed by two hexadecimal digits
    #[error("invalid percent-encoding \"{0}\"")]
    InvalidPercent(String),

    /// Bracketed host that is neither an IPv6 address nor an IPvFuture literal
    #[error("invalid IP literal: {0}")]
    InvalidIpLiteral(String),

    /// Malformed IPvFuture literal
    #[error("invalid IPvFuture literal: {0}")]
    InvalidIpVFuture(String),

    /// Non-digit character in the port
    #[error("invalid character '{0}' in port")]
    InvalidPort(char),

    /// Left-to-right and right-to-left characters mixed in one component
    #[error("left-to-right and right-to-left characters are mixed in {0}")]
    BidiMixed(String),

    /// Right-to-left component that does not start and end with a
    /// right-to-left character
    #[error("{0} contains right-to-left characters but does not start and end with one")]
    BidiBoundary(String),
}

/// Error raised when an IRI cannot be expressed relative to a base
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativizeError {
    /// The target path contains `.` or `..` segments
    #[error("an IRI whose path contains dot segments cannot be relativized")]
    PathWithDotSegments,
}

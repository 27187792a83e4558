//! # IRI reference types
//!
//! [`IriRef`] is any IRI reference, absolute or relative; [`Iri`] is the
//! absolute form, a thin classification layer over the same parsed layout
//! (the text plus its component boundaries). Both are generic over their
//! backing storage: `Iri<&str>` borrows the text it validated without
//! copying it, `Iri<String>` (the default) owns it.
//!
//! [`IriRef::parse`] keeps the input byte-for-byte. A handful of ASCII
//! characters common in practice (space, `<`, `>`, `"`, `{`, `}`, `|`,
//! `\`, `^`, `` ` ``) are grammatically invalid but can be accepted and
//! percent-encoded by [`IriRef::parse_lenient`], which owns the rewritten
//! text.
//!
//! ## Examples
//!
//! ```rust
//! use iri_core::{Iri, IriRef};
//!
//! // Parse and validate an absolute IRI; the text is borrowed, not copied
//! let base = Iri::parse("http://example.com/a/b?q=1").unwrap();
//! assert_eq!(base.scheme(), Some("http"));
//! assert_eq!(base.authority(), Some("example.com"));
//! assert_eq!(base.path(), "/a/b");
//! assert_eq!(base.query(), Some("q=1"));
//!
//! // Resolve a relative reference against it
//! let iri = base.resolve("../c#frag").unwrap();
//! assert_eq!(iri.as_str(), "http://example.com/c#frag");
//!
//! // Relative references parse on their own
//! let reference = IriRef::parse("../c#frag").unwrap();
//! assert!(!reference.is_absolute());
//! ```

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::convert;
use crate::error::{ParseError, RelativizeError, Result};
use crate::normalize;
use crate::parser;
use crate::parser::chars;
use crate::parser::sink::{Sink, VoidSink};
use crate::relativize;
use crate::resolve::Base;
use crate::types::Positions;

/// An IRI reference: an absolute IRI or a relative reference.
///
/// Generic over its backing storage: anything that derefs to `str`, most
/// usefully `&str` (borrowed, zero-copy) or `String` (owned, the default).
/// Immutable once constructed; every derived operation builds a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IriRef<T: Deref<Target = str> = String> {
    iri: T,
    positions: Positions,
}

/// An absolute IRI (a reference that carries a scheme).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iri<T: Deref<Target = str> = String>(IriRef<T>);

impl<T: Deref<Target = str>> IriRef<T> {
    /// Parses and validates an IRI reference, keeping `iri` as the backing
    /// storage.
    ///
    /// The text is stored byte-for-byte; ASCII input validates without any
    /// allocation. Inputs carrying lax ASCII characters parse to a
    /// rewritten text that this constructor cannot store, so they are
    /// rejected here; use [`IriRef::parse_lenient`] to accept and re-encode
    /// them.
    ///
    /// ```rust
    /// use iri_core::IriRef;
    ///
    /// IriRef::parse("http://example.com/résumé").unwrap();
    /// IriRef::parse("//example.com/path").unwrap();
    /// IriRef::parse("a/b/c?q").unwrap();
    /// assert!(IriRef::parse("http://example.com/a b").is_err());
    /// assert!(IriRef::parse("http://example.com/\u{7F}").is_err());
    /// ```
    pub fn parse(iri: T) -> Result<Self> {
        // ASCII text cannot trip the bidi rules, so it validates on the
        // void sink without allocating; anything else runs against a
        // scratch buffer the bidi checks can inspect
        let (positions, output_len) = if iri.is_ascii() {
            let mut output = VoidSink::default();
            let positions = parser::parse_parts(&iri, None, false, &mut output)?;
            (positions, output.len())
        } else {
            let mut output = String::with_capacity(iri.len());
            let positions = parser::parse_parts(&iri, None, false, &mut output)?;
            (positions, output.len())
        };
        if output_len != iri.len() {
            // A lax character was percent-encoded, so the parse output is
            // not the text we would store
            if let Some(c) = iri.chars().find(|c| chars::is_lax_ascii(*c)) {
                return Err(ParseError::InvalidChar(c));
            }
        }
        Ok(Self { iri, positions })
    }

    /// Parses without character-class and bidi validation, keeping `iri` as
    /// the backing storage. The shape of escape triples is still enforced.
    pub fn parse_unchecked(iri: T) -> Result<Self> {
        let positions = parser::parse_parts(&iri, None, true, &mut VoidSink::default())?;
        Ok(Self { iri, positions })
    }

    /// The underlying text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.iri
    }

    /// Consumes the reference and returns its backing storage.
    #[inline]
    pub fn into_inner(self) -> T {
        self.iri
    }

    /// The component boundaries of the text.
    #[inline]
    pub fn positions(&self) -> Positions {
        self.positions
    }

    /// Whether the reference carries a scheme.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.positions.scheme_end > 0
    }

    /// The scheme, without its trailing `:`.
    pub fn scheme(&self) -> Option<&str> {
        if self.positions.scheme_end > 0 {
            Some(&self.iri[..self.positions.scheme_end - 1])
        } else {
            None
        }
    }

    /// The authority, without its leading `//`.
    pub fn authority(&self) -> Option<&str> {
        let p = &self.positions;
        if p.authority_end > p.scheme_end && self.iri[p.scheme_end..].starts_with("//") {
            Some(&self.iri[p.scheme_end + 2..p.authority_end])
        } else {
            None
        }
    }

    /// The path. May be empty.
    pub fn path(&self) -> &str {
        &self.iri[self.positions.authority_end..self.positions.path_end]
    }

    /// The query, without its leading `?`.
    pub fn query(&self) -> Option<&str> {
        let p = &self.positions;
        if p.query_end > p.path_end {
            Some(&self.iri[p.path_end + 1..p.query_end])
        } else {
            None
        }
    }

    /// The fragment, without its leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        let p = &self.positions;
        if p.query_end < self.iri.len() {
            Some(&self.iri[p.query_end + 1..])
        } else {
            None
        }
    }

    /// Applies syntax-based normalization (RFC 3986 section 6.2): case
    /// folding, IDNA host canonicalization, default-port elision,
    /// percent-encoding normalization, dot-segment removal and NFC.
    ///
    /// ```rust
    /// use iri_core::Iri;
    ///
    /// let iri = Iri::parse("HTTP://Example.COM:80/a/../b").unwrap();
    /// assert_eq!(iri.normalize().as_str(), "http://example.com/b");
    /// ```
    pub fn normalize(&self) -> IriRef<String> {
        match normalize::normalize_parsed(&self.iri, &self.positions) {
            Ok((iri, positions)) => IriRef { iri, positions },
            // The re-parse of our own recomposition cannot fail; keep the
            // input if it ever does
            Err(_) => IriRef {
                iri: self.as_str().to_owned(),
                positions: self.positions,
            },
        }
    }

    /// Maps the reference to an ASCII-only URI: NFC, percent-encoding of
    /// non-ASCII characters and IDNA ToASCII on the host.
    ///
    /// ```rust
    /// use iri_core::IriRef;
    ///
    /// let iri = IriRef::parse("http://example.com/r\u{e9}sum\u{e9}").unwrap();
    /// assert_eq!(iri.to_uri(), "http://example.com/r%C3%A9sum%C3%A9");
    /// ```
    pub fn to_uri(&self) -> String {
        convert::to_uri(&self.iri, &self.positions)
    }
}

impl IriRef<String> {
    /// Parses like [`IriRef::parse`] but accepts the lax ASCII set,
    /// percent-encoding it with uppercase hex; the stored text is the
    /// rewritten form.
    ///
    /// ```rust
    /// use iri_core::IriRef;
    ///
    /// let iri = IriRef::parse_lenient("http://example.com/a b").unwrap();
    /// assert_eq!(iri.as_str(), "http://example.com/a%20b");
    /// ```
    pub fn parse_lenient(iri: impl Into<String>) -> Result<Self> {
        let iri = iri.into();
        let mut output = String::with_capacity(iri.len());
        let positions = parser::parse_parts(&iri, None, false, &mut output)?;
        // The output echoes the input unless lax characters were re-encoded
        let iri = if output == iri { iri } else { output };
        Ok(Self { iri, positions })
    }

    /// The reverse of [`IriRef::to_uri`]: decodes the escape triples that
    /// form valid non-ASCII UTF-8 free of bidi controls, leaves the rest
    /// untouched, and parses the result.
    pub fn from_uri(uri: &str) -> Result<Self> {
        Self::parse_lenient(convert::uri_to_iri(uri))
    }
}

impl<T: Deref<Target = str>> Iri<T> {
    /// Parses and validates an absolute IRI, keeping `iri` as the backing
    /// storage.
    ///
    /// ```rust
    /// use iri_core::{Iri, ParseError};
    ///
    /// Iri::parse("http://example.com/").unwrap();
    /// assert_eq!(Iri::parse("/relative"), Err(ParseError::NoScheme));
    /// ```
    pub fn parse(iri: T) -> Result<Self> {
        IriRef::parse(iri)?.try_into()
    }

    /// Parses an absolute IRI without character-class and bidi validation.
    pub fn parse_unchecked(iri: T) -> Result<Self> {
        IriRef::parse_unchecked(iri)?.try_into()
    }

    /// Consumes the IRI and returns its backing storage.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0.into_inner()
    }

    /// Resolves `reference` against this IRI per the RFC 3986 section 5.2
    /// algorithm.
    ///
    /// ```rust
    /// use iri_core::Iri;
    ///
    /// let base = Iri::parse("http://a/b/c/d;p?q").unwrap();
    /// assert_eq!(base.resolve("../../../g").unwrap().as_str(), "http://a/g");
    /// ```
    pub fn resolve(&self, reference: &str) -> Result<Iri<String>> {
        let mut output = String::with_capacity(self.as_str().len() + reference.len());
        let positions = parser::parse_parts(reference, Some(self.base()), false, &mut output)?;
        Ok(Iri(IriRef {
            iri: output,
            positions,
        }))
    }

    /// Like [`Iri::resolve`], without character-class and bidi validation
    /// of the reference.
    pub fn resolve_unchecked(&self, reference: &str) -> Result<Iri<String>> {
        let mut output = String::with_capacity(self.as_str().len() + reference.len());
        let positions = parser::parse_parts(reference, Some(self.base()), true, &mut output)?;
        Ok(Iri(IriRef {
            iri: output,
            positions,
        }))
    }

    /// Resolves `reference` into a caller-provided sink, avoiding the
    /// intermediate allocation. The sink is cleared first. A `&mut String`
    /// keeps the resolved text; a [`VoidSink`] validates the resolution
    /// without allocating at all.
    ///
    /// ```rust
    /// use iri_core::{Iri, Sink, VoidSink};
    ///
    /// let base = Iri::parse("http://a/b/c").unwrap();
    /// let mut sink = VoidSink::default();
    /// let positions = base.resolve_into("../g", &mut sink).unwrap();
    /// assert_eq!(positions.path_end, sink.len());
    /// ```
    pub fn resolve_into<O: Sink>(&self, reference: &str, output: &mut O) -> Result<Positions> {
        output.clear();
        output.reserve(self.as_str().len() + reference.len());
        parser::parse_parts(reference, Some(self.base()), false, output)
    }

    /// Expresses `target` relative to this IRI. Resolving the result against
    /// this IRI yields `target` again.
    ///
    /// ```rust
    /// use iri_core::Iri;
    ///
    /// let base = Iri::parse("http://a/b/c/d;p").unwrap();
    /// let target = Iri::parse("http://a/b/g").unwrap();
    /// assert_eq!(base.relativize(&target).unwrap().as_str(), "../g");
    /// ```
    pub fn relativize<U: Deref<Target = str>>(
        &self,
        target: &Iri<U>,
    ) -> std::result::Result<IriRef<String>, RelativizeError> {
        let (iri, positions) = relativize::relativize(
            self.as_str(),
            &self.0.positions,
            target.as_str(),
            &target.0.positions,
        )?;
        Ok(IriRef { iri, positions })
    }

    /// Applies syntax-based normalization, keeping the absolute
    /// classification.
    pub fn normalize(&self) -> Iri<String> {
        Iri(self.0.normalize())
    }

    fn base(&self) -> Base<'_> {
        Base {
            text: self.as_str(),
            positions: self.0.positions,
        }
    }
}

impl Iri<String> {
    /// Parses like [`Iri::parse`] but accepts the lax ASCII set,
    /// percent-encoding it; the stored text is the rewritten form.
    pub fn parse_lenient(iri: impl Into<String>) -> Result<Self> {
        IriRef::parse_lenient(iri)?.try_into()
    }

    /// See [`IriRef::from_uri`].
    pub fn from_uri(uri: &str) -> Result<Self> {
        IriRef::from_uri(uri)?.try_into()
    }
}

impl<T: Deref<Target = str>> Deref for Iri<T> {
    type Target = IriRef<T>;

    #[inline]
    fn deref(&self) -> &IriRef<T> {
        &self.0
    }
}

impl<T: Deref<Target = str>> TryFrom<IriRef<T>> for Iri<T> {
    type Error = ParseError;

    fn try_from(reference: IriRef<T>) -> Result<Self> {
        if reference.is_absolute() {
            Ok(Iri(reference))
        } else {
            Err(ParseError::NoScheme)
        }
    }
}

impl<T: Deref<Target = str>> From<Iri<T>> for IriRef<T> {
    #[inline]
    fn from(iri: Iri<T>) -> IriRef<T> {
        iri.0
    }
}

impl<T: Deref<Target = str>> fmt::Display for IriRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Deref<Target = str>> fmt::Display for Iri<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IriRef<String> {
    type Err = ParseError;

    fn from_str(iri: &str) -> Result<Self> {
        Self::parse(iri.to_owned())
    }
}

impl FromStr for Iri<String> {
    type Err = ParseError;

    fn from_str(iri: &str) -> Result<Self> {
        Self::parse(iri.to_owned())
    }
}

impl<T: Deref<Target = str>> AsRef<str> for IriRef<T> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T: Deref<Target = str>> AsRef<str> for Iri<T> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// References serialize as their text and deserialize by parsing it
impl<T: Deref<Target = str>> Serialize for IriRef<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<T: Deref<Target = str>> Serialize for Iri<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IriRef<String> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let iri = String::deserialize(deserializer)?;
        Self::parse(iri).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Iri<String> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let iri = String::deserialize(deserializer)?;
        Self::parse(iri).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_accessors() {
        let iri = IriRef::parse("http://user@example.com:81/a/b?q=1#frag").unwrap();
        assert_eq!(iri.scheme(), Some("http"));
        assert_eq!(iri.authority(), Some("user@example.com:81"));
        assert_eq!(iri.path(), "/a/b");
        assert_eq!(iri.query(), Some("q=1"));
        assert_eq!(iri.fragment(), Some("frag"));

        let iri = IriRef::parse("a/b").unwrap();
        assert_eq!(iri.scheme(), None);
        assert_eq!(iri.authority(), None);
        assert_eq!(iri.path(), "a/b");
        assert_eq!(iri.query(), None);
        assert_eq!(iri.fragment(), None);
    }

    #[test]
    fn test_borrowed_storage_is_zero_copy() {
        let text = String::from("http://example.com/a");
        let iri: Iri<&str> = Iri::parse(text.as_str()).unwrap();
        // The parsed reference points into the caller's buffer
        assert!(std::ptr::eq(iri.as_str(), text.as_str()));
        let inner: &str = iri.into_inner();
        assert_eq!(inner, text);
    }

    #[test]
    fn test_lax_input_needs_the_owned_parse() {
        assert_eq!(
            IriRef::parse("http://example.com/a b"),
            Err(ParseError::InvalidChar(' '))
        );
        let iri = IriRef::parse_lenient("http://example.com/a b").unwrap();
        assert_eq!(iri.as_str(), "http://example.com/a%20b");
    }

    #[test]
    fn test_empty_but_present_components() {
        let iri = IriRef::parse("http://example.com/?#").unwrap();
        assert_eq!(iri.query(), Some(""));
        assert_eq!(iri.fragment(), Some(""));
    }

    #[test]
    fn test_absolute_classification() {
        assert!(Iri::parse("x:").is_ok());
        assert_eq!(Iri::parse("x"), Err(ParseError::NoScheme));
        assert_eq!(Iri::parse(":x"), Err(ParseError::NoScheme));
        let reference = IriRef::parse("http://example.com").unwrap();
        assert!(Iri::try_from(reference).is_ok());
    }

    #[test]
    fn test_display_and_from_str() {
        let iri: Iri = "http://example.com/a".parse().unwrap();
        assert_eq!(iri.to_string(), "http://example.com/a");
        let reference: IriRef = "a/b#c".parse().unwrap();
        assert_eq!(reference.to_string(), "a/b#c");
    }
}

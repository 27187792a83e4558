//! # iri-core
//!
//! Validating parser and resolver for Internationalized Resource
//! Identifiers (IRIs) following [RFC 3987](https://www.ietf.org/rfc/rfc3987),
//! with the reference-resolution semantics of
//! [RFC 3986](https://www.ietf.org/rfc/rfc3986).
//!
//! The crate is structured around the following pieces:
//!
//! - **Reference types**: [`Iri`] (absolute) and [`IriRef`] (absolute or
//!   relative), each an immutable text plus the byte offsets of its
//!   component boundaries ([`Positions`]); both are generic over their
//!   storage, so `Iri<&str>` validates without copying and `Iri<String>`
//!   owns its text
//! - **Parsing**: a single-pass state machine that validates every
//!   component's alphabet (escape triples included) while tracking
//!   component boundaries; an unchecked mode skips the character-class and
//!   bidi checks
//! - **Resolution**: the RFC 3986 section 5.2 transform, including
//!   `remove_dot_segments` and path merging, with a zero-copy variant
//!   writing into a caller-supplied [`Sink`] (a `String`, or a [`VoidSink`]
//!   for allocation-free validation)
//! - **Normalization**: syntax-based normalization (case folding, IDNA host
//!   canonicalization, default-port elision, percent-encoding
//!   normalization, NFC)
//! - **Relativization**: the inverse of resolution
//! - **URI conversion**: mapping to and from ASCII-only URIs
//!
//! ## Getting started
//!
//! ```rust
//! use iri_core::Iri;
//!
//! // Parse and validate a base IRI
//! let base = Iri::parse("http://foo.com/bar/baz").unwrap();
//!
//! // Validate and resolve a relative IRI
//! let iri = base.resolve("bat#foo").unwrap();
//! assert_eq!(iri.as_str(), "http://foo.com/bar/bat#foo");
//!
//! // Normalize
//! let canonical = Iri::parse("HTTP://Example.COM:80/%7Eb").unwrap().normalize();
//! assert_eq!(canonical.as_str(), "http://example.com/~b");
//!
//! // Relativize
//! let target = Iri::parse("http://foo.com/bar/qux").unwrap();
//! assert_eq!(base.relativize(&target).unwrap().as_str(), "qux");
//! ```
//!
//! Parsed references are immutable and share no mutable state; distinct
//! parse calls may run concurrently without synchronization.

// Declare modules
pub mod error;
mod convert;
mod normalize;
mod parser;
mod relativize;
mod resolve;
pub mod types;

// Re-export key public items
pub use error::{ParseError, RelativizeError, Result};
pub use parser::sink::{Sink, VoidSink};
pub use types::{Iri, IriRef, Positions};

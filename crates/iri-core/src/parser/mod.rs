//! IRI reference parsing.
//!
//! The state machine in [`machine`] drives a standalone parse; a parse
//! against a base IRI goes through the resolver instead, which sub-parses
//! the reference and applies the RFC 3986 section 5.2 transform.

pub(crate) mod authority;
pub(crate) mod bidi;
pub(crate) mod chars;
pub(crate) mod cursor;
pub(crate) mod host;
pub(crate) mod machine;
pub(crate) mod percent;
pub(crate) mod sink;

use crate::error::Result;
use crate::resolve::{self, Base};
use crate::types::Positions;

use machine::IriMachine;
use sink::Sink;

/// Parses `input`, optionally resolving it against `base`, writing the
/// outcome into `output` and returning the component boundaries.
pub(crate) fn parse_parts<O: Sink>(
    input: &str,
    base: Option<Base<'_>>,
    unchecked: bool,
    output: &mut O,
) -> Result<Positions> {
    match base {
        Some(base) => resolve::resolve(input, base, unchecked, output),
        None => IriMachine::parse(input, unchecked, output),
    }
}

//! Public value types.

pub mod iri;
pub mod positions;

pub use iri::{Iri, IriRef};
pub use positions::Positions;

pub(crate) use positions::Components;

//! In-memory structure data: atoms, bond intents, lone pairs, colors, and
//! the structure document that groups atoms into models.

mod atom;
mod color;
pub mod document;

pub use atom::{Atom, BondRef, BondType, DEFAULT_ATOM_RADIUS};
pub use color::Rgb;
pub use document::StructureDocument;

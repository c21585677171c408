//! Core data model types for edgetree

mod edge;
mod symbol;

pub use edge::EdgePair;
pub use symbol::SymbolRange;

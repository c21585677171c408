//! # edgetree
//!
//! A streaming edge-list consumer that builds an ordered binary tree and
//! renders it as an S-expression.
//!
//! Input is a stream of `(P,C) ` tokens, each naming a parent and a child
//! symbol. Edges are inserted as they arrive; the tree can be validated and
//! serialized at any point.
//!
//! ## Errors
//!
//! | Code | Meaning | Raised by |
//! |------|---------|-----------|
//! | E1 | malformed token or out-of-range symbol | `consume` |
//! | E2 | duplicate edge | `consume` |
//! | E3 | a node with more than two children | `snapshot` |
//! | E4 | more than one root | `snapshot` |
//! | E5 | no root, a cycle, or an unreachable component | `snapshot` |
//!
//! ## Example
//!
//! ```
//! use edgetree::TreeAssembler;
//!
//! let tree = TreeAssembler::new();
//! tree.consume_str("(A,B) (A,C) (B,D)").unwrap();
//! assert_eq!(tree.snapshot().unwrap(), "(A(B(D))(C))");
//! ```

pub mod config;
pub mod generate;
pub mod graph;
pub mod model;
pub mod table;
pub mod token;

mod assembler;
mod error;

pub use assembler::TreeAssembler;
pub use config::Config;
pub use error::{Error, Result};
pub use model::{EdgePair, SymbolRange};
pub use table::{ChildCount, Node, NodeId, NodeTable};

//! Node storage for the assembled tree

mod node;
mod node_table;

pub use node::{ChildCount, Node, NodeId};
pub use node_table::NodeTable;

//! Whole-tree operations over a [`NodeTable`](crate::table::NodeTable)

mod traversal;

pub use traversal::{find_root, render, render_table, Rendered};

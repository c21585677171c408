//! High-level tree assembly API
//!
//! [`TreeAssembler`] is the entry point: feed it edge streams with
//! [`consume`](TreeAssembler::consume) and read the current tree back with
//! [`snapshot`](TreeAssembler::snapshot).

use crate::config::Config;
use crate::graph::render_table;
use crate::model::{EdgePair, SymbolRange};
use crate::table::{ChildCount, NodeTable};
use crate::token::EdgeTokens;
use crate::{Error, Result};
use parking_lot::Mutex;
use std::io::Read;
use tracing::{debug, trace, warn};

/// Builds an ordered binary tree from streamed `(P,C)` edges
///
/// `consume` may run on several threads at once against the same assembler,
/// each with its own source. Parsing happens outside the lock; only node
/// creation, insertion and the overflow latch are serialized. `snapshot`
/// holds the same lock for its whole scan, so it always sees a consistent
/// table.
pub struct TreeAssembler {
    range: SymbolRange,
    state: Mutex<TreeState>,
}

/// Everything guarded by the assembler's lock
struct TreeState {
    table: NodeTable,
    /// Set once any node is offered a third distinct child; never cleared
    too_many_children: bool,
}

impl TreeAssembler {
    /// Create an assembler over the default `A..=Z` range
    pub fn new() -> Self {
        Self::with_range(SymbolRange::default())
    }

    /// Create an assembler over a custom symbol range
    pub fn with_range(range: SymbolRange) -> Self {
        TreeAssembler {
            range,
            state: Mutex::new(TreeState {
                table: NodeTable::new(range),
                too_many_children: false,
            }),
        }
    }

    /// Create an assembler using the symbol range from a config
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_range(config.symbol_range()?))
    }

    // === Ingestion ===

    /// Read edges from `source` until it ends, inserting each one
    ///
    /// Stops at the first malformed token (E1) or duplicate edge (E2).
    /// Edges applied before the failure stay in the tree. Returns the number
    /// of edges applied by this call.
    pub fn consume<R: Read>(&self, source: R) -> Result<usize> {
        let mut applied = 0;
        for edge in EdgeTokens::new(source, self.range) {
            let edge = edge?;
            self.insert(edge)?;
            applied += 1;
        }
        debug!(applied, "consumed edge stream");
        Ok(applied)
    }

    /// Convenience wrapper over [`consume`](Self::consume) for in-memory text
    pub fn consume_str(&self, text: &str) -> Result<usize> {
        self.consume(text.as_bytes())
    }

    /// Apply a single decoded edge
    ///
    /// A third distinct child is not an error here; it sets the overflow
    /// latch, which `snapshot` reports as E3.
    pub fn insert(&self, edge: EdgePair) -> Result<ChildCount> {
        if !self.range.contains(edge.parent) || !self.range.contains(edge.child) {
            return Err(Error::format(format!(
                "edge {} outside {}",
                edge, self.range
            )));
        }

        let mut state = self.state.lock();
        let parent = state.table.get_or_create(edge.parent)?;
        let child = state.table.get_or_create(edge.child)?;
        let count = state.table.add_child(parent, child)?;
        trace!(%edge, children = count.as_u8(), "inserted edge");

        if count == ChildCount::Overflow && !state.too_many_children {
            warn!(parent = %edge.parent, child = %edge.child, "node offered a third child");
            state.too_many_children = true;
        }
        Ok(count)
    }

    // === Rendering ===

    /// Validate the tree and render it as an S-expression
    ///
    /// Reports, in order of precedence: a node with too many children (E3),
    /// several roots (E4), no root or a cycle (E5). An empty assembler
    /// renders as an empty string.
    pub fn snapshot(&self) -> Result<String> {
        let mut state = self.state.lock();
        if state.too_many_children {
            return Err(Error::OverCapacity);
        }
        let result = render_table(&mut state.table);
        match &result {
            Ok(text) => debug!(nodes = state.table.len(), len = text.len(), "rendered snapshot"),
            Err(e) => debug!(error = %e, "snapshot rejected"),
        }
        result
    }

    /// Number of distinct symbols seen so far
    pub fn node_count(&self) -> usize {
        self.state.lock().table.len()
    }

    /// True once any node has been offered a third distinct child
    pub fn has_overflow(&self) -> bool {
        self.state.lock().too_many_children
    }
}

impl Default for TreeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

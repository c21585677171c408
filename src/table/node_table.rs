//! Dense node arena addressed by symbol

use super::{ChildCount, Node, NodeId};
use crate::model::SymbolRange;
use crate::{Error, Result};

/// Owns every node of one tree, one slot per symbol in the range
///
/// Slots start empty and are filled lazily the first time a symbol is seen
/// on either side of an edge. Nodes are never removed individually; the
/// whole table is cleared or dropped.
pub struct NodeTable {
    range: SymbolRange,
    slots: Vec<Option<Node>>,
    len: usize,
}

impl NodeTable {
    /// Create an empty table sized for the range
    pub fn new(range: SymbolRange) -> Self {
        let mut slots = Vec::with_capacity(range.width());
        slots.resize_with(range.width(), || None);
        NodeTable {
            range,
            slots,
            len: 0,
        }
    }

    /// Number of nodes created so far
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the node for a symbol, creating it if needed
    ///
    /// Only fails for symbols outside the table's range.
    pub fn get_or_create(&mut self, symbol: char) -> Result<NodeId> {
        let index = self.range.index(symbol).ok_or_else(|| {
            Error::format(format!("symbol {:?} outside {}", symbol, self.range))
        })?;
        let slot = &mut self.slots[index];
        if slot.is_none() {
            *slot = Some(Node::new(symbol));
            self.len += 1;
        }
        Ok(NodeId(index))
    }

    /// Look up an existing node by symbol
    pub fn lookup(&self, symbol: char) -> Option<NodeId> {
        let index = self.range.index(symbol)?;
        self.slots[index].as_ref().map(|_| NodeId(index))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn value_of(&self, id: NodeId) -> Result<char> {
        self.get(id).map(Node::value).ok_or(Error::InvalidNode(id.0))
    }

    /// Attach `child` under `parent`, keeping children ordered by symbol
    ///
    /// The child is marked as parented before any duplicate check, so a
    /// rejected insertion still counts for root detection. A third distinct
    /// child is not stored; the caller decides what to do with
    /// [`ChildCount::Overflow`]. Ids not issued by this table are rejected
    /// with [`Error::InvalidNode`] before anything changes.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<ChildCount> {
        let parent_value = self.value_of(parent)?;
        let child_value = self.value_of(child)?;
        let duplicate = Error::DuplicateEdge {
            parent: parent_value,
            child: child_value,
        };

        if let Some(node) = self.get_mut(child) {
            node.has_parent = true;
        }

        let (lesser, greater) = self
            .get(parent)
            .map(|node| (node.lesser, node.greater))
            .ok_or(Error::InvalidNode(parent.0))?;

        let (lesser, greater, count) = match (lesser, greater) {
            (None, _) => (Some(child), None, ChildCount::One),
            (Some(existing), None) => {
                let existing_value = self.value_of(existing)?;
                if existing_value == child_value {
                    return Err(duplicate);
                }
                if existing_value < child_value {
                    (Some(existing), Some(child), ChildCount::Two)
                } else {
                    (Some(child), Some(existing), ChildCount::Two)
                }
            }
            (Some(first), Some(second)) => {
                let full = [self.value_of(first)?, self.value_of(second)?];
                if full.contains(&child_value) {
                    return Err(duplicate);
                }
                return Ok(ChildCount::Overflow);
            }
        };

        if let Some(node) = self.get_mut(parent) {
            node.lesser = lesser;
            node.greater = greater;
        }
        Ok(count)
    }

    /// Iterate over existing nodes in symbol order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|node| (NodeId(i), node)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Node)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|node| (NodeId(i), node)))
    }

    /// Drop every node, keeping the allocation
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> NodeTable {
        NodeTable::new(SymbolRange::default())
    }

    fn edge(table: &mut NodeTable, parent: char, child: char) -> Result<ChildCount> {
        let p = table.get_or_create(parent)?;
        let c = table.get_or_create(child)?;
        table.add_child(p, c)
    }

    fn children(table: &NodeTable, symbol: char) -> (Option<char>, Option<char>) {
        let node = table.get(table.lookup(symbol).unwrap()).unwrap();
        let value = |id: Option<NodeId>| id.map(|id| table.get(id).unwrap().value());
        (value(node.lesser()), value(node.greater()))
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut table = table();
        let a1 = table.get_or_create('A').unwrap();
        let a2 = table.get_or_create('A').unwrap();
        assert_eq!(a1, a2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(a1).unwrap().value(), 'A');
    }

    #[test]
    fn test_get_or_create_out_of_range() {
        let mut table = table();
        let err = table.get_or_create('a').unwrap_err();
        assert_eq!(err.code(), Some(1));
        assert!(table.is_empty());
    }

    #[test]
    fn test_children_are_ordered() {
        let mut table = table();
        assert_eq!(edge(&mut table, 'M', 'T').unwrap(), ChildCount::One);
        assert_eq!(edge(&mut table, 'M', 'C').unwrap(), ChildCount::Two);
        assert_eq!(children(&table, 'M'), (Some('C'), Some('T')));

        assert_eq!(edge(&mut table, 'A', 'B').unwrap(), ChildCount::One);
        assert_eq!(edge(&mut table, 'A', 'D').unwrap(), ChildCount::Two);
        assert_eq!(children(&table, 'A'), (Some('B'), Some('D')));
    }

    #[test]
    fn test_duplicate_with_one_child() {
        let mut table = table();
        edge(&mut table, 'A', 'B').unwrap();
        let err = edge(&mut table, 'A', 'B').unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateEdge {
                parent: 'A',
                child: 'B'
            }
        ));
        assert_eq!(children(&table, 'A'), (Some('B'), None));
    }

    #[test]
    fn test_duplicate_when_full() {
        let mut table = table();
        edge(&mut table, 'A', 'B').unwrap();
        edge(&mut table, 'A', 'C').unwrap();
        assert_eq!(edge(&mut table, 'A', 'C').unwrap_err().code(), Some(2));
        assert_eq!(edge(&mut table, 'A', 'B').unwrap_err().code(), Some(2));
    }

    #[test]
    fn test_third_child_overflows_without_storing() {
        let mut table = table();
        edge(&mut table, 'A', 'B').unwrap();
        edge(&mut table, 'A', 'C').unwrap();
        assert_eq!(edge(&mut table, 'A', 'D').unwrap(), ChildCount::Overflow);
        assert_eq!(children(&table, 'A'), (Some('B'), Some('C')));
        // the dropped child is still marked as parented
        let d = table.lookup('D').unwrap();
        assert!(table.get(d).unwrap().has_parent());
    }

    #[test]
    fn test_has_parent_set_even_on_duplicate() {
        let mut table = table();
        edge(&mut table, 'A', 'B').unwrap();
        let _ = edge(&mut table, 'A', 'B');
        let a = table.lookup('A').unwrap();
        let b = table.lookup('B').unwrap();
        assert!(!table.get(a).unwrap().has_parent());
        assert!(table.get(b).unwrap().has_parent());
    }

    #[test]
    fn test_self_edge_is_stored() {
        let mut table = table();
        assert_eq!(edge(&mut table, 'A', 'A').unwrap(), ChildCount::One);
        assert_eq!(children(&table, 'A'), (Some('A'), None));
    }

    #[test]
    fn test_foreign_id_is_rejected_without_changes() {
        let mut wide = NodeTable::new(SymbolRange::new('A', 'z').unwrap());
        let foreign = wide.get_or_create('q').unwrap();

        let mut table = table();
        let a = table.get_or_create('A').unwrap();
        let err = table.add_child(a, foreign).unwrap_err();
        assert!(matches!(err, Error::InvalidNode(_)));
        assert_eq!(err.code(), None);

        let err = table.add_child(foreign, a).unwrap_err();
        assert!(matches!(err, Error::InvalidNode(_)));
        assert!(!table.get(a).unwrap().has_parent());
        assert_eq!(children(&table, 'A'), (None, None));
    }

    #[test]
    fn test_iter_in_symbol_order_and_clear() {
        let mut table = table();
        edge(&mut table, 'Q', 'B').unwrap();
        edge(&mut table, 'Q', 'Z').unwrap();
        let symbols: Vec<char> = table.iter().map(|(_, n)| n.value()).collect();
        assert_eq!(symbols, vec!['B', 'Q', 'Z']);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        assert!(table.lookup('Q').is_none());
    }
}

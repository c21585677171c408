//! Tree node types

/// Index of a node inside a [`NodeTable`](super::NodeTable)
///
/// This is the symbol's slot, so ids are stable for the life of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Number of children a node holds after an insertion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildCount {
    One,
    Two,
    /// A third distinct child was offered and dropped
    Overflow,
}

impl ChildCount {
    pub fn as_u8(&self) -> u8 {
        match self {
            ChildCount::One => 1,
            ChildCount::Two => 2,
            ChildCount::Overflow => 3,
        }
    }
}

/// A node in the assembled tree
///
/// Children are kept ordered: when both are present, `lesser` names the
/// child with the smaller symbol.
#[derive(Clone, Debug)]
pub struct Node {
    value: char,
    pub(crate) lesser: Option<NodeId>,
    pub(crate) greater: Option<NodeId>,
    pub(crate) has_parent: bool,
    pub(crate) explored: bool,
}

impl Node {
    /// Create a node with no children and no parent
    pub fn new(value: char) -> Self {
        Node {
            value,
            lesser: None,
            greater: None,
            has_parent: false,
            explored: false,
        }
    }

    pub fn value(&self) -> char {
        self.value
    }

    pub fn lesser(&self) -> Option<NodeId> {
        self.lesser
    }

    pub fn greater(&self) -> Option<NodeId> {
        self.greater
    }

    /// True once this node has been added as anyone's child
    pub fn has_parent(&self) -> bool {
        self.has_parent
    }

    /// Set the explored marker, returning its previous value
    pub(crate) fn mark_explored(&mut self, explored: bool) -> bool {
        std::mem::replace(&mut self.explored, explored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_empty() {
        let node = Node::new('A');
        assert_eq!(node.value(), 'A');
        assert!(!node.has_parent());
        assert!(node.lesser().is_none());
        assert!(node.greater().is_none());
    }

    #[test]
    fn test_mark_explored_returns_previous() {
        let mut node = Node::new('A');
        assert!(!node.mark_explored(true));
        assert!(node.mark_explored(true));
        assert!(node.mark_explored(false));
    }

    #[test]
    fn test_child_count_codes() {
        assert_eq!(ChildCount::One.as_u8(), 1);
        assert_eq!(ChildCount::Two.as_u8(), 2);
        assert_eq!(ChildCount::Overflow.as_u8(), 3);
    }
}

//! Root discovery and S-expression rendering
//!
//! Both passes are iterative. Symbol ranges can be large enough that a
//! degenerate tree (a long chain) would overflow the call stack under
//! recursive descent.

use crate::table::{NodeId, NodeTable};
use crate::{Error, Result};
use tracing::trace;

/// One pending step of the depth-first walk
#[derive(Clone, Copy, Debug)]
enum Step {
    /// Visit a node and schedule its children
    Enter(NodeId),
    /// Close the bracket of a node whose children are done
    Close,
}

/// Output of a successful walk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    /// Nested parenthesized form of the tree
    pub text: String,
    /// Number of distinct nodes visited
    pub visited: usize,
}

/// Reset every explored marker and locate the single parentless node
///
/// Returns `Ok(None)` only for an empty table.
pub fn find_root(table: &mut NodeTable) -> Result<Option<NodeId>> {
    let mut root = None;
    for (id, node) in table.iter_mut() {
        node.mark_explored(false);
        if !node.has_parent() {
            if root.is_some() {
                return Err(Error::MultipleRoots);
            }
            root = Some(id);
        }
    }

    match root {
        None if !table.is_empty() => Err(Error::NoRootOrCycle),
        other => Ok(other),
    }
}

/// Depth-first, pre-order walk from `root`, lesser child first
///
/// Reaching an already explored node means the structure is cyclic.
/// Explored markers must have been cleared by [`find_root`] beforehand.
pub fn render(table: &mut NodeTable, root: NodeId) -> Result<Rendered> {
    let mut text = String::with_capacity(table.len() * 3);
    let mut visited = 0;
    let mut stack = vec![Step::Enter(root)];

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Close => {
                text.push(')');
                continue;
            }
            Step::Enter(id) => id,
        };

        let node = table.get_mut(id).ok_or(Error::NoRootOrCycle)?;
        if node.mark_explored(true) {
            trace!(symbol = %node.value(), "revisited node");
            return Err(Error::NoRootOrCycle);
        }
        visited += 1;
        text.push('(');
        text.push(node.value());

        stack.push(Step::Close);
        if let Some(greater) = node.greater() {
            stack.push(Step::Enter(greater));
        }
        if let Some(lesser) = node.lesser() {
            stack.push(Step::Enter(lesser));
        }
    }

    Ok(Rendered { text, visited })
}

/// Check global shape and serialize the whole table
///
/// Applies the structural checks in precedence order: multiple roots (E4),
/// then missing root, cycle, or unreachable component (E5).
pub fn render_table(table: &mut NodeTable) -> Result<String> {
    let root = match find_root(table)? {
        Some(root) => root,
        None => return Ok(String::new()),
    };

    let rendered = render(table, root)?;
    if rendered.visited < table.len() {
        return Err(Error::NoRootOrCycle);
    }
    Ok(rendered.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolRange;

    fn build(edges: &[(char, char)]) -> NodeTable {
        let mut table = NodeTable::new(SymbolRange::default());
        for &(p, c) in edges {
            let p = table.get_or_create(p).unwrap();
            let c = table.get_or_create(c).unwrap();
            table.add_child(p, c).unwrap();
        }
        table
    }

    #[test]
    fn test_empty_table_renders_empty() {
        let mut table = NodeTable::new(SymbolRange::default());
        assert_eq!(render_table(&mut table).unwrap(), "");
    }

    #[test]
    fn test_single_edge() {
        let mut table = build(&[('A', 'B')]);
        assert_eq!(render_table(&mut table).unwrap(), "(A(B))");
    }

    #[test]
    fn test_lesser_before_greater() {
        let mut table = build(&[('B', 'D'), ('D', 'E'), ('B', 'A'), ('A', 'C')]);
        assert_eq!(render_table(&mut table).unwrap(), "(B(A(C))(D(E)))");
    }

    #[test]
    fn test_find_root_multiple() {
        let mut table = build(&[('A', 'B'), ('C', 'D')]);
        assert!(matches!(find_root(&mut table), Err(Error::MultipleRoots)));
    }

    #[test]
    fn test_find_root_none() {
        let mut table = build(&[('A', 'B'), ('B', 'A')]);
        assert!(matches!(find_root(&mut table), Err(Error::NoRootOrCycle)));
    }

    #[test]
    fn test_cycle_below_root() {
        // A -> B -> C -> B: root exists but B is reached twice
        let mut table = build(&[('A', 'B'), ('B', 'C'), ('C', 'B')]);
        assert!(matches!(
            render_table(&mut table),
            Err(Error::NoRootOrCycle)
        ));
    }

    #[test]
    fn test_disconnected_cycle() {
        // A -> B is a tree; C <-> D is a rootless cycle next to it
        let mut table = build(&[('A', 'B'), ('C', 'D'), ('D', 'C')]);
        let root = find_root(&mut table).unwrap().unwrap();
        let rendered = render(&mut table, root).unwrap();
        assert_eq!(rendered.visited, 2);
        assert!(matches!(
            render_table(&mut table),
            Err(Error::NoRootOrCycle)
        ));
    }

    #[test]
    fn test_rendering_twice_is_stable() {
        let mut table = build(&[('A', 'B'), ('A', 'C'), ('B', 'D')]);
        let first = render_table(&mut table).unwrap();
        let second = render_table(&mut table).unwrap();
        assert_eq!(first, "(A(B(D))(C))");
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let range = SymbolRange::new('\u{100}', '\u{4E20}').unwrap();
        let mut table = NodeTable::new(range);
        let symbols: Vec<char> = range.symbols().collect();
        for pair in symbols.windows(2) {
            let p = table.get_or_create(pair[0]).unwrap();
            let c = table.get_or_create(pair[1]).unwrap();
            table.add_child(p, c).unwrap();
        }
        let text = render_table(&mut table).unwrap();
        assert_eq!(text.chars().filter(|&c| c == ')').count(), symbols.len());
        assert!(text.starts_with("(\u{100}(\u{101}"));
    }
}

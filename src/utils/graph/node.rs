//! Arena index for blocks stored in a graph.
//!
//! Blocks are identified externally by their [`Address`](crate::Address). Internally the
//! graph keeps them in a flat vector and refers to them by [`NodeId`], which keeps adjacency
//! lists compact and lets traversals use plain `Vec<bool>` visited sets.

use std::fmt;

/// A strongly-typed index of a block within a graph's node arena.
///
/// `NodeId` wraps a `usize` so arena positions can't be confused with postorder indices or
/// addresses, which are also plain integers underneath. IDs are handed out sequentially
/// starting from 0 as blocks are inserted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creates a new `NodeId` from a raw arena index.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_ordering() {
        let mut nodes = vec![NodeId::new(3), NodeId::new(1), NodeId::new(2)];
        nodes.sort();
        assert_eq!(nodes, vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]);
    }

    #[test]
    fn test_node_id_formatting() {
        let node = NodeId::new(42);
        assert_eq!(format!("{node:?}"), "NodeId(42)");
        assert_eq!(format!("{node}"), "n42");
        assert_eq!(node.index(), 42);
    }
}

//! Trait definitions for the arena-level graph abstraction.
//!
//! Traversal algorithms are written against these traits rather than a concrete graph type,
//! so the same postorder walk serves the control flow graph and the small fixture graphs
//! used in tests.
//!
//! - [`GraphBase`] - Node count
//! - [`Successors`] - Forward edge traversal (outgoing edges)

use crate::utils::graph::NodeId;

/// Base trait providing core graph properties.
pub trait GraphBase {
    /// Returns the number of nodes in the graph.
    ///
    /// Node IDs are dense, so every index below this count is a valid [`NodeId`].
    fn node_count(&self) -> usize;
}

/// Trait for graphs that support forward edge traversal.
///
/// # Examples
///
/// ```rust,ignore
/// use cfgdom::utils::graph::{NodeId, Successors};
///
/// let successors: Vec<NodeId> = graph.successors(NodeId::new(0)).collect();
/// ```
pub trait Successors: GraphBase {
    /// Returns an iterator over the successor nodes of the given node.
    ///
    /// For a directed edge `(u, v)`, node `v` is a successor of `u`.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid node in the graph.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // A minimal test graph implementation for trait testing
    struct TestGraph {
        node_count: usize,
        edges: Vec<(NodeId, NodeId)>,
    }

    impl GraphBase for TestGraph {
        fn node_count(&self) -> usize {
            self.node_count
        }
    }

    impl Successors for TestGraph {
        fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
            self.edges
                .iter()
                .filter(move |(src, _)| *src == node)
                .map(|(_, dst)| *dst)
        }
    }

    #[test]
    fn test_successors_filters_by_source() {
        let graph = TestGraph {
            node_count: 3,
            edges: vec![
                (NodeId::new(0), NodeId::new(1)),
                (NodeId::new(0), NodeId::new(2)),
                (NodeId::new(1), NodeId::new(2)),
            ],
        };

        assert_eq!(graph.node_count(), 3);
        let succ: Vec<NodeId> = graph.successors(NodeId::new(0)).collect();
        assert_eq!(succ, vec![NodeId::new(1), NodeId::new(2)]);
        assert_eq!(graph.successors(NodeId::new(2)).count(), 0);
    }
}

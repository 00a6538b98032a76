//! Depth-first ordering of graph nodes.
//!
//! - [`postorder`] - Nodes in the order a depth-first search finishes them
//! - [`reverse_postorder`] - The reverse of that order (entry first)
//!
//! Both functions return collected vectors since the order requires a full traversal
//! anyway. Only nodes reachable from the start node appear in the result.

use crate::utils::graph::{NodeId, Successors};

/// Computes the postorder traversal of nodes reachable from the start.
///
/// In postorder, a node is emitted after all of its depth-first descendants. The start
/// node therefore always comes last, and along any depth-first tree path the ancestor
/// sits at a higher position than its descendants. The dominator builder relies on
/// exactly that property when walking fingers up the tree.
///
/// Successors are explored in the order the graph yields them, which makes the result
/// deterministic for a given graph.
///
/// # Arguments
///
/// * `graph` - The graph to traverse
/// * `start` - The starting node for traversal
///
/// # Returns
///
/// A vector of `NodeId` in postorder, or an empty vector if `start` is out of range.
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V)
#[allow(clippy::items_after_statements)]
pub fn postorder<G: Successors>(graph: &G, start: NodeId) -> Vec<NodeId> {
    let node_count = graph.node_count();

    if start.index() >= node_count {
        return Vec::new();
    }

    let mut visited = vec![false; node_count];
    let mut result = Vec::with_capacity(node_count);

    // Iterative postorder using explicit stack with state
    #[derive(Clone, Copy)]
    enum State {
        Enter,
        Exit,
    }

    let mut stack = vec![(start, State::Enter)];

    while let Some((node, state)) = stack.pop() {
        match state {
            State::Enter => {
                if visited[node.index()] {
                    continue;
                }
                visited[node.index()] = true;

                // Exit is processed after every child pushed above it
                stack.push((node, State::Exit));

                let successors: Vec<NodeId> = graph.successors(node).collect();
                for &succ in successors.iter().rev() {
                    if !visited[succ.index()] {
                        stack.push((succ, State::Enter));
                    }
                }
            }
            State::Exit => {
                result.push(node);
            }
        }
    }

    result
}

/// Computes the reverse postorder traversal of nodes reachable from the start.
///
/// Reverse postorder lists the start node first and places every node before its
/// successors in the absence of back edges. It is the natural processing order for
/// forward data flow problems, including dominance.
pub fn reverse_postorder<G: Successors>(graph: &G, start: NodeId) -> Vec<NodeId> {
    let mut result = postorder(graph, start);
    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use crate::utils::graph::{
        algorithms::traversal::{postorder, reverse_postorder},
        GraphBase, NodeId, Successors,
    };

    struct AdjacencyGraph(Vec<Vec<usize>>);

    impl GraphBase for AdjacencyGraph {
        fn node_count(&self) -> usize {
            self.0.len()
        }
    }

    impl Successors for AdjacencyGraph {
        fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
            self.0[node.index()].iter().copied().map(NodeId::new)
        }
    }

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn test_postorder_linear() {
        // 0 -> 1 -> 2
        let graph = AdjacencyGraph(vec![vec![1], vec![2], vec![]]);
        assert_eq!(postorder(&graph, NodeId::new(0)), ids(&[2, 1, 0]));
    }

    #[test]
    fn test_postorder_diamond() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let graph = AdjacencyGraph(vec![vec![1, 2], vec![3], vec![3], vec![]]);
        // 1 is explored first, reaching 3 before 2 gets a chance
        assert_eq!(postorder(&graph, NodeId::new(0)), ids(&[3, 1, 2, 0]));
    }

    #[test]
    fn test_postorder_cycle_visits_once() {
        // 0 -> 1 -> 2 -> 0
        let graph = AdjacencyGraph(vec![vec![1], vec![2], vec![0]]);
        let order = postorder(&graph, NodeId::new(0));
        assert_eq!(order, ids(&[2, 1, 0]));
    }

    #[test]
    fn test_postorder_skips_unreachable() {
        // 0 -> 1, 2 is isolated
        let graph = AdjacencyGraph(vec![vec![1], vec![], vec![]]);
        assert_eq!(postorder(&graph, NodeId::new(0)), ids(&[1, 0]));
    }

    #[test]
    fn test_postorder_invalid_start() {
        let graph = AdjacencyGraph(vec![vec![]]);
        assert!(postorder(&graph, NodeId::new(5)).is_empty());
    }

    #[test]
    fn test_reverse_postorder_tree() {
        //       0
        //      / \
        //     1   2
        //    /
        //   3
        let graph = AdjacencyGraph(vec![vec![1, 2], vec![3], vec![], vec![]]);
        let rpo = reverse_postorder(&graph, NodeId::new(0));
        assert_eq!(rpo, ids(&[0, 2, 1, 3]));
    }
}

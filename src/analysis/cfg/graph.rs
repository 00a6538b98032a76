//! Control Flow Graph implementation.
//!
//! This module provides the in-memory [`ControlFlowGraph`]: a block arena keyed by
//! [`Address`] with forward and reverse adjacency lists, postorder numbering, and DOT
//! rendering.

use std::{collections::HashMap, fmt::Write};

use crate::{
    analysis::cfg::{Address, CfgNode, FlowGraph},
    utils::{
        escape_dot,
        graph::{algorithms, GraphBase, NodeId, Successors},
    },
    Error::GraphError,
    Result,
};

/// A control flow graph of basic blocks identified by address.
///
/// The graph owns its [`CfgNode`]s. Blocks and edges are added incrementally, then
/// [`number_postorder`](Self::number_postorder) assigns the dense numbering the dominator
/// builder expects. Any structural change after numbering discards it, so a stale numbering
/// can never reach the builder.
///
/// Edges form a set: adding the same edge twice is a no-op. Self loops are allowed.
///
/// # Examples
///
/// ```rust
/// use cfgdom::{Address, ControlFlowGraph};
///
/// let entry = Address::new(0x1000);
/// let body = Address::new(0x1010);
///
/// let mut cfg = ControlFlowGraph::new(entry);
/// cfg.add_block(body);
/// cfg.add_edge(entry, body)?;
/// cfg.number_postorder();
///
/// assert_eq!(cfg.size(), 2);
/// assert_eq!(cfg.node(entry).and_then(|n| n.postorder()), Some(1));
/// assert_eq!(cfg.edges_to(body).collect::<Vec<_>>(), vec![entry]);
/// # Ok::<(), cfgdom::Error>(())
/// ```
///
/// # Thread Safety
///
/// `ControlFlowGraph` is [`Send`] and [`Sync`]. Build it on one thread, then share it
/// immutably.
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    /// Block storage, indexed by `NodeId`
    nodes: Vec<CfgNode>,
    /// Map from block address to arena position
    index: HashMap<Address, NodeId>,
    /// Outgoing edges per node
    outgoing: Vec<Vec<NodeId>>,
    /// Incoming edges per node
    incoming: Vec<Vec<NodeId>>,
    /// Entry block (always arena slot 0)
    entry: NodeId,
    edge_count: usize,
}

impl ControlFlowGraph {
    /// Creates a graph containing only the entry block.
    #[must_use]
    pub fn new(entry: Address) -> Self {
        let mut index = HashMap::new();
        index.insert(entry, NodeId::new(0));

        ControlFlowGraph {
            nodes: vec![CfgNode::new(entry)],
            index,
            outgoing: vec![Vec::new()],
            incoming: vec![Vec::new()],
            entry: NodeId::new(0),
            edge_count: 0,
        }
    }

    /// Adds a block, or returns the existing arena slot if the address is already present.
    ///
    /// Adding a new block discards any postorder numbering.
    pub fn add_block(&mut self, address: Address) -> NodeId {
        if let Some(&node_id) = self.index.get(&address) {
            return node_id;
        }

        let node_id = NodeId::new(self.nodes.len());
        self.nodes.push(CfgNode::new(address));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.index.insert(address, node_id);
        self.clear_postorder();
        node_id
    }

    /// Adds a directed edge between two existing blocks.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if a new edge was added (any numbering is discarded)
    /// * `Ok(false)` if the edge already existed
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GraphError`] if either address is not a block of this graph.
    pub fn add_edge(&mut self, from: Address, to: Address) -> Result<bool> {
        let source = self.node_id(from)?;
        let target = self.node_id(to)?;

        if self.outgoing[source.index()].contains(&target) {
            return Ok(false);
        }

        self.outgoing[source.index()].push(target);
        self.incoming[target.index()].push(source);
        self.edge_count += 1;
        self.clear_postorder();
        Ok(true)
    }

    /// Returns the number of blocks.
    #[must_use]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the entry block's address.
    #[must_use]
    pub fn entry(&self) -> Address {
        self.nodes[self.entry.index()].address
    }

    /// Returns an iterator over all blocks in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &CfgNode> {
        self.nodes.iter()
    }

    /// Looks up a block by address.
    #[must_use]
    pub fn node(&self, address: Address) -> Option<&CfgNode> {
        self.index
            .get(&address)
            .map(|node_id| &self.nodes[node_id.index()])
    }

    /// Returns `true` if the graph has a block at the given address.
    #[must_use]
    pub fn contains(&self, address: Address) -> bool {
        self.index.contains_key(&address)
    }

    /// Returns the predecessor addresses of a block, in edge insertion order.
    ///
    /// Unknown addresses yield an empty iterator.
    pub fn edges_to(&self, address: Address) -> impl Iterator<Item = Address> + '_ {
        self.adjacent(&self.incoming, address)
    }

    /// Returns the successor addresses of a block, in edge insertion order.
    ///
    /// Unknown addresses yield an empty iterator.
    pub fn edges_from(&self, address: Address) -> impl Iterator<Item = Address> + '_ {
        self.adjacent(&self.outgoing, address)
    }

    /// Assigns a postorder index to one block.
    ///
    /// Use this when the numbering comes from an external traversal. The builder checks
    /// that the final numbering is dense and puts the entry last.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GraphError`] if the address is not a block of this graph.
    pub fn set_postorder(&mut self, address: Address, postorder: usize) -> Result<()> {
        let node_id = self.node_id(address)?;
        self.nodes[node_id.index()].postorder = Some(postorder);
        Ok(())
    }

    /// Numbers every block for the dominator builder.
    ///
    /// Blocks reachable from the entry are numbered by a depth-first postorder walk, so the
    /// entry receives `size - 1` and every depth-first ancestor outranks its descendants.
    /// Blocks the walk can't reach take the lowest indices in insertion order; they stay
    /// visible to the builder, which reports them as unresolvable.
    ///
    /// # Returns
    ///
    /// The number of unreachable blocks.
    pub fn number_postorder(&mut self) -> usize {
        let order = algorithms::postorder(self, self.entry);
        let mut reached = vec![false; self.nodes.len()];
        for node_id in &order {
            reached[node_id.index()] = true;
        }

        let mut next = 0;
        for (node, is_reached) in self.nodes.iter_mut().zip(&reached) {
            if !*is_reached {
                node.postorder = Some(next);
                next += 1;
            }
        }

        let unreachable = next;
        for node_id in order {
            self.nodes[node_id.index()].postorder = Some(next);
            next += 1;
        }

        if unreachable > 0 {
            log::debug!(
                "{} of {} blocks are unreachable from entry {}",
                unreachable,
                self.nodes.len(),
                self.entry()
            );
        }

        unreachable
    }

    /// Returns the addresses of blocks reachable from the entry in reverse postorder.
    #[must_use]
    pub fn reverse_postorder(&self) -> Vec<Address> {
        algorithms::reverse_postorder(self, self.entry)
            .into_iter()
            .map(|node_id| self.nodes[node_id.index()].address)
            .collect()
    }

    /// Generates a DOT format representation of the graph.
    ///
    /// Blocks are labelled with their address and, when numbered, their postorder index.
    /// The entry block is highlighted.
    ///
    /// # Arguments
    ///
    /// * `title` - Optional graph label
    #[must_use]
    pub fn to_dot(&self, title: Option<&str>) -> String {
        let mut dot = String::new();

        dot.push_str("digraph CFG {\n");
        if let Some(name) = title {
            let _ = writeln!(dot, "    label=\"CFG: {}\";", escape_dot(name));
        }
        dot.push_str("    labelloc=t;\n");
        dot.push_str("    node [shape=box, fontname=\"Courier\", fontsize=10];\n\n");

        for (idx, node) in self.nodes.iter().enumerate() {
            let mut label = node.address.to_string();
            if let Some(po) = node.postorder {
                let _ = write!(label, "\\npo={po}");
            }
            let style = if idx == self.entry.index() {
                ", style=filled, fillcolor=lightgreen"
            } else {
                ""
            };
            let _ = writeln!(dot, "    \"{}\" [label=\"{label}\"{style}];", node.address);
        }

        dot.push('\n');
        for (idx, targets) in self.outgoing.iter().enumerate() {
            for target in targets {
                let _ = writeln!(
                    dot,
                    "    \"{}\" -> \"{}\";",
                    self.nodes[idx].address,
                    self.nodes[target.index()].address
                );
            }
        }

        dot.push_str("}\n");
        dot
    }

    fn node_id(&self, address: Address) -> Result<NodeId> {
        self.index
            .get(&address)
            .copied()
            .ok_or_else(|| GraphError(format!("Block {address} does not exist in the graph")))
    }

    fn adjacent<'a>(
        &'a self,
        lists: &'a [Vec<NodeId>],
        address: Address,
    ) -> impl Iterator<Item = Address> + 'a {
        self.index
            .get(&address)
            .into_iter()
            .flat_map(move |node_id| lists[node_id.index()].iter())
            .map(move |node_id| self.nodes[node_id.index()].address)
    }

    fn clear_postorder(&mut self) {
        for node in &mut self.nodes {
            node.postorder = None;
        }
    }
}

impl GraphBase for ControlFlowGraph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Successors for ControlFlowGraph {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.outgoing[node.index()].iter().copied()
    }
}

impl FlowGraph for ControlFlowGraph {
    type Node = CfgNode;

    fn size(&self) -> usize {
        ControlFlowGraph::size(self)
    }

    fn entry(&self) -> Address {
        ControlFlowGraph::entry(self)
    }

    fn nodes(&self) -> impl Iterator<Item = &CfgNode> {
        ControlFlowGraph::nodes(self)
    }

    fn node(&self, address: Address) -> Option<&CfgNode> {
        ControlFlowGraph::node(self, address)
    }

    fn edges_to(&self, address: Address) -> impl Iterator<Item = Address> {
        ControlFlowGraph::edges_to(self, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn addr(value: u64) -> Address {
        Address::new(value)
    }

    fn postorder_of(cfg: &ControlFlowGraph, value: u64) -> Option<usize> {
        cfg.node(addr(value)).and_then(CfgNode::postorder)
    }

    #[test]
    fn test_new_graph_has_entry_only() {
        let cfg = ControlFlowGraph::new(addr(0x1000));
        assert_eq!(cfg.size(), 1);
        assert_eq!(cfg.edge_count(), 0);
        assert_eq!(cfg.entry(), addr(0x1000));
        assert!(cfg.contains(addr(0x1000)));
    }

    #[test]
    fn test_add_block_is_idempotent() {
        let mut cfg = ControlFlowGraph::new(addr(0));
        let first = cfg.add_block(addr(0x10));
        let second = cfg.add_block(addr(0x10));
        assert_eq!(first, second);
        assert_eq!(cfg.size(), 2);
        assert_eq!(cfg.add_block(addr(0)), NodeId::new(0));
        assert_eq!(cfg.size(), 2);
    }

    #[test]
    fn test_add_edge_unknown_block() {
        let mut cfg = ControlFlowGraph::new(addr(0));
        let result = cfg.add_edge(addr(0), addr(0x99));
        assert!(matches!(result, Err(Error::GraphError(_))));
    }

    #[test]
    fn test_add_edge_deduplicates() {
        let mut cfg = ControlFlowGraph::new(addr(0));
        cfg.add_block(addr(1));
        assert!(cfg.add_edge(addr(0), addr(1)).unwrap());
        assert!(!cfg.add_edge(addr(0), addr(1)).unwrap());
        assert_eq!(cfg.edge_count(), 1);
        assert_eq!(cfg.edges_to(addr(1)).collect::<Vec<_>>(), vec![addr(0)]);
        assert_eq!(cfg.edges_from(addr(0)).collect::<Vec<_>>(), vec![addr(1)]);
    }

    #[test]
    fn test_edges_to_unknown_is_empty() {
        let cfg = ControlFlowGraph::new(addr(0));
        assert_eq!(cfg.edges_to(addr(0x55)).count(), 0);
        assert_eq!(cfg.edges_from(addr(0x55)).count(), 0);
    }

    #[test]
    fn test_number_postorder_entry_last() {
        // 0 -> 1 -> 2, 0 -> 2
        let mut cfg = ControlFlowGraph::new(addr(0));
        cfg.add_block(addr(1));
        cfg.add_block(addr(2));
        cfg.add_edge(addr(0), addr(1)).unwrap();
        cfg.add_edge(addr(1), addr(2)).unwrap();
        cfg.add_edge(addr(0), addr(2)).unwrap();

        assert_eq!(cfg.number_postorder(), 0);
        assert_eq!(postorder_of(&cfg, 2), Some(0));
        assert_eq!(postorder_of(&cfg, 1), Some(1));
        assert_eq!(postorder_of(&cfg, 0), Some(2));
    }

    #[test]
    fn test_number_postorder_unreachable_first() {
        // 0 -> 1, and 5 -> 1 where 5 is not reachable
        let mut cfg = ControlFlowGraph::new(addr(0));
        cfg.add_block(addr(1));
        cfg.add_block(addr(5));
        cfg.add_edge(addr(0), addr(1)).unwrap();
        cfg.add_edge(addr(5), addr(1)).unwrap();

        assert_eq!(cfg.number_postorder(), 1);
        assert_eq!(postorder_of(&cfg, 5), Some(0));
        assert_eq!(postorder_of(&cfg, 1), Some(1));
        assert_eq!(postorder_of(&cfg, 0), Some(2));
    }

    #[test]
    fn test_mutation_clears_numbering() {
        let mut cfg = ControlFlowGraph::new(addr(0));
        cfg.add_block(addr(1));
        cfg.add_edge(addr(0), addr(1)).unwrap();
        cfg.number_postorder();
        assert_eq!(postorder_of(&cfg, 0), Some(1));

        cfg.add_block(addr(2));
        assert!(cfg.nodes().all(|n| n.postorder().is_none()));

        cfg.number_postorder();
        cfg.add_edge(addr(1), addr(2)).unwrap();
        assert!(cfg.nodes().all(|n| n.postorder().is_none()));

        // A duplicate edge is not a structural change
        cfg.number_postorder();
        cfg.add_edge(addr(1), addr(2)).unwrap();
        assert_eq!(postorder_of(&cfg, 0), Some(2));
    }

    #[test]
    fn test_set_postorder() {
        let mut cfg = ControlFlowGraph::new(addr(0));
        cfg.set_postorder(addr(0), 0).unwrap();
        assert_eq!(postorder_of(&cfg, 0), Some(0));
        assert!(matches!(
            cfg.set_postorder(addr(9), 1),
            Err(Error::GraphError(_))
        ));
    }

    #[test]
    fn test_reverse_postorder() {
        // 0 -> 1 -> 2 with a back edge 2 -> 1
        let mut cfg = ControlFlowGraph::new(addr(0));
        cfg.add_block(addr(1));
        cfg.add_block(addr(2));
        cfg.add_block(addr(3));
        cfg.add_edge(addr(0), addr(1)).unwrap();
        cfg.add_edge(addr(1), addr(2)).unwrap();
        cfg.add_edge(addr(2), addr(1)).unwrap();

        assert_eq!(cfg.reverse_postorder(), vec![addr(0), addr(1), addr(2)]);
    }

    #[test]
    fn test_to_dot() {
        let mut cfg = ControlFlowGraph::new(addr(0x10));
        cfg.add_block(addr(0x20));
        cfg.add_edge(addr(0x10), addr(0x20)).unwrap();
        cfg.number_postorder();

        let dot = cfg.to_dot(Some("sub<main>"));
        assert!(dot.starts_with("digraph CFG {\n"));
        assert!(dot.contains("label=\"CFG: sub\\<main\\>\";"));
        assert!(dot.contains("\"0x10\" [label=\"0x10\\npo=1\", style=filled, fillcolor=lightgreen];"));
        assert!(dot.contains("\"0x20\" [label=\"0x20\\npo=0\"];"));
        assert!(dot.contains("\"0x10\" -> \"0x20\";"));
        assert!(dot.ends_with("}\n"));
    }
}

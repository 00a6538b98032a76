//! The boundary between the dominator builder and whatever owns the CFG.
//!
//! A decompiler usually already has its own block graph. Rather than forcing a conversion
//! into [`ControlFlowGraph`](crate::ControlFlowGraph), the builder only asks for the
//! handful of queries defined here:
//!
//! - [`FlowNode`] - A block's address and postorder index
//! - [`FlowGraph`] - Node count, node iteration and lookup, the reverse-edge query, and
//!   the entry address
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//! use cfgdom::{Address, DomTreeBuilder, FlowGraph, FlowNode};
//!
//! struct Block {
//!     addr: Address,
//!     po: usize,
//!     preds: Vec<Address>,
//! }
//!
//! impl FlowNode for Block {
//!     fn address(&self) -> Address { self.addr }
//!     fn postorder(&self) -> Option<usize> { Some(self.po) }
//! }
//!
//! struct Host {
//!     entry: Address,
//!     blocks: HashMap<Address, Block>,
//! }
//!
//! impl FlowGraph for Host {
//!     type Node = Block;
//!
//!     fn size(&self) -> usize { self.blocks.len() }
//!     fn entry(&self) -> Address { self.entry }
//!     fn nodes(&self) -> impl Iterator<Item = &Block> { self.blocks.values() }
//!     fn node(&self, address: Address) -> Option<&Block> { self.blocks.get(&address) }
//!     fn edges_to(&self, address: Address) -> impl Iterator<Item = Address> {
//!         self.blocks
//!             .get(&address)
//!             .map(|b| b.preds.clone())
//!             .unwrap_or_default()
//!             .into_iter()
//!     }
//! }
//!
//! let (a, b) = (Address::new(0x10), Address::new(0x20));
//! let mut blocks = HashMap::new();
//! blocks.insert(a, Block { addr: a, po: 1, preds: vec![] });
//! blocks.insert(b, Block { addr: b, po: 0, preds: vec![a] });
//!
//! let tree = DomTreeBuilder::new().build(&Host { entry: a, blocks })?;
//! assert_eq!(tree.immediate_dominator(b), Some(a));
//! # Ok::<(), cfgdom::Error>(())
//! ```

use crate::Address;

/// A CFG vertex as seen by the dominator builder.
pub trait FlowNode {
    /// Returns the stable address of the block.
    fn address(&self) -> Address;

    /// Returns the postorder index assigned by the CFG side.
    ///
    /// Indices must be dense in `[0, size)` with the entry at `size - 1`. `None` means the
    /// node was never numbered, which the builder rejects.
    fn postorder(&self) -> Option<usize>;
}

/// A control flow graph as seen by the dominator builder.
///
/// Implementations must be consistent: every address yielded by [`edges_to`] and
/// [`entry`] must resolve through [`node`], and [`nodes`] must yield exactly
/// [`size`] nodes.
///
/// [`edges_to`]: FlowGraph::edges_to
/// [`entry`]: FlowGraph::entry
/// [`node`]: FlowGraph::node
/// [`nodes`]: FlowGraph::nodes
/// [`size`]: FlowGraph::size
pub trait FlowGraph {
    /// The node type stored in the graph.
    type Node: FlowNode;

    /// Returns the total number of nodes.
    fn size(&self) -> usize;

    /// Returns the address of the designated entry node.
    fn entry(&self) -> Address;

    /// Returns an iterator over every node in the graph, in no particular order.
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Looks up a node by address.
    fn node(&self, address: Address) -> Option<&Self::Node>;

    /// Returns the addresses of all predecessors of the given node.
    ///
    /// The order is unspecified. Unknown addresses yield an empty iterator.
    fn edges_to(&self, address: Address) -> impl Iterator<Item = Address>;
}

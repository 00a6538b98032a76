//! Control Flow Graph (CFG) representation for dominance analysis.
//!
//! # Key Components
//!
//! - [`Address`] - Stable identity of a basic block
//! - [`CfgNode`] - A block with its postorder index
//! - [`ControlFlowGraph`] - Block arena with forward and reverse adjacency
//! - [`FlowGraph`] / [`FlowNode`] - The queries the dominator builder needs, so host graphs
//!   can be analyzed without conversion
//!
//! # Postorder Numbering
//!
//! The dominator builder expects every node to carry a dense postorder index with the entry
//! at the top. [`ControlFlowGraph::number_postorder`] produces exactly that; host graphs
//! that already number their blocks can implement [`FlowGraph`] directly.
//!
//! # Examples
//!
//! ```rust
//! use cfgdom::{Address, ControlFlowGraph};
//!
//! let mut cfg = ControlFlowGraph::new(Address::new(0x1000));
//! cfg.add_block(Address::new(0x1008));
//! cfg.add_block(Address::new(0x1010));
//! cfg.add_edge(Address::new(0x1000), Address::new(0x1008))?;
//! cfg.add_edge(Address::new(0x1008), Address::new(0x1010))?;
//! cfg.add_edge(Address::new(0x1010), Address::new(0x1008))?;
//!
//! assert_eq!(cfg.number_postorder(), 0);
//! for address in cfg.reverse_postorder() {
//!     println!("{address}");
//! }
//! # Ok::<(), cfgdom::Error>(())
//! ```

mod graph;
mod node;
mod traits;

pub use graph::ControlFlowGraph;
pub use node::{Address, CfgNode};
pub use traits::{FlowGraph, FlowNode};

//! Control flow and dominance analysis.
//!
//! The analysis module is organized into focused sub-modules:
//!
//! - [`cfg`] - Control flow graph storage, postorder numbering and the [`FlowGraph`] boundary
//! - [`domtree`] - Dominator tree construction and dominance queries
//!
//! The builder in [`domtree`] only talks to graphs through [`FlowGraph`], so callers with
//! their own block representation can skip [`ControlFlowGraph`] entirely.

pub mod cfg;
pub mod domtree;

// Re-export primary types at module level
pub use cfg::{Address, CfgNode, ControlFlowGraph, FlowGraph, FlowNode};
pub use domtree::{BuilderConfig, DomTreeBuilder, DominatorIterator, DominatorTree};

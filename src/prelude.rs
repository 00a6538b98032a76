//! # cfgdom Prelude
//!
//! The types needed to build a graph, number it and compute its dominator tree, available
//! through a single glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cfgdom operations
pub use crate::Error;

/// The result type used throughout cfgdom
pub use crate::Result;

// ================================================================================================
// Control Flow Graphs
// ================================================================================================

/// Block identity
pub use crate::Address;

/// Owned control flow graph with postorder numbering
pub use crate::{CfgNode, ControlFlowGraph};

/// Graph boundary for host representations
pub use crate::{FlowGraph, FlowNode};

// ================================================================================================
// Dominance
// ================================================================================================

/// Dominator tree construction
pub use crate::{BuilderConfig, DomTreeBuilder};

/// Computed dominator tree and its chain iterator
pub use crate::{DominatorIterator, DominatorTree};

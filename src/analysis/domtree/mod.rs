//! Dominator tree construction and queries.
//!
//! This module computes immediate dominators for every node of a control flow graph using
//! the iterative Cooper-Harvey-Kennedy algorithm, and exposes the result as a
//! [`DominatorTree`] that answers dominance queries.
//!
//! # Key Components
//!
//! - [`DomTreeBuilder`] - Runs the fixpoint over any [`FlowGraph`](crate::FlowGraph)
//! - [`BuilderConfig`] - Pass limit and result verification
//! - [`DominatorTree`] - Immediate dominators indexed by postorder, plus queries
//! - [`DominatorIterator`] - Walks the dominator chain of a node up to the entry
//!
//! # Failure Modes
//!
//! Construction fails instead of producing a partial tree. A node that cannot be reached
//! from the entry never receives a dominator and is reported as
//! [`Error::UnresolvableDominator`](crate::Error::UnresolvableDominator) with its postorder
//! index. Inconsistent numbering is reported as [`Error::Malformed`](crate::Error::Malformed).
//!
//! # Examples
//!
//! ```rust
//! use cfgdom::{Address, BuilderConfig, ControlFlowGraph, DomTreeBuilder};
//!
//! // entry -> header <-> body, header -> exit
//! let (entry, header, body, exit) = (
//!     Address::new(0x100),
//!     Address::new(0x110),
//!     Address::new(0x120),
//!     Address::new(0x130),
//! );
//! let mut cfg = ControlFlowGraph::new(entry);
//! for block in [header, body, exit] {
//!     cfg.add_block(block);
//! }
//! cfg.add_edge(entry, header)?;
//! cfg.add_edge(header, body)?;
//! cfg.add_edge(body, header)?;
//! cfg.add_edge(header, exit)?;
//! cfg.number_postorder();
//!
//! let tree = DomTreeBuilder::with_config(BuilderConfig::strict()).build(&cfg)?;
//! assert_eq!(tree.immediate_dominator(body), Some(header));
//! assert_eq!(tree.immediate_dominator(exit), Some(header));
//! assert!(tree.dominates(header, body));
//! # Ok::<(), cfgdom::Error>(())
//! ```

mod builder;
mod config;
mod tree;

pub use builder::DomTreeBuilder;
pub use config::BuilderConfig;
pub use tree::{DominatorIterator, DominatorTree};

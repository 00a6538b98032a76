// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # cfgdom
//!
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/cfgdom/blob/main/LICENSE-APACHE)
//!
//! Dominator trees for control flow graphs, computed with the iterative
//! Cooper-Harvey-Kennedy algorithm.
//!
//! Given a graph whose nodes carry a depth-first postorder numbering with the entry on top,
//! `cfgdom` determines the immediate dominator of every node and answers dominance queries
//! on the result. The crate ships its own [`ControlFlowGraph`] with postorder numbering,
//! but the builder only needs the [`FlowGraph`] trait, so existing graph representations
//! can be analyzed in place.
//!
//! ## Features
//!
//! - **Simple fixpoint** - Flat array indexed by postorder, no auxiliary forests
//! - **Any graph** - Reducible and irreducible control flow, self loops, back edges to the entry
//! - **Explicit failures** - Unreachable nodes and broken numbering are reported, never guessed
//! - **Parallel batches** - [`DomTreeBuilder::build_all`] spreads independent graphs over rayon
//! - **DOT export** - Render both the CFG and the dominator tree for Graphviz
//!
//! ## Quick Start
//!
//! ```rust
//! use cfgdom::prelude::*;
//!
//! // if/else with a join block
//! let entry = Address::new(0x1000);
//! let (then_block, else_block, join) = (
//!     Address::new(0x1010),
//!     Address::new(0x1020),
//!     Address::new(0x1030),
//! );
//!
//! let mut cfg = ControlFlowGraph::new(entry);
//! for block in [then_block, else_block, join] {
//!     cfg.add_block(block);
//! }
//! cfg.add_edge(entry, then_block)?;
//! cfg.add_edge(entry, else_block)?;
//! cfg.add_edge(then_block, join)?;
//! cfg.add_edge(else_block, join)?;
//! cfg.number_postorder();
//!
//! let tree = DomTreeBuilder::new().build(&cfg)?;
//! assert_eq!(tree.immediate_dominator(join), Some(entry));
//! assert!(!tree.dominates(then_block, join));
//! # Ok::<(), cfgdom::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`analysis::cfg`] - Block storage, adjacency, postorder numbering, the [`FlowGraph`] boundary
//! - [`analysis::domtree`] - [`DomTreeBuilder`], [`BuilderConfig`] and [`DominatorTree`]
//! - [`utils`] - Arena node identifiers, generic traversals and DOT helpers
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use cfgdom::{Address, ControlFlowGraph, DomTreeBuilder, Error};
//!
//! let cfg = ControlFlowGraph::new(Address::new(0));
//! match DomTreeBuilder::new().build(&cfg) {
//!     Ok(tree) => println!("{} nodes", tree.len()),
//!     Err(Error::Malformed { message, .. }) => println!("Bad numbering: {}", message),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run domtree --release
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench --bench domtree
//! ```

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use cfgdom::prelude::*;
///
/// let cfg = ControlFlowGraph::new(Address::new(0x400));
/// assert_eq!(cfg.size(), 1);
/// ```
pub mod prelude;

/// Control flow graphs and dominator trees.
///
/// See [`analysis::cfg`] for graph construction and [`analysis::domtree`] for the
/// dominator computation itself.
pub mod analysis;

/// Graph building blocks shared by the analysis modules.
///
/// Exposes the arena node identifier, the traversal traits and generic postorder walks.
pub mod utils;

/// `cfgdom` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `cfgdom` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use cfgdom::{Address, ControlFlowGraph, DomTreeBuilder, Error};
///
/// let mut cfg = ControlFlowGraph::new(Address::new(1));
/// cfg.add_block(Address::new(2));
/// cfg.number_postorder();
///
/// match DomTreeBuilder::new().build(&cfg) {
///     Err(Error::UnresolvableDominator { postorder }) => assert_eq!(postorder, 0),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
pub use error::Error;

/// Control flow graph types and the graph boundary consumed by the builder.
pub use analysis::cfg::{Address, CfgNode, ControlFlowGraph, FlowGraph, FlowNode};

/// Dominator tree construction and the resulting tree.
pub use analysis::domtree::{BuilderConfig, DomTreeBuilder, DominatorIterator, DominatorTree};

//! Arena-level graph infrastructure.
//!
//! Blocks live in a flat vector and are referenced by [`NodeId`]. Algorithms in
//! [`algorithms`] are written against the [`GraphBase`] and [`Successors`] traits so they
//! don't depend on a particular graph representation.

mod node;
mod traits;

pub mod algorithms;

pub use node::NodeId;
pub use traits::{GraphBase, Successors};

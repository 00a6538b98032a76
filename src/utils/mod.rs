//! Shared utilities used across the analysis modules.

mod dot;
pub mod graph;

pub use dot::escape_dot;

//! Graph algorithms shared by the analysis passes.
//!
//! ## Traversal
//!
//! - [`postorder`] - Postorder traversal, the basis of the dominator numbering
//! - [`reverse_postorder`] - Reverse postorder traversal (useful for data flow)

mod traversal;

pub use traversal::{postorder, reverse_postorder};

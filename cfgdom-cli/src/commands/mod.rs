pub mod common;
pub mod postorder;
pub mod tree;

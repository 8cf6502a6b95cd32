pub mod tree;

pub use tree::{Label, ParseTreeNode};

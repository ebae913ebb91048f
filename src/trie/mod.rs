//! Ordered, labeled trees
//!
//! A tree is a [`Node`] together with all of its descendants:
//! - Each node owns an ordered list of children with distinct values
//! - Each child points back at its parent without owning it
//! - Two trees merge by unioning children under equal root values

mod digest;
mod merge;
mod node;

pub use node::Node;

//! # trie_node
//!
//! An ordered, labeled tree whose nodes keep duplicate-free child lists,
//! with an in-place recursive merge.
//!
//! Despite the name this is not a prefix trie: there is no lookup by path.
//! Every node holds a value and an ordered list of children, and no two
//! children of a node hold equal values.
//!
//! ## Core Concepts
//!
//! - **Nodes**: handles to tree storage; children are owned, parents are weak
//! - **Merge**: unions children under equal roots, wraps unequal roots
//! - **Rendering**: a per-level text layout chosen by element type
//! - **Store**: JSON and compressed binary snapshot files
//!
//! ## Example
//!
//! ```
//! use trie_node::Node;
//!
//! let one = Node::new('a');
//! one.insert_value('b');
//! one.insert_value('c');
//!
//! let two = Node::new('a');
//! two.insert_value('c');
//! two.insert_value('d');
//!
//! one.merge(&two);
//! assert_eq!(one.num_children(), 3);
//! assert_eq!(one.size(), 4);
//! ```

pub mod model;
pub mod render;
pub mod store;
pub mod trie;

mod error;

pub use error::{Error, Result};
pub use model::{Digest, TreeDocument};
pub use render::{render, Renderable};
pub use store::Format;
pub use trie::Node;

/// Snapshot format version
pub const VERSION: u32 = 1;

/// Magic bytes for snapshot file identification
pub const MAGIC: &[u8; 8] = b"TRIENODE";

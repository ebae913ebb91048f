//! Tree files
//!
//! Trees are stored in one of two encodings:
//! - JSON: a pretty-printed [`TreeDocument`](crate::model::TreeDocument)
//! - Snapshot: a fixed header followed by zstd-compressed bincode entries
//!
//! Loading detects snapshots by their magic bytes, so the extension only
//! matters when saving. Both formats refuse trees deeper than [`MAX_DEPTH`],
//! on the way out and on the way in.

mod snapshot;

pub use snapshot::{decode_snapshot, encode_snapshot, is_snapshot, SNAPSHOT_EXTENSION};

use crate::model::TreeDocument;
use crate::trie::Node;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Deepest tree, in levels, that can be saved or loaded
///
/// JSON spends two nesting levels per tree level (the node object and its
/// `children` array), and serde_json stops parsing at 128.
pub const MAX_DEPTH: usize = 60;

/// On-disk encoding of a tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Snapshot,
}

impl Format {
    /// Pick the encoding for a path: snapshots for `.snap`, JSON otherwise
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(SNAPSHOT_EXTENSION) => Format::Snapshot,
            _ => Format::Json,
        }
    }
}

/// Write a tree to `path` in the given format
pub fn save<T: Serialize>(node: &Node<T>, path: impl AsRef<Path>, format: Format) -> Result<()> {
    let path = path.as_ref();
    check_depth(node)?;
    let bytes = match format {
        Format::Json => serde_json::to_vec_pretty(node)?,
        Format::Snapshot => encode_snapshot(node)?,
    };
    fs::write(path, &bytes)?;
    debug!(path = %path.display(), ?format, bytes = bytes.len(), "saved tree");
    Ok(())
}

/// Read a tree from `path`, whichever format it was saved in
pub fn load<T>(path: impl AsRef<Path>) -> Result<Node<T>>
where
    T: DeserializeOwned + PartialEq + fmt::Debug,
{
    let path = path.as_ref();
    let data = fs::read(path)?;
    let node = if is_snapshot(&data) {
        decode_snapshot(&data)?
    } else {
        let document: TreeDocument<T> = serde_json::from_slice(&data)?;
        let node = Node::from_document(document)?;
        check_depth(&node)?;
        node
    };
    debug!(path = %path.display(), size = node.size(), "loaded tree");
    Ok(node)
}

fn check_depth<T>(node: &Node<T>) -> Result<()> {
    let depth = node.depth();
    if depth > MAX_DEPTH {
        debug!(depth, max = MAX_DEPTH, "tree too deep to store");
        return Err(Error::TooDeep(MAX_DEPTH));
    }
    Ok(())
}

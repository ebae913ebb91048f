//! Binary snapshot encoding
//!
//! Layout:
//! ```text
//! [HEADER: 12 bytes]
//!   - magic: 8 bytes ("TRIENODE")
//!   - version: 4 bytes (u32 LE)
//! [BODY: variable]
//!   - zstd-compressed sequence of entries in pre-order
//!   - entry: bincode value, then bincode u64 child count
//! ```
//!
//! The body is flat, so decoding never recurses however deep the tree is.

use super::MAX_DEPTH;
use crate::trie::Node;
use crate::{Error, Result, MAGIC, VERSION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

const HEADER_SIZE: usize = 12;

/// File extension that selects the snapshot format
pub const SNAPSHOT_EXTENSION: &str = "snap";

/// True if `data` starts with the snapshot magic bytes
pub fn is_snapshot(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}

/// Encode a tree as a snapshot
pub fn encode_snapshot<T: Serialize>(node: &Node<T>) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut pending = vec![node.clone()];
    while let Some(next) = pending.pop() {
        bincode::serialize_into(&mut data, &*next.value())?;
        bincode::serialize_into(&mut data, &(next.num_children() as u64))?;
        pending.extend(next.children().into_iter().rev());
    }
    let compressed = zstd::encode_all(data.as_slice(), 3)?;

    let mut output = Vec::with_capacity(HEADER_SIZE + compressed.len());
    output.extend_from_slice(MAGIC);
    output.extend_from_slice(&VERSION.to_le_bytes());
    output.extend(compressed);
    Ok(output)
}

/// Decode a snapshot into a tree
///
/// Fails with [`Error::TooDeep`] past [`MAX_DEPTH`] levels and with
/// [`Error::DuplicateChild`] if two siblings hold equal values.
pub fn decode_snapshot<T>(data: &[u8]) -> Result<Node<T>>
where
    T: DeserializeOwned + PartialEq + fmt::Debug,
{
    if data.len() < HEADER_SIZE || !is_snapshot(data) {
        return Err(Error::InvalidFile("missing snapshot header".into()));
    }

    let mut version_bytes = [0u8; 4];
    version_bytes.copy_from_slice(&data[MAGIC.len()..HEADER_SIZE]);
    let version = u32::from_le_bytes(version_bytes);
    if version != VERSION {
        return Err(Error::VersionMismatch {
            expected: VERSION,
            found: version,
        });
    }

    let decompressed = zstd::decode_all(&data[HEADER_SIZE..])?;
    let mut body = decompressed.as_slice();

    let (root, count) = read_entry(&mut body)?;
    // Nodes still waiting for children, with how many are left
    let mut open = vec![(root.clone(), count)];
    loop {
        while matches!(open.last(), Some((_, 0))) {
            open.pop();
        }
        let Some((parent, remaining)) = open.last_mut() else {
            break;
        };
        let (child, count) = read_entry(&mut body)?;
        *remaining -= 1;
        if !parent.add_child(&child) {
            return Err(Error::DuplicateChild(format!("{:?}", *child.value())));
        }
        if count > 0 {
            open.push((child, count));
        }
        // A leaf at the top of the stack sits one level below it
        if open.len() + usize::from(count == 0) > MAX_DEPTH {
            return Err(Error::TooDeep(MAX_DEPTH));
        }
    }

    if !body.is_empty() {
        return Err(Error::InvalidFile("trailing data after snapshot tree".into()));
    }
    Ok(root)
}

fn read_entry<T: DeserializeOwned>(body: &mut &[u8]) -> Result<(Node<T>, u64)> {
    let value: T = bincode::deserialize_from(&mut *body)?;
    let count: u64 = bincode::deserialize_from(&mut *body)?;
    Ok((Node::new(value), count))
}

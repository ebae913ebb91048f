//! Merkle digest of a subtree

use super::Node;
use crate::model::Digest;
use crate::Result;
use serde::Serialize;

/// Domain tag mixed into every node digest
const NODE_TAG: &[u8] = b"trie_node/v1";

impl<T: Serialize> Node<T> {
    /// Compute this subtree's digest
    ///
    /// A node's digest covers its value and the digests of its children in
    /// order, so structurally equal trees share a digest and reordering
    /// children changes it.
    pub fn digest(&self) -> Result<Digest> {
        let value = bincode::serialize(&*self.value())?;
        let children = self
            .children()
            .iter()
            .map(Node::digest)
            .collect::<Result<Vec<_>>>()?;

        let value_len = (value.len() as u64).to_le_bytes();
        let child_count = (children.len() as u64).to_le_bytes();
        let mut parts: Vec<&[u8]> = vec![NODE_TAG, &value_len[..], &value[..], &child_count[..]];
        parts.extend(children.iter().map(|child| child.as_bytes().as_slice()));
        Ok(Digest::digest_many(&parts))
    }
}

//! Serializable tree shape
//!
//! [`TreeDocument`] is the plain, owned form of a tree used on disk and on
//! the wire. `Node<T>` serializes to the same shape directly, and
//! deserializes through it so that every child goes through
//! [`Node::add_child`].

use crate::trie::Node;
use crate::{Error, Result};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tree as nested values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TreeDocument<T> {
    /// The node value
    pub value: T,
    /// Child documents in order (may be omitted for leaves)
    #[serde(default)]
    pub children: Vec<TreeDocument<T>>,
}

impl<T> TreeDocument<T> {
    /// A document with no children
    pub fn leaf(value: T) -> Self {
        TreeDocument {
            value,
            children: Vec::new(),
        }
    }

    /// Add a child document
    pub fn with_child(mut self, child: TreeDocument<T>) -> Self {
        self.children.push(child);
        self
    }
}

impl<T: Clone> Node<T> {
    /// Copy this subtree into a document
    pub fn to_document(&self) -> TreeDocument<T> {
        TreeDocument {
            value: self.value().clone(),
            children: self.children().iter().map(Node::to_document).collect(),
        }
    }
}

impl<T: PartialEq + fmt::Debug> Node<T> {
    /// Build a tree from a document
    ///
    /// Fails with [`Error::DuplicateChild`] if two siblings hold equal values.
    pub fn from_document(document: TreeDocument<T>) -> Result<Node<T>> {
        let node = Node::new(document.value);
        for child in document.children {
            let child = Node::from_document(child)?;
            if !node.add_child(&child) {
                return Err(Error::DuplicateChild(format!("{:?}", *child.value())));
            }
        }
        Ok(node)
    }
}

impl<T: Serialize> Serialize for Node<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TreeDocument", 2)?;
        state.serialize_field("value", &*self.value())?;
        state.serialize_field("children", &self.children())?;
        state.end()
    }
}

impl<'de, T> Deserialize<'de> for Node<T>
where
    T: Deserialize<'de> + PartialEq + fmt::Debug,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let document = TreeDocument::deserialize(deserializer)?;
        Node::from_document(document).map_err(de::Error::custom)
    }
}

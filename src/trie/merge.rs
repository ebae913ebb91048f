//! Recursive, in-place tree merge

use super::Node;
use tracing::trace;

impl<T: Clone + PartialEq> Node<T> {
    /// Merge `other` into this tree
    ///
    /// Whatever gets attached is a deep copy of `other`'s structure, and
    /// `other` itself is left as it was, with one exception: when `other` is
    /// an ancestor of `self`, `self` is part of `other`'s subtree, so `other`
    /// grows along with it.
    ///
    /// - Same root value: the children of `other` are unioned into this
    ///   node's children. Children new to this node are appended in `other`'s
    ///   order, and children present in both are merged recursively.
    /// - Structurally equal trees: nothing happens.
    /// - Different root values: this node keeps its value, and its children
    ///   are replaced by two children: a copy of this node's previous
    ///   subtree and a copy of `other`.
    ///
    /// ```text
    /// {a | [b, c, d]} + {a | [d, e, f]}  =>  {a | [b, c, d, e, f]}
    /// {a | [b, c, d]} + {e | [f, g, h]}  =>  {a | [{a | [b, c, d]}, {e | [f, g, h]}]}
    /// ```
    ///
    /// In the second case the root and its first child carry the same
    /// value. There is no placeholder value to put above both trees, so the
    /// existing root value is reused.
    pub fn merge(&self, other: &Node<T>) {
        // A handle into our own subtree would be mutated underneath us
        if self.subtree_contains(other) && !self.ptr_eq(other) {
            trace!("merging a snapshot of an aliased subtree");
            self.merge_from(&other.clone_tree());
        } else {
            self.merge_from(other);
        }
    }

    fn merge_from(&self, other: &Node<T>) {
        if *self.value() != *other.value() {
            trace!(size = self.size(), "root values differ, wrapping both trees");
            let previous = self.clone_tree();
            let incoming = other.clone_tree();
            self.clear();
            self.add_child(&previous);
            self.add_child(&incoming);
            return;
        }

        if self == other {
            return;
        }

        for other_child in other.children() {
            if self.add_child(&other_child.clone_tree()) {
                continue;
            }
            let existing = self.find_child(&other_child.value());
            if let Some(existing) = existing {
                trace!("merging shared child");
                existing.merge_from(&other_child);
            }
        }
    }
}

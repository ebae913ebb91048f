//! Tree node type
//!
//! A [`Node`] is a handle to shared node storage. Each node owns its
//! children through strong references and points back at its parent
//! through a weak one, so dropping a root releases the whole subtree and
//! the parent link can never keep a node alive.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

type Link<T> = Rc<RefCell<NodeData<T>>>;
type WeakLink<T> = Weak<RefCell<NodeData<T>>>;

struct NodeData<T> {
    value: T,
    parent: WeakLink<T>,
    children: Vec<Node<T>>,
}

/// A node in an ordered, labeled tree
///
/// - Children keep their insertion order
/// - No two children of a node hold equal values
/// - A node has at most one parent, and the tree never contains a cycle
///
/// Cloning a `Node` clones the *handle*: both handles refer to the same
/// node. Use [`Node::clone_tree`] for an independent deep copy.
///
/// Structural operations never fail. A rejected insertion returns `false`,
/// a missed lookup returns `None`, and neither mutates anything.
pub struct Node<T> {
    link: Link<T>,
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Node {
            link: Rc::clone(&self.link),
        }
    }
}

impl<T> Node<T> {
    /// Create a parentless, childless node
    pub fn new(value: T) -> Self {
        Node {
            link: Rc::new(RefCell::new(NodeData {
                value,
                parent: Weak::new(),
                children: Vec::new(),
            })),
        }
    }

    /// Borrow this node's value
    ///
    /// The borrow must be released before this node is mutated.
    pub fn value(&self) -> Ref<'_, T> {
        Ref::map(self.link.borrow(), |data| &data.value)
    }

    /// Get the parent node, if this node is attached and the parent is alive
    pub fn parent(&self) -> Option<Node<T>> {
        self.link
            .borrow()
            .parent
            .upgrade()
            .map(|link| Node { link })
    }

    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    /// Number of direct children
    pub fn num_children(&self) -> usize {
        self.link.borrow().children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.link.borrow().children.is_empty()
    }

    /// True for a node with no parent and no children
    pub fn is_singleton(&self) -> bool {
        !self.has_children() && !self.has_parent() && self.size() == 1
    }

    /// Number of nodes in this subtree, including this node
    pub fn size(&self) -> usize {
        1 + self
            .link
            .borrow()
            .children
            .iter()
            .map(Node::size)
            .sum::<usize>()
    }

    /// Number of levels in this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .link
            .borrow()
            .children
            .iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    /// Get the child at `index`, or `None` when out of range
    pub fn child_at(&self, index: usize) -> Option<Node<T>> {
        self.link.borrow().children.get(index).cloned()
    }

    /// Snapshot of the child handles in order
    pub fn children(&self) -> Vec<Node<T>> {
        self.link.borrow().children.clone()
    }

    /// True if both handles refer to the same node
    pub fn ptr_eq(&self, other: &Node<T>) -> bool {
        Rc::ptr_eq(&self.link, &other.link)
    }

    /// Detach every child; this node becomes a leaf
    pub fn clear(&self) {
        let children = std::mem::take(&mut self.link.borrow_mut().children);
        for child in &children {
            child.detach_parent();
        }
    }

    /// True if `node` is this node or one of its descendants
    pub(crate) fn subtree_contains(&self, node: &Node<T>) -> bool {
        let mut current = Some(node.clone());
        while let Some(candidate) = current {
            if candidate.ptr_eq(self) {
                return true;
            }
            current = candidate.parent();
        }
        false
    }

    /// Append `child` without any checks. Callers uphold the invariants.
    fn attach(&self, child: &Node<T>) {
        child.link.borrow_mut().parent = Rc::downgrade(&self.link);
        self.link.borrow_mut().children.push(child.clone());
    }

    fn detach_parent(&self) {
        self.link.borrow_mut().parent = Weak::new();
    }

    fn take_child_at(&self, index: usize) -> Node<T> {
        let child = self.link.borrow_mut().children.remove(index);
        child.detach_parent();
        child
    }
}

impl<T: PartialEq> Node<T> {
    /// Create a node and attach it to `parent` in one step
    ///
    /// The node is returned detached when `parent` already has a child with
    /// an equal value.
    pub fn new_child(parent: &Node<T>, value: T) -> Self {
        let child = Node::new(value);
        parent.add_child(&child);
        child
    }

    /// Attach `child` as the last child of this node
    ///
    /// Returns `false` without mutating anything if `child` already has a
    /// parent, if attaching it would create a cycle, or if this node already
    /// has a child with an equal value.
    pub fn add_child(&self, child: &Node<T>) -> bool {
        if child.has_parent() {
            debug!("rejected child: already attached elsewhere");
            return false;
        }
        if child.subtree_contains(self) {
            debug!("rejected child: would create a cycle");
            return false;
        }
        if self.has_child_node(child) {
            debug!("rejected child: duplicate value");
            return false;
        }
        self.attach(child);
        true
    }

    /// Wrap `value` in a new leaf and attach it
    pub fn insert_value(&self, value: T) -> bool {
        self.add_child(&Node::new(value))
    }

    /// Position of the child holding `value`
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.link
            .borrow()
            .children
            .iter()
            .position(|child| *child.value() == *value)
    }

    /// Find the child holding `value`
    pub fn find_child(&self, value: &T) -> Option<Node<T>> {
        let index = self.index_of(value)?;
        self.child_at(index)
    }

    pub fn has_child(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// True if some child holds the same value as `node`
    pub fn has_child_node(&self, node: &Node<T>) -> bool {
        self.has_child(&node.value())
    }

    /// Detach the child holding `value` and hand it to the caller
    ///
    /// The returned node is a standalone tree with no parent. A miss returns
    /// `None` and leaves this node untouched.
    pub fn remove_child(&self, value: &T) -> Option<Node<T>> {
        let index = self.index_of(value)?;
        Some(self.take_child_at(index))
    }

    /// Detach the child holding the same value as `node`
    pub fn remove_child_node(&self, node: &Node<T>) -> Option<Node<T>> {
        let index = self.index_of(&node.value())?;
        Some(self.take_child_at(index))
    }

    /// Replace the child at `index` with `child`, returning the displaced one
    ///
    /// Rejected (returns `None`, mutates nothing) when `index` is out of
    /// range, `child` is already attached, `child` is an ancestor of this
    /// node, or another child already holds `child`'s value.
    pub fn replace_child_at(&self, index: usize, child: &Node<T>) -> Option<Node<T>> {
        if index >= self.num_children() || child.has_parent() || child.subtree_contains(self) {
            return None;
        }
        let clash = self
            .link
            .borrow()
            .children
            .iter()
            .enumerate()
            .any(|(i, sibling)| i != index && *sibling.value() == *child.value());
        if clash {
            debug!("rejected replacement: duplicate value");
            return None;
        }

        child.link.borrow_mut().parent = Rc::downgrade(&self.link);
        let displaced =
            std::mem::replace(&mut self.link.borrow_mut().children[index], child.clone());
        displaced.detach_parent();
        Some(displaced)
    }

    /// Assign a new value
    ///
    /// Returns `false` and keeps the old value if a sibling already holds
    /// `value`.
    pub fn set_value(&self, value: T) -> bool {
        if let Some(parent) = self.parent() {
            let clash = parent
                .link
                .borrow()
                .children
                .iter()
                .any(|sibling| !sibling.ptr_eq(self) && *sibling.value() == value);
            if clash {
                return false;
            }
        }
        self.link.borrow_mut().value = value;
        true
    }
}

impl<T: Clone> Node<T> {
    /// Deep copy of this subtree
    ///
    /// The copy has no parent and shares no node with the source.
    pub fn clone_tree(&self) -> Node<T> {
        let data = self.link.borrow();
        let copy = Node::new(data.value.clone());
        for child in &data.children {
            copy.attach(&child.clone_tree());
        }
        copy
    }
}

/// Structural equality: equal values and pairwise-equal children in order
impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let lhs = self.link.borrow();
        let rhs = other.link.borrow();
        lhs.value == rhs.value
            && lhs.children.len() == rhs.children.len()
            && lhs
                .children
                .iter()
                .zip(rhs.children.iter())
                .all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Node<T> {}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.link.borrow();
        f.debug_struct("Node")
            .field("value", &data.value)
            .field("children", &data.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Node<char> {
        let root = Node::new('a');
        for c in ['b', 'c', 'd'] {
            root.insert_value(c);
        }
        root
    }

    #[test]
    fn test_single_node() {
        let node = Node::new(42);
        assert_eq!(*node.value(), 42);
        assert!(node.is_singleton());
        assert!(node.parent().is_none());
        assert_eq!(node.num_children(), 0);

        assert!(node.set_value(7));
        assert_eq!(*node.value(), 7);

        let copy = node.clone_tree();
        assert!(!copy.ptr_eq(&node));
        assert_eq!(copy, node);
    }

    #[test]
    fn test_insertion() {
        let parent = Node::new('a');
        assert!(parent.insert_value('b'));
        assert!(parent.has_children());
        assert_eq!(parent.num_children(), 1);
        assert_eq!(parent.size(), 2);
        assert!(parent.has_child(&'b'));

        // Duplicates are refused and nothing changes
        assert!(!parent.insert_value('b'));
        assert_eq!(parent.num_children(), 1);
        assert_eq!(parent.size(), 2);

        let child = Node::new('c');
        assert!(parent.add_child(&child));
        assert_eq!(parent.num_children(), 2);
        assert_eq!(parent.size(), 3);
        assert!(child.parent().unwrap().ptr_eq(&parent));

        let grandchild = Node::new_child(&child, 'd');
        assert_eq!(parent.size(), 4);
        assert_eq!(child.size(), 2);
        assert!(child.has_child(&'d'));
        assert!(grandchild.parent().unwrap().ptr_eq(&child));
    }

    #[test]
    fn test_new_child_duplicate_stays_detached() {
        let parent = abcd();
        let dup = Node::new_child(&parent, 'b');
        assert!(!dup.has_parent());
        assert_eq!(parent.num_children(), 3);
    }

    #[test]
    fn test_add_child_rejects_attached_node() {
        let first = Node::new('x');
        let second = Node::new('y');
        let child = Node::new_child(&first, 'z');

        assert!(!second.add_child(&child));
        assert!(!second.has_children());
        assert!(child.parent().unwrap().ptr_eq(&first));
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let root = Node::new(1);
        let child = Node::new_child(&root, 2);

        assert!(!root.add_child(&root));
        // root is parentless but is an ancestor of child
        assert!(!child.add_child(&root));
        assert_eq!(root.size(), 2);
        assert!(!root.has_parent());
    }

    #[test]
    fn test_child_at_bounds() {
        let root = abcd();
        assert_eq!(*root.child_at(0).unwrap().value(), 'b');
        assert_eq!(*root.child_at(2).unwrap().value(), 'd');
        assert!(root.child_at(3).is_none());
    }

    #[test]
    fn test_find_and_index() {
        let root = abcd();
        assert_eq!(root.index_of(&'c'), Some(1));
        assert_eq!(root.index_of(&'z'), None);
        assert!(root.find_child(&'d').unwrap().ptr_eq(&root.child_at(2).unwrap()));
        assert!(root.has_child_node(&Node::new('b')));
        assert!(!root.has_child_node(&Node::new('q')));
    }

    #[test]
    fn test_remove_child_transfers_ownership() {
        let root = abcd();
        let c = root.find_child(&'c').unwrap();
        c.insert_value('x');
        let snapshot = c.clone_tree();

        let removed = root.remove_child(&'c').unwrap();
        assert_eq!(removed, snapshot);
        assert!(!removed.has_parent());
        assert!(!root.has_child(&'c'));
        assert_eq!(root.num_children(), 2);
        assert_eq!(root.size(), 3);

        // A detached node can be attached elsewhere
        let other = Node::new('q');
        assert!(other.add_child(&removed));
        assert_eq!(other.size(), 3);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let root = abcd();
        assert!(root.remove_child(&'z').is_none());
        assert_eq!(root, abcd());
    }

    #[test]
    fn test_remove_child_node() {
        let root = abcd();
        let d = root.find_child(&'d').unwrap();
        let removed = root.remove_child_node(&d).unwrap();
        assert!(removed.ptr_eq(&d));
        assert!(!d.has_parent());
        assert_eq!(root.num_children(), 2);
    }

    #[test]
    fn test_deletion_sequence() {
        let root = Node::new('h');
        for c in ['a', 'i', 'b'] {
            root.insert_value(c);
        }

        assert!(root.remove_child(&'b').is_some());
        assert_eq!(root.num_children(), 2);
        assert!(root.has_child(&'a') && root.has_child(&'i') && !root.has_child(&'b'));

        assert!(root.remove_child(&'i').is_some());
        assert_eq!(root.num_children(), 1);

        assert!(root.remove_child(&'a').is_some());
        assert!(root.is_singleton());

        assert!(root.remove_child(&'a').is_none());
        assert!(!root.has_child(&'a'));
    }

    #[test]
    fn test_set_value_refuses_sibling_value() {
        let root = abcd();
        let b = root.find_child(&'b').unwrap();
        assert!(!b.set_value('c'));
        assert_eq!(*b.value(), 'b');

        assert!(b.set_value('e'));
        assert!(root.has_child(&'e'));
        // Matching the parent's own value is fine
        assert!(b.set_value('a'));
    }

    #[test]
    fn test_replace_child_at() {
        let root = abcd();
        let replacement = Node::new('z');
        let displaced = root.replace_child_at(1, &replacement).unwrap();

        assert_eq!(*displaced.value(), 'c');
        assert!(!displaced.has_parent());
        assert_eq!(*root.child_at(1).unwrap().value(), 'z');
        assert!(replacement.parent().unwrap().ptr_eq(&root));

        // Same value as the slot being replaced is allowed
        let same = Node::new('z');
        assert!(root.replace_child_at(1, &same).is_some());

        assert!(root.replace_child_at(0, &Node::new('d')).is_none());
        assert!(root.replace_child_at(9, &Node::new('y')).is_none());
        assert_eq!(root.num_children(), 3);
    }

    #[test]
    fn test_clear() {
        let root = abcd();
        let b = root.find_child(&'b').unwrap();
        root.clear();
        assert!(root.is_singleton());
        assert!(!b.has_parent());
    }

    #[test]
    fn test_clone_tree_is_independent() {
        let root = abcd();
        root.find_child(&'b').unwrap().insert_value('x');
        let copy = root.clone_tree();
        assert_eq!(copy, root);
        assert!(!copy.has_parent());

        copy.find_child(&'b').unwrap().insert_value('y');
        copy.remove_child(&'d');
        assert_ne!(copy, root);
        assert_eq!(root.size(), 5);
        assert!(!root.find_child(&'b').unwrap().has_child(&'y'));
    }

    #[test]
    fn test_equality_is_position_sensitive() {
        let lhs = Node::new(0);
        lhs.insert_value(1);
        lhs.insert_value(2);
        let rhs = Node::new(0);
        rhs.insert_value(2);
        rhs.insert_value(1);
        assert_ne!(lhs, rhs);

        assert_eq!(Node::new(5), Node::new(5));
        assert_ne!(Node::new(5), Node::new(6));
    }

    #[test]
    fn test_size_matches_children() {
        let root = abcd();
        root.find_child(&'c').unwrap().insert_value('x');
        let total: usize = root.children().iter().map(Node::size).sum();
        assert_eq!(root.size(), 1 + total);
        assert_eq!(Node::new('q').size(), 1);
    }

    #[test]
    fn test_depth_follows_longest_branch() {
        let root = abcd();
        assert_eq!(Node::new('q').depth(), 1);
        assert_eq!(root.depth(), 2);

        let c = root.find_child(&'c').unwrap();
        Node::new_child(&c, 'x').insert_value('y');
        assert_eq!(root.depth(), 4);
        assert_eq!(c.depth(), 3);
    }

    #[test]
    fn test_child_outlives_dropped_parent() {
        let child = {
            let root = abcd();
            let b = root.find_child(&'b').unwrap();
            b
        };
        assert!(!child.has_parent());
        assert!(child.is_singleton());
    }
}

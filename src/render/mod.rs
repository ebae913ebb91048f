//! Textual rendering of trees
//!
//! Rendering walks a tree through its read-only traversal methods
//! (`value`, `num_children`, `child_at`, `has_children`) and prints one
//! block per node that has children:
//!
//! ```text
//!    a
//! =====
//! b c d
//! ```
//!
//! How a single block is laid out depends on the element type, chosen
//! through [`Renderable`].

mod level;

pub use level::{labelled_level, plain_level};

use crate::trie::Node;
use std::fmt;

/// Element types that know how to lay out one level of a tree
///
/// The default layout centers nothing and separates children with spaces.
/// Text types override it with [`labelled_level`], which sizes the rule to
/// the labels and separates children with `|`.
pub trait Renderable: fmt::Display + Sized {
    /// Lay out `node`'s value, a separator rule, and its children's values
    fn render_level(node: &Node<Self>) -> String {
        plain_level(node)
    }
}

macro_rules! plain_renderable {
    ($($ty:ty),* $(,)?) => {
        $(impl Renderable for $ty {})*
    };
}

plain_renderable!(
    char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Renderable for String {
    fn render_level(node: &Node<Self>) -> String {
        labelled_level(node)
    }
}

impl Renderable for &str {
    fn render_level(node: &Node<Self>) -> String {
        labelled_level(node)
    }
}

/// Render a whole tree
///
/// A leaf is printed as its value on one line. Otherwise every node with
/// children contributes one level block, in pre-order, each followed by a
/// blank line.
pub fn render<T: Renderable>(node: &Node<T>) -> String {
    if !node.has_children() {
        return format!("{}\n", *node.value());
    }
    let mut out = String::new();
    render_levels(node, &mut out);
    out
}

fn render_levels<T: Renderable>(node: &Node<T>, out: &mut String) {
    if !node.has_children() {
        return;
    }
    out.push_str(&T::render_level(node));
    out.push_str("\n\n");
    for index in 0..node.num_children() {
        if let Some(child) = node.child_at(index) {
            render_levels(&child, out);
        }
    }
}

impl<T: Renderable> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

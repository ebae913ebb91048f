//! Layouts for a single tree level

use crate::trie::Node;
use std::fmt;

/// Default level layout
///
/// The parent is indented by one space per child, the rule is `2n - 1`
/// characters wide, and every child value is followed by a space:
///
/// ```text
///    1
/// =====
/// 2 3 4
/// ```
pub fn plain_level<T: fmt::Display>(node: &Node<T>) -> String {
    let count = node.num_children();
    let mut out = " ".repeat(count);
    out.push_str(&node.value().to_string());
    out.push('\n');
    out.push_str(&"=".repeat((2 * count).saturating_sub(1)));
    out.push('\n');
    for index in 0..count {
        if let Some(child) = node.child_at(index) {
            out.push_str(&child.value().to_string());
            out.push(' ');
        }
    }
    out
}

/// Level layout for text labels
///
/// The rule spans the children line (labels joined by `|`) or the parent
/// label, whichever is wider, and the narrower line is pushed right:
///
/// ```text
///    hello
/// ===========
/// ab|bc|cd|de
/// ```
pub fn labelled_level<T: fmt::Display>(node: &Node<T>) -> String {
    let parent = node.value().to_string();
    let labels: Vec<String> = (0..node.num_children())
        .filter_map(|index| node.child_at(index))
        .map(|child| child.value().to_string())
        .collect();
    let children_width = labels
        .iter()
        .map(|label| label.len() + 1)
        .sum::<usize>()
        .saturating_sub(1);

    let mut out = String::new();
    let rule_width = if children_width > parent.len() {
        out.push_str(&" ".repeat((children_width / 2).saturating_sub(2)));
        children_width
    } else {
        parent.len()
    };
    out.push_str(&parent);
    out.push('\n');
    out.push_str(&"=".repeat(rule_width));
    out.push('\n');

    if !labels.is_empty() && children_width < parent.len() {
        out.push_str(&" ".repeat((parent.len() / 2).saturating_sub(2)));
    }
    out.push_str(&labels.join("|"));
    out
}

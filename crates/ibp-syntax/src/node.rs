//! Node traversal and text helpers.

use tree_sitter::{Node, TreeCursor};

/// Returns the source text covered by `node`.
///
/// Returns an empty string when the node's byte range does not fall on
/// character boundaries of `source`, which only happens when the node came
/// from a different source.
#[must_use]
pub fn node_text<'src>(node: Node<'_>, source: &'src str) -> &'src str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Iterates over `root` and all of its descendants in document order.
#[must_use]
pub fn preorder(root: Node<'_>) -> Preorder<'_> {
    Preorder {
        cursor: root.walk(),
        done: false,
    }
}

/// Returns the first node (in document order) below or at `root` whose kind
/// equals `kind`.
#[must_use]
pub fn first_descendant<'tree>(root: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    preorder(root).find(|node| node.kind() == kind)
}

/// Depth-first, document-order iterator over a subtree.
///
/// Created by [`preorder`]. The cursor never leaves the subtree it started
/// from.
pub struct Preorder<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();
        if self.cursor.goto_first_child() || self.cursor.goto_next_sibling() {
            return Some(node);
        }

        loop {
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
        }
    }
}

//! Depth-first, pre-order traversal.

use super::{Document, NodeId};

/// Pre-order iterator over a subtree. Stale handles met on the way are
/// skipped.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let id = self.stack.pop()?;
            let Some(node) = self.doc.get(id) else {
                continue;
            };
            self.stack.extend(node.children.iter().rev().copied());
            return Some(id);
        }
    }
}

/// Text leaves of a subtree in document order, minus those whose parent
/// element is exempt.
pub struct TextLeaves<'a, F> {
    inner: Descendants<'a>,
    exempt: F,
}

impl<F: FnMut(&str) -> bool> Iterator for TextLeaves<'_, F> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let doc = self.inner.doc;
        let exempt = &mut self.exempt;
        self.inner.by_ref().find(|&id| {
            if !doc.is_text(id) {
                return false;
            }
            match doc.parent(id).and_then(|parent| doc.tag(parent)) {
                Some(tag) => !exempt(tag),
                None => true,
            }
        })
    }
}

impl Document {
    /// Every node under `root` (inclusive), in document order.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![root],
        }
    }

    /// Text leaves under `root` in document order. A leaf is left out when
    /// its nearest element ancestor, its parent, satisfies `exempt(tag)`;
    /// text deeper inside an exempt element is still yielded.
    pub fn text_leaves<F: FnMut(&str) -> bool>(&self, root: NodeId, exempt: F) -> TextLeaves<'_, F> {
        TextLeaves {
            inner: self.descendants(root),
            exempt,
        }
    }
}

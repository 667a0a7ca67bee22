//! Undo log entries for marker injection.

use crate::dom::{Document, DomError, NodeId};

/// Reverses one leaf replacement made by a scan.
///
/// Holds a detached clone of the original text leaf, the parent it lived
/// in, and the nodes that took its place. None of these handles are
/// trusted at undo time: the page may have moved or dropped any of them.
#[derive(Debug, Clone)]
pub struct UndoEntry {
    parent: NodeId,
    original: NodeId,
    inserted: Vec<NodeId>,
}

impl UndoEntry {
    pub(super) fn new(parent: NodeId, original: NodeId, inserted: Vec<NodeId>) -> Self {
        Self {
            parent,
            original,
            inserted,
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Put the original leaf back where the replacement nodes are.
    ///
    /// Returns the parent on success so the caller can normalize it once
    /// every entry has been applied. On failure the document is left as it
    /// was and the clone is released.
    pub(super) fn apply(self, doc: &mut Document) -> Result<NodeId, DomError> {
        let restored = if doc.is_connected(self.parent) {
            doc.replace_range(self.parent, &self.inserted, &[self.original])
        } else {
            Err(DomError::Disconnected(self.parent))
        };
        match restored {
            Ok(()) => {
                for node in self.inserted {
                    let _ = doc.release(node);
                }
                Ok(self.parent)
            }
            Err(e) => {
                let _ = doc.release(self.original);
                Err(e)
            }
        }
    }
}

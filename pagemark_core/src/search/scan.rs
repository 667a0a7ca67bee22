//! Scan algorithm: locate the term and inject markers.

use log::{debug, trace, warn};

use crate::dom::{Document, DomError, NodeId};
use crate::viewport::Viewport;

use super::pattern::{LiteralPattern, Segment};
use super::undo::UndoEntry;
use super::{Highlighter, SearchMatch};

impl Highlighter {
    /// Undo the previous scan, then wrap every occurrence of the term in a
    /// marker and focus the first one. Returns the number of matches.
    ///
    /// Only the matched text leaves are replaced; their siblings are never
    /// touched, so element state elsewhere on the page survives.
    pub fn scan<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &mut V) -> usize {
        self.clear_highlights(doc);
        if self.term.trim().is_empty() {
            return 0;
        }
        let pattern = match LiteralPattern::new(&self.term) {
            Ok(p) => p,
            Err(e) => {
                warn!("search: cannot compile term ({} bytes): {e}", self.term.len());
                return 0;
            }
        };

        // Collect first: the walk borrows the document we're about to edit.
        let style = &self.style;
        let leaves: Vec<NodeId> = doc
            .text_leaves(doc.body(), |tag| style.is_exempt(tag))
            .collect();
        trace!("search: {} candidate text leaves", leaves.len());

        for leaf in leaves {
            if let Err(e) = self.highlight_leaf(doc, &pattern, leaf) {
                debug!("search: leaving leaf {leaf} untouched: {e}");
            }
        }

        debug!("search: {} matches", self.matches.len());
        if !self.matches.is_empty() {
            self.apply_cursor(doc, viewport, 0);
        }
        self.matches.len()
    }

    /// Replace one text leaf with alternating text and marker nodes.
    fn highlight_leaf(
        &mut self,
        doc: &mut Document,
        pattern: &LiteralPattern,
        leaf: NodeId,
    ) -> Result<(), DomError> {
        let Some(text) = doc.text(leaf).filter(|t| pattern.is_match(t)) else {
            return Ok(());
        };
        let Some(parent) = doc.parent(leaf) else {
            return Ok(());
        };
        let text = text.to_owned();

        let mut inserted = Vec::new();
        let mut markers = Vec::new();
        for segment in pattern.split(&text) {
            let node = match segment {
                Segment::Plain(plain) => doc.create_text(plain),
                Segment::Match(matched) => match self.create_marker(doc, matched) {
                    Ok(marker) => {
                        markers.push(marker);
                        marker
                    }
                    Err(e) => {
                        discard(doc, &inserted);
                        return Err(e);
                    }
                },
            };
            inserted.push(node);
        }

        let original = match doc.clone_node(leaf) {
            Ok(original) => original,
            Err(e) => {
                discard(doc, &inserted);
                return Err(e);
            }
        };
        if let Err(e) = doc.replace_with_nodes(parent, leaf, &inserted) {
            discard(doc, &inserted);
            discard(doc, &[original]);
            return Err(e);
        }
        let _ = doc.release(leaf);
        self.undo.push(UndoEntry::new(parent, original, inserted));

        for marker in markers {
            let index = self.matches.len();
            self.matches.push(SearchMatch { marker, index });
        }
        Ok(())
    }

    fn create_marker(&self, doc: &mut Document, matched: &str) -> Result<NodeId, DomError> {
        let marker = doc.create_element(&self.style.tag);
        let text = doc.create_text(matched);
        let built = doc
            .append_child(marker, text)
            .and_then(|()| doc.add_class(marker, &self.style.base_class));
        if let Err(e) = built {
            discard(doc, &[marker, text]);
            return Err(e);
        }
        Ok(marker)
    }
}

/// Free nodes built for a replacement that never made it into the page.
/// Nodes already freed, or still attached, are left alone.
pub(super) fn discard(doc: &mut Document, nodes: &[NodeId]) {
    for &node in nodes {
        if doc.contains(node) && doc.parent(node).is_none() {
            let _ = doc.release(node);
        }
    }
}

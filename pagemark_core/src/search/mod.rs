//! In-page search: find a literal term across the page's text, wrap each
//! occurrence in a marker element, and navigate between them.
//!
//! `Highlighter` owns the engine state (term, ordered matches, focused
//! index, undo log). `SearchSession` puts the debounce gate in front of it.

mod pattern;
mod scan;
mod session;
mod undo;

use log::debug;

use crate::dom::{Document, NodeId};
use crate::viewport::Viewport;

pub use pattern::{LiteralPattern, Segment};
pub use session::SearchSession;
pub use undo::UndoEntry;

/// Marker element shape and the set of tags whose text is never searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    /// Tag of injected marker elements.
    pub tag: String,
    /// Class carried by every marker except the focused one.
    pub base_class: String,
    /// Class carried by the focused marker only.
    pub current_class: String,
    /// Non-rendering elements skipped during a scan. The marker tag is
    /// always skipped in addition to these.
    pub exempt_tags: Vec<String>,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            tag: "mark".to_owned(),
            base_class: "search-highlight".to_owned(),
            current_class: "search-highlight-current".to_owned(),
            exempt_tags: ["script", "style", "noscript", "template"]
                .map(str::to_owned)
                .to_vec(),
        }
    }
}

impl MarkerStyle {
    /// Whether text under an element named `tag` is off limits.
    pub fn is_exempt(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(&self.tag)
            || self.exempt_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// One located occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// The marker element wrapping the matched text.
    pub marker: NodeId,
    /// Position in document order, dense from 0.
    pub index: usize,
}

/// Search engine state for one page.
#[derive(Debug, Default)]
pub struct Highlighter {
    style: MarkerStyle,
    /// Term of the last scan.
    term: String,
    matches: Vec<SearchMatch>,
    focused: usize,
    /// Index of the match currently carrying the current class.
    applied: Option<usize>,
    undo: Vec<UndoEntry>,
}

impl Highlighter {
    pub fn new(style: MarkerStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Index of the focused match; 0 when there are none.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Returns the currently focused match, if any.
    pub fn focused_match(&self) -> Option<&SearchMatch> {
        self.matches.get(self.focused)
    }

    /// Number of mutations waiting to be undone.
    pub fn pending_undo(&self) -> usize {
        self.undo.len()
    }

    /// Set the term and rescan, or clear when it is blank.
    pub fn search<V: Viewport + ?Sized>(
        &mut self,
        doc: &mut Document,
        viewport: &mut V,
        term: &str,
    ) -> usize {
        term.clone_into(&mut self.term);
        if term.trim().is_empty() {
            self.clear_highlights(doc);
            return 0;
        }
        self.scan(doc, viewport)
    }

    /// Restore every leaf replaced by the last scan and drop all matches.
    ///
    /// Entries whose parent left the document, or whose replacement nodes
    /// were moved by the page, are skipped. Calling this twice is a no-op
    /// the second time.
    pub fn clear_highlights(&mut self, doc: &mut Document) {
        let mut restored = Vec::with_capacity(self.undo.len());
        for entry in self.undo.drain(..).rev() {
            let parent = entry.parent();
            match entry.apply(doc) {
                Ok(parent) => restored.push(parent),
                Err(e) => debug!("search: skipping undo under {parent}: {e}"),
            }
        }
        // Merge split text only after every entry is back in place, so one
        // entry's normalization can't disturb another's replacement nodes.
        restored.sort_unstable();
        restored.dedup();
        for parent in restored {
            if let Err(e) = doc.normalize(parent) {
                debug!("search: normalize {parent} failed: {e}");
            }
        }
        self.matches.clear();
        self.focused = 0;
        self.applied = None;
    }

    /// Clear highlights and forget the term.
    pub fn clear_search(&mut self, doc: &mut Document) {
        self.clear_highlights(doc);
        self.term.clear();
    }

    /// Advance to the next match, wrapping around.
    pub fn next_match<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &mut V) {
        if !self.matches.is_empty() {
            let next = (self.focused + 1) % self.matches.len();
            self.apply_cursor(doc, viewport, next);
        }
    }

    /// Go to the previous match, wrapping around.
    pub fn prev_match<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &mut V) {
        if !self.matches.is_empty() {
            let prev = if self.focused == 0 {
                self.matches.len() - 1
            } else {
                self.focused - 1
            };
            self.apply_cursor(doc, viewport, prev);
        }
    }

    /// Move focus to match `index` and bring it into view.
    ///
    /// The only place the current class is toggled, so at most one marker
    /// carries it. Styling or scrolling failures are logged and ignored.
    fn apply_cursor<V: Viewport + ?Sized>(
        &mut self,
        doc: &mut Document,
        viewport: &mut V,
        index: usize,
    ) {
        let Some(target) = self.matches.get(index).map(|m| m.marker) else {
            return;
        };
        if let Some(prev) = self
            .applied
            .take()
            .and_then(|i| self.matches.get(i).map(|m| m.marker))
        {
            self.swap_class(doc, prev, false);
        }
        self.swap_class(doc, target, true);
        self.applied = Some(index);
        self.focused = index;

        if let Err(e) = viewport.scroll_to_center(doc, target) {
            debug!("search: scroll to match {index} failed: {e}");
        }
    }

    fn swap_class(&self, doc: &mut Document, marker: NodeId, current: bool) {
        let (from, to) = if current {
            (&self.style.base_class, &self.style.current_class)
        } else {
            (&self.style.current_class, &self.style.base_class)
        };
        let swapped = doc
            .remove_class(marker, from)
            .and_then(|_| doc.add_class(marker, to));
        if let Err(e) = swapped {
            debug!("search: restyling marker {marker} failed: {e}");
        }
    }

    /// Status line for the search UI: `"3 of 7 results"`, `"No results
    /// found"`, or empty when there is no term.
    pub fn status_text(&self, term: &str) -> String {
        if term.is_empty() {
            String::new()
        } else if self.matches.is_empty() {
            "No results found".to_owned()
        } else {
            format!("{} of {} results", self.focused + 1, self.matches.len())
        }
    }
}

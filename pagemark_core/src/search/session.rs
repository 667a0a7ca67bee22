//! Debounced search session.

use std::time::{Duration, Instant};

use log::trace;

use crate::debounce::Debouncer;
use crate::dom::Document;
use crate::viewport::Viewport;

use super::{Highlighter, MarkerStyle, SearchMatch};

/// A `Highlighter` behind a debounce gate.
///
/// `set_search_term` records the term and re-arms the timer; the scan only
/// runs from `tick` once the caller has been quiet for the debounce delay.
/// Time is supplied by the caller so the host event loop stays in charge.
#[derive(Debug)]
pub struct SearchSession {
    highlighter: Highlighter,
    debounce: Debouncer,
    /// Term as typed, ahead of the last scan while the timer is pending.
    term: String,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(MarkerStyle::default(), crate::DEFAULT_DEBOUNCE)
    }
}

impl SearchSession {
    pub fn new(style: MarkerStyle, delay: Duration) -> Self {
        Self {
            highlighter: Highlighter::new(style),
            debounce: Debouncer::new(delay),
            term: String::new(),
        }
    }

    /// Record a new term and restart the debounce timer.
    pub fn set_search_term(&mut self, term: &str, now: Instant) {
        term.clone_into(&mut self.term);
        self.debounce.schedule(now);
        trace!("search: term updated, scan due in {:?}", self.debounce.delay());
    }

    /// Run the pending scan if its deadline has passed. Returns whether a
    /// scan (or a clear, for a blank term) ran.
    pub fn tick<V: Viewport + ?Sized>(
        &mut self,
        now: Instant,
        doc: &mut Document,
        viewport: &mut V,
    ) -> bool {
        if !self.debounce.poll(now) {
            return false;
        }
        self.highlighter.search(doc, viewport, &self.term);
        true
    }

    /// Run the pending scan immediately, if any.
    pub fn flush<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &mut V) -> bool {
        if !self.debounce.cancel() {
            return false;
        }
        self.highlighter.search(doc, viewport, &self.term);
        true
    }

    /// When the pending scan is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    pub fn next<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &mut V) {
        self.highlighter.next_match(doc, viewport);
    }

    pub fn prev<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &mut V) {
        self.highlighter.prev_match(doc, viewport);
    }

    /// Drop the pending scan, restore the page, and forget the term.
    pub fn clear(&mut self, doc: &mut Document) {
        self.debounce.cancel();
        self.highlighter.clear_search(doc);
        self.term.clear();
    }

    /// Owner is going away: cancel the timer and restore the page now.
    pub fn teardown(&mut self, doc: &mut Document) {
        self.debounce.cancel();
        self.highlighter.clear_highlights(doc);
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn results(&self) -> &[SearchMatch] {
        self.highlighter.matches()
    }

    /// Focused match index, in `[0, results().len())`, or 0 with no results.
    pub fn current_index(&self) -> usize {
        self.highlighter.focused()
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn status_text(&self) -> String {
        self.highlighter.status_text(&self.term)
    }
}

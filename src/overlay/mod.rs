//! Search overlay: the input box shown over the page.
//!
//! Owns a `SearchSession` and maps keystrokes and bridge commands onto it.
//! The overlay never outlives a dirty page: closing it always restores the
//! document.

use std::time::{Duration, Instant};

use log::debug;
use serde::Serialize;

use pagemark_core::{Document, MarkerStyle, SearchSession, Viewport};

use crate::command::Command;


/// Keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Char(char),
}

/// Snapshot reported back to the UI after each event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub open: bool,
    pub term: String,
    pub results: usize,
    pub current_index: usize,
    pub pending: bool,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct SearchOverlay {
    session: SearchSession,
    open: bool,
}

impl SearchOverlay {
    pub fn new(style: MarkerStyle, debounce: Duration) -> Self {
        Self {
            session: SearchSession::new(style, debounce),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the overlay, cancel any pending scan and restore the page.
    pub fn close(&mut self, doc: &mut Document) {
        self.session.clear(doc);
        self.session.teardown(doc);
        self.open = false;
        debug!("overlay: closed");
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Replace the input text.
    pub fn set_input(&mut self, term: &str, now: Instant) {
        self.session.set_search_term(term, now);
    }

    /// Handle a key while open. Returns whether the UI needs a redraw.
    pub fn handle_key<V: Viewport + ?Sized>(
        &mut self,
        key: Key,
        shift: bool,
        now: Instant,
        doc: &mut Document,
        viewport: &mut V,
    ) -> bool {
        if !self.open {
            return false;
        }
        match key {
            Key::Escape => self.close(doc),
            Key::Enter => self.step(shift, doc, viewport),
            Key::Backspace => {
                let mut term = self.session.term().to_owned();
                if term.pop().is_none() {
                    return false;
                }
                self.session.set_search_term(&term, now);
            }
            Key::Char(c) => {
                let mut term = self.session.term().to_owned();
                term.push(c);
                self.session.set_search_term(&term, now);
            }
        }
        true
    }

    /// Move to the next (or previous) match. With a scan still pending, run
    /// it now instead, so the first step lands on the first new match.
    fn step<V: Viewport + ?Sized>(&mut self, backwards: bool, doc: &mut Document, viewport: &mut V) {
        if self.session.flush(doc, viewport) {
            return;
        }
        if backwards {
            self.session.prev(doc, viewport);
        } else {
            self.session.next(doc, viewport);
        }
    }

    /// Drive the debounce timer from the host loop.
    pub fn tick<V: Viewport + ?Sized>(
        &mut self,
        now: Instant,
        doc: &mut Document,
        viewport: &mut V,
    ) -> bool {
        self.session.tick(now, doc, viewport)
    }

    /// Apply a bridge command. A term update opens the overlay if needed.
    pub fn dispatch<V: Viewport + ?Sized>(
        &mut self,
        command: &Command,
        now: Instant,
        doc: &mut Document,
        viewport: &mut V,
    ) -> Status {
        match command {
            Command::SetTerm { term } => {
                self.open = true;
                self.session.set_search_term(term, now);
            }
            Command::Next => self.step(false, doc, viewport),
            Command::Prev => self.step(true, doc, viewport),
            Command::Clear => self.session.clear(doc),
            Command::Close => self.close(doc),
        }
        self.status()
    }

    pub fn status(&self) -> Status {
        Status {
            open: self.open,
            term: self.session.term().to_owned(),
            results: self.session.results().len(),
            current_index: self.session.current_index(),
            pending: self.session.is_pending(),
            text: self.session.status_text(),
        }
    }
}

//! Core in-page search data structures and logic.
//!
//! This crate provides the foundational types for searching a live page:
//! a generational document arena standing in for the host DOM, a text
//! walker that skips non-rendering content, the highlight engine with its
//! undo log, and the debounce timer that gates rescans. It contains no I/O,
//! parsing, or platform-specific code.

#![deny(unsafe_code)]

pub mod debounce;
pub mod dom;
pub mod search;
pub mod viewport;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use dom::{Document, DomError, ElementData, NodeId, NodeKind};
pub use search::{Highlighter, LiteralPattern, MarkerStyle, SearchMatch, SearchSession, Segment};
pub use viewport::{NoopViewport, Viewport, ViewportError};

//! Viewport seam between the search engine and the host's scrolling.
//!
//! Bringing the focused match into view is a display side effect owned by
//! the host. The engine calls `Viewport::scroll_to_center` and logs any
//! failure without letting it affect search state. Tests and headless
//! hosts use `NoopViewport`.

use crate::dom::{Document, NodeId};

/// Why the host could not scroll to an element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewportError {
    #[error("node {0} is not connected to the document")]
    Disconnected(NodeId),
    #[error("host scroll failed: {0}")]
    Host(String),
}

/// Scrolls elements into view on behalf of the engine.
///
/// The default implementation does nothing, so `NoopViewport` needs no
/// method body.
pub trait Viewport {
    /// Smooth-scroll so `node` is vertically centered.
    fn scroll_to_center(&mut self, doc: &Document, node: NodeId) -> Result<(), ViewportError> {
        let _ = (doc, node);
        Ok(())
    }
}

/// A viewport that never scrolls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViewport;

impl Viewport for NoopViewport {}

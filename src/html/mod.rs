//! Build a `Document` from HTML source.
//!
//! Parsing is delegated to `scraper` (html5ever), so malformed markup is
//! repaired the way a browser would: a missing `<body>` is synthesized and
//! stray text lands inside it. Comments, doctypes and processing
//! instructions are dropped; elements, attributes and text are kept.

use log::debug;
use scraper::{Html, Node};

use pagemark_core::{Document, DomError};

#[cfg(test)]
mod tests;

/// Parse a full page.
pub fn load_document(source: &str) -> Result<Document, DomError> {
    let html = Html::parse_document(source);
    if !html.errors.is_empty() {
        debug!("html: parser recovered from {} errors", html.errors.len());
    }

    let mut doc = Document::new();
    let root = doc.root();
    let mut stack = vec![(html.tree.root(), root)];
    while let Some((source_node, parent)) = stack.pop() {
        for child in source_node.children() {
            let id = match child.value() {
                Node::Element(el) => {
                    let id = doc.create_element(el.name());
                    for (name, value) in el.attrs() {
                        doc.set_attr(id, name, value)?;
                    }
                    stack.push((child, id));
                    id
                }
                Node::Text(text) => doc.create_text(text),
                _ => continue,
            };
            doc.append_child(parent, id)?;
        }
    }
    debug!("html: loaded {} nodes", doc.node_count());
    Ok(doc)
}

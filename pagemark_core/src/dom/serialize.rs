//! Text extraction and deterministic HTML serialization.

use super::{Document, ElementData, NodeId, NodeKind};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text is emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl Document {
    /// Concatenated text of every text node under `id`, like DOM
    /// `textContent`. Non-rendering elements are included.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Serialize the children of `id` as HTML (`innerHTML`).
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let raw = self.tag(id).is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t));
        for &child in self.children(id) {
            self.write_node(child, raw, &mut out);
        }
        out
    }

    /// Serialize `id` and its subtree as HTML (`outerHTML`). The document
    /// root serializes as its children.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, false, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, raw: bool, out: &mut String) {
        let mut stack = vec![Step::Enter(id, raw)];
        while let Some(step) = stack.pop() {
            let (id, raw) = match step {
                Step::Close(tag) => {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                    continue;
                }
                Step::Enter(id, raw) => (id, raw),
            };
            let Some(node) = self.get(id) else {
                continue;
            };
            let children = node.children.iter().rev();
            match &node.kind {
                NodeKind::Document => {
                    stack.extend(children.map(|&child| Step::Enter(child, false)));
                }
                NodeKind::Text(text) if raw => out.push_str(text),
                NodeKind::Text(text) => escape_into(text, false, out),
                NodeKind::Element(el) => {
                    write_open_tag(el, out);
                    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                        continue;
                    }
                    let raw_text = RAW_TEXT_ELEMENTS.contains(&el.tag.as_str());
                    stack.push(Step::Close(&el.tag));
                    stack.extend(children.map(|&child| Step::Enter(child, raw_text)));
                }
            }
        }
    }
}

/// Pending serializer work, processed last-in first-out.
enum Step<'a> {
    /// Write a node; the flag marks text inside a raw-text element.
    Enter(NodeId, bool),
    Close(&'a str),
}

fn write_open_tag(el: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    if !el.classes.is_empty() {
        out.push_str(" class=\"");
        escape_into(&el.classes.join(" "), true, out);
        out.push('"');
    }
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

//! Tests for the document arena.

use super::{Document, DomError, NodeKind};

/// `<body><p>Hello <b>big</b> world</p><script>var x;</script></body>`
fn sample() -> Document {
    let mut doc = Document::new();
    let body = doc.create_element("body");
    doc.append_child(doc.root(), body).unwrap();
    let p = doc.create_element("p");
    doc.append_child(body, p).unwrap();
    let hello = doc.create_text("Hello ");
    doc.append_child(p, hello).unwrap();
    let b = doc.create_element("b");
    doc.append_child(p, b).unwrap();
    let big = doc.create_text("big");
    doc.append_child(b, big).unwrap();
    let world = doc.create_text(" world");
    doc.append_child(p, world).unwrap();
    let script = doc.create_element("script");
    doc.append_child(body, script).unwrap();
    let code = doc.create_text("var x;");
    doc.append_child(script, code).unwrap();
    doc
}

#[test]
fn new_document_has_only_root() {
    let doc = Document::new();
    assert_eq!(doc.node_count(), 1);
    assert_eq!(doc.body(), doc.root());
    assert!(matches!(doc.get(doc.root()).unwrap().kind(), NodeKind::Document));
}

#[test]
fn body_is_found_below_root() {
    let doc = sample();
    assert_eq!(doc.tag(doc.body()), Some("body"));
}

#[test]
fn tags_are_lowercased() {
    let mut doc = Document::new();
    let div = doc.create_element("DIV");
    assert_eq!(doc.tag(div), Some("div"));
}

#[test]
fn text_content_includes_every_text_node() {
    let doc = sample();
    assert_eq!(doc.text_content(doc.body()), "Hello big worldvar x;");
}

#[test]
fn serialize_escapes_text_but_not_scripts() {
    let mut doc = Document::new();
    let p = doc.create_element("p");
    doc.append_child(doc.root(), p).unwrap();
    let t = doc.create_text("a < b & c");
    doc.append_child(p, t).unwrap();
    let style = doc.create_element("style");
    doc.append_child(doc.root(), style).unwrap();
    let css = doc.create_text("a > b {}");
    doc.append_child(style, css).unwrap();
    let br = doc.create_element("br");
    doc.append_child(doc.root(), br).unwrap();

    assert_eq!(
        doc.to_html(doc.root()),
        "<p>a &lt; b &amp; c</p><style>a > b {}</style><br>"
    );
}

#[test]
fn serialize_writes_class_then_attributes() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.set_attr(a, "href", "/x?a=1&b=\"2\"").unwrap();
    doc.set_attr(a, "class", "one two one").unwrap();
    assert_eq!(
        doc.to_html(a),
        "<a class=\"one two\" href=\"/x?a=1&amp;b=&quot;2&quot;\"></a>"
    );
    assert_eq!(doc.attr(a, "class").as_deref(), Some("one two"));
    assert_eq!(doc.attr(a, "HREF").as_deref(), Some("/x?a=1&b=\"2\""));
}

#[test]
fn class_toggling() {
    let mut doc = Document::new();
    let mark = doc.create_element("mark");
    assert!(doc.add_class(mark, "hit").unwrap());
    assert!(!doc.add_class(mark, "hit").unwrap());
    assert!(doc.has_class(mark, "hit"));
    assert!(doc.remove_class(mark, "hit").unwrap());
    assert!(!doc.remove_class(mark, "hit").unwrap());
    assert!(!doc.has_class(mark, "hit"));

    let text = doc.create_text("x");
    assert_eq!(doc.add_class(text, "hit"), Err(DomError::NotAnElement(text)));
}

#[test]
fn append_rejects_attached_child_and_cycles() {
    let mut doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("span");
    doc.append_child(doc.root(), outer).unwrap();
    doc.append_child(outer, inner).unwrap();

    assert_eq!(
        doc.append_child(doc.root(), inner),
        Err(DomError::AlreadyAttached(inner))
    );

    let loose = doc.create_element("div");
    let loose_child = doc.create_element("div");
    doc.append_child(loose, loose_child).unwrap();
    assert_eq!(
        doc.append_child(loose_child, loose),
        Err(DomError::Cycle {
            parent: loose_child,
            child: loose,
        })
    );

    let text = doc.create_text("leaf");
    let other = doc.create_text("other");
    assert_eq!(
        doc.append_child(text, other),
        Err(DomError::NotAContainer(text))
    );
}

#[test]
fn text_leaves_skip_exempt_parents_only() {
    let mut doc = sample();
    let body = doc.body();
    // <noscript><i>deep</i>shallow</noscript>
    let noscript = doc.create_element("noscript");
    doc.append_child(body, noscript).unwrap();
    let i = doc.create_element("i");
    doc.append_child(noscript, i).unwrap();
    let deep = doc.create_text("deep");
    doc.append_child(i, deep).unwrap();
    let shallow = doc.create_text("shallow");
    doc.append_child(noscript, shallow).unwrap();

    let texts: Vec<String> = doc
        .text_leaves(body, |tag| tag == "script" || tag == "noscript")
        .filter_map(|id| doc.text(id).map(str::to_owned))
        .collect();
    assert_eq!(texts, ["Hello ", "big", " world", "deep"]);

    let all: Vec<String> = doc
        .text_leaves(body, |_| false)
        .filter_map(|id| doc.text(id).map(str::to_owned))
        .collect();
    assert_eq!(all, ["Hello ", "big", " world", "var x;", "deep", "shallow"]);
}

#[test]
fn replace_with_nodes_keeps_position_and_siblings() {
    let mut doc = sample();
    let p = doc.find_element(doc.root(), "p").unwrap();
    let b = doc.find_element(doc.root(), "b").unwrap();
    let hello = doc.children(p)[0];

    let x = doc.create_text("X");
    let y = doc.create_element("i");
    doc.replace_with_nodes(p, hello, &[x, y]).unwrap();

    assert_eq!(doc.children(p), &[x, y, b, doc.children(p)[3]]);
    assert_eq!(doc.parent(hello), None);
    assert_eq!(doc.parent(x), Some(p));
    assert_eq!(doc.children(p)[2], b);
}

#[test]
fn replace_range_requires_contiguous_children() {
    let mut doc = sample();
    let p = doc.find_element(doc.root(), "p").unwrap();
    let hello = doc.children(p)[0];
    let world = doc.children(p)[2];
    let replacement = doc.create_text("?");

    let err = doc.replace_range(p, &[hello, world], &[replacement]);
    assert_eq!(
        err,
        Err(DomError::NotAChild {
            parent: p,
            child: world,
        })
    );
    // Nothing changed.
    assert_eq!(doc.children(p).len(), 3);
    assert_eq!(doc.parent(replacement), None);
}

#[test]
fn release_makes_handles_stale_and_reuses_slots() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let text = doc.create_text("x");
    doc.append_child(div, text).unwrap();
    let before = doc.node_count();

    doc.release(div).unwrap();
    assert_eq!(doc.node_count(), before - 2);
    assert!(!doc.contains(div));
    assert!(!doc.contains(text));
    assert_eq!(doc.tag(div), None);

    let fresh = doc.create_element("span");
    assert_ne!(fresh, div);
    assert_ne!(fresh, text);
    assert!(!doc.contains(div));
    assert_eq!(doc.add_class(div, "x"), Err(DomError::StaleNode(div)));
}

#[test]
fn release_refuses_attached_nodes() {
    let mut doc = sample();
    let p = doc.find_element(doc.root(), "p").unwrap();
    assert_eq!(doc.release(p), Err(DomError::AlreadyAttached(p)));
    assert_eq!(
        doc.release(doc.root()),
        Err(DomError::AlreadyAttached(doc.root()))
    );
}

#[test]
fn detach_disconnects_subtree() {
    let mut doc = sample();
    let p = doc.find_element(doc.root(), "p").unwrap();
    let b = doc.find_element(doc.root(), "b").unwrap();
    assert!(doc.is_connected(b));

    doc.detach(p).unwrap();
    assert!(!doc.is_connected(p));
    assert!(!doc.is_connected(b));
    assert!(doc.contains(b));
    doc.detach(p).unwrap();
}

#[test]
fn clone_node_is_shallow_and_detached() {
    let mut doc = sample();
    let p = doc.find_element(doc.root(), "p").unwrap();
    doc.add_class(p, "lead").unwrap();
    let copy = doc.clone_node(p).unwrap();
    assert_eq!(doc.parent(copy), None);
    assert!(doc.children(copy).is_empty());
    assert!(doc.has_class(copy, "lead"));
    assert_eq!(
        doc.clone_node(doc.root()),
        Err(DomError::NotAnElement(doc.root()))
    );
}

#[test]
fn normalize_merges_adjacent_text_and_drops_empty() {
    let mut doc = Document::new();
    let p = doc.create_element("p");
    doc.append_child(doc.root(), p).unwrap();
    let parts = ["The c", "", "at", " sat"];
    let ids: Vec<_> = parts
        .iter()
        .map(|t| {
            let id = doc.create_text(t);
            doc.append_child(p, id).unwrap();
            id
        })
        .collect();
    let em = doc.create_element("em");
    doc.append_child(p, em).unwrap();
    let a = doc.create_text("x");
    let b = doc.create_text("y");
    doc.append_child(em, a).unwrap();
    doc.append_child(em, b).unwrap();
    let count = doc.node_count();

    doc.normalize(p).unwrap();

    assert_eq!(doc.children(p), &[ids[0], em]);
    assert_eq!(doc.text(ids[0]), Some("The cat sat"));
    assert_eq!(doc.children(em), &[a]);
    assert_eq!(doc.text(a), Some("xy"));
    assert!(!doc.contains(ids[1]));
    assert_eq!(doc.node_count(), count - 4);
}

#[test]
fn elements_with_class_in_document_order() {
    let mut doc = sample();
    let p = doc.find_element(doc.root(), "p").unwrap();
    let b = doc.find_element(doc.root(), "b").unwrap();
    doc.add_class(b, "hit").unwrap();
    doc.add_class(p, "hit").unwrap();
    assert_eq!(doc.elements_with_class(doc.root(), "hit"), vec![p, b]);
}

#[test]
fn serialize_handles_deep_nesting() {
    const DEPTH: usize = 100_000;
    let mut doc = Document::new();
    let body = doc.create_element("body");
    doc.append_child(doc.root(), body).unwrap();
    // Built inside out so every append attaches under a parentless node.
    let mut top = doc.create_text("a<b");
    for _ in 0..DEPTH {
        let div = doc.create_element("div");
        doc.append_child(div, top).unwrap();
        top = div;
    }
    doc.append_child(body, top).unwrap();

    let html = doc.inner_html(body);
    assert_eq!(html.len(), DEPTH * "<div></div>".len() + "a&lt;b".len());
    assert!(html.starts_with("<div><div>"));
    assert!(html.ends_with("a&lt;b</div></div>"));
    assert_eq!(doc.text_content(body), "a<b");
}

//! HTML loader tests.

use pagemark_core::{Highlighter, NoopViewport};

use super::load_document;

#[test]
fn builds_body_text() {
    let doc = load_document("<p>The cat sat on the mat.</p>").expect("load");
    let body = doc.body();
    assert_eq!(doc.tag(body), Some("body"));
    assert_eq!(doc.text_content(body), "The cat sat on the mat.");
    assert_eq!(doc.inner_html(body), "<p>The cat sat on the mat.</p>");
}

#[test]
fn keeps_attributes_and_classes() {
    let doc = load_document(r#"<div class="a  b" id="x" data-t="1">hi</div>"#).expect("load");
    let div = doc.find_element(doc.root(), "div").expect("div");
    assert!(doc.has_class(div, "a"));
    assert!(doc.has_class(div, "b"));
    assert_eq!(doc.attr(div, "id").as_deref(), Some("x"));
    assert_eq!(doc.attr(div, "data-t").as_deref(), Some("1"));
}

#[test]
fn drops_comments_and_doctype() {
    let doc = load_document("<!DOCTYPE html><p>a<!-- hidden -->b</p>").expect("load");
    let p = doc.find_element(doc.root(), "p").expect("p");
    assert_eq!(doc.children(p).len(), 2);
    assert_eq!(doc.text_content(p), "ab");
    assert!(!doc.to_html(doc.root()).contains("hidden"));
}

#[test]
fn keeps_script_text_verbatim() {
    let doc = load_document(r#"<body><script>var s = "<b>";</script></body>"#).expect("load");
    let script = doc.find_element(doc.root(), "script").expect("script");
    assert_eq!(doc.text_content(script), r#"var s = "<b>";"#);
    assert_eq!(
        doc.inner_html(doc.body()),
        r#"<script>var s = "<b>";</script>"#
    );
}

#[test]
fn repairs_missing_structure() {
    let doc = load_document("loose <b>text").expect("load");
    let body = doc.body();
    assert_eq!(doc.tag(body), Some("body"));
    assert_eq!(doc.text_content(body), "loose text");
    assert!(doc.find_element(doc.root(), "head").is_some());
}

#[test]
fn loaded_page_survives_search_cycle() {
    let source = concat!(
        "<div id=\"player\"><h1>Lecture</h1>",
        "<p class=\"line\">The cat sat on the <i>mat</i>.</p>",
        "<script>var cat = 1;</script>",
        "<style>.cat { color: red }</style></div>",
    );
    let mut doc = load_document(source).expect("load");
    let before = doc.inner_html(doc.body());

    let mut hl = Highlighter::default();
    assert_eq!(hl.search(&mut doc, &mut NoopViewport, "AT"), 3);
    assert_eq!(
        doc.elements_with_class(doc.root(), "search-highlight-current")
            .len(),
        1
    );

    hl.clear_highlights(&mut doc);
    assert_eq!(doc.inner_html(doc.body()), before);
}

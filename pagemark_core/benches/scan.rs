//! Benchmarks for the search hot path.
//!
//! Models a long transcript page: many paragraphs of mixed inline markup,
//! searched for a common short term (many matches) and a rare one (few
//! matches), then cleared. Sizes roughly match a short clip, a lecture, and
//! a multi-hour stream transcript.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use pagemark_core::dom::{Document, NodeId};
use pagemark_core::search::Highlighter;
use pagemark_core::viewport::NoopViewport;

/// Paragraph counts that represent real transcript lengths.
const SIZES: [usize; 3] = [100, 1_000, 10_000];

const SENTENCES: [&str; 4] = [
    "So the first thing we want to look at is the data layout.",
    "Notice how the cache line boundary changes everything here.",
    "If you remember from last week, allocation was the bottleneck.",
    "Let's pause and take a look at the flame graph together.",
];

fn append(doc: &mut Document, parent: NodeId, child: NodeId) {
    doc.append_child(parent, child).expect("fresh nodes attach");
}

/// `<body>` with `paragraphs` of `<p>text <b>text</b> text</p>` plus a
/// script block every 50 paragraphs.
fn transcript(paragraphs: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let body = doc.create_element("body");
    append(&mut doc, root, body);
    for i in 0..paragraphs {
        let p = doc.create_element("p");
        append(&mut doc, body, p);
        let lead = doc.create_text(SENTENCES[i % 4]);
        append(&mut doc, p, lead);
        let b = doc.create_element("b");
        append(&mut doc, p, b);
        let bold = doc.create_text(SENTENCES[(i + 1) % 4]);
        append(&mut doc, b, bold);
        let tail = doc.create_text(SENTENCES[(i + 2) % 4]);
        append(&mut doc, p, tail);
        if i % 50 == 0 {
            let script = doc.create_element("script");
            append(&mut doc, body, script);
            let code = doc.create_text("window.look = 'at the data';");
            append(&mut doc, script, code);
        }
    }
    doc
}

fn bench_scan_and_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_and_clear");
    for &size in &SIZES {
        for term in ["the", "flame graph"] {
            group.bench_with_input(BenchmarkId::new(term, size), &size, |b, &size| {
                let mut doc = transcript(size);
                let mut hl = Highlighter::default();
                b.iter(|| {
                    let n = hl.search(&mut doc, &mut NoopViewport, black_box(term));
                    hl.clear_highlights(&mut doc);
                    black_box(n)
                });
            });
        }
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut doc = transcript(1_000);
    let mut hl = Highlighter::default();
    hl.search(&mut doc, &mut NoopViewport, "the");
    c.bench_function("next_match_1000", |b| {
        b.iter(|| hl.next_match(&mut doc, &mut NoopViewport));
    });
}

criterion_group!(benches, bench_scan_and_clear, bench_navigation);
criterion_main!(benches);

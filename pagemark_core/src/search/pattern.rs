//! Case-insensitive literal matching.

use regex::{Regex, RegexBuilder};

/// A piece of a text leaf after splitting on a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    Plain(&'t str),
    Match(&'t str),
}

/// A search term compiled for case-insensitive substring matching.
///
/// The term is escaped before compilation, so `a.b*c` only ever matches
/// the five characters `a.b*c`.
#[derive(Debug, Clone)]
pub struct LiteralPattern {
    regex: Regex,
}

impl LiteralPattern {
    /// Compile `term`. Only fails for terms too large for the regex engine.
    pub fn new(term: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.find_iter(text).any(|m| !m.is_empty())
    }

    /// Split `text` into alternating plain and matching segments, left to
    /// right, non-overlapping. Empty segments are never produced.
    pub fn split<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let mut segments = Vec::new();
        let mut last = 0;
        for m in self.regex.find_iter(text) {
            if m.is_empty() {
                continue;
            }
            if let Some(plain) = text.get(last..m.start()).filter(|s| !s.is_empty()) {
                segments.push(Segment::Plain(plain));
            }
            segments.push(Segment::Match(m.as_str()));
            last = m.end();
        }
        if let Some(rest) = text.get(last..).filter(|s| !s.is_empty()) {
            segments.push(Segment::Plain(rest));
        }
        segments
    }
}

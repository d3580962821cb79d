//! Rendering helpers for visualizers
//!
//! Small, pure functions that turn provenance spans back into something a person can read:
//! the raw text with the contributing words marked, or the raw words of one processed token
//! chained together. Spans that do not fit the text are skipped rather than reported, since
//! these helpers are for display only.

use crate::prep::pipeline::ProcessedDocument;
use crate::prep::token::Span;
use serde::Serialize;

/// Wrap every span of `text` in `open`/`close`. Spans are sorted and overlapping ones merged,
/// so markers never nest.
pub fn highlight(text: &str, spans: &[Span], open: &str, close: &str) -> String {
    let mut sorted: Vec<Span> = spans.iter().copied().filter(|s| s.fits(text)).collect();
    sorted.sort();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some((_, end)) if span.start() < *end => *end = (*end).max(span.end()),
            _ => merged.push((span.start(), span.end())),
        }
    }

    let mut out = String::with_capacity(text.len() + merged.len() * (open.len() + close.len()));
    let mut cursor = 0;
    for (start, end) in merged {
        out.push_str(&text[cursor..start]);
        out.push_str(open);
        out.push_str(&text[start..end]);
        out.push_str(close);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// The raw substrings at `spans`, in span order, joined by `arrow`.
pub fn chain(text: &str, spans: &[Span], arrow: &str) -> String {
    spans
        .iter()
        .filter_map(|span| span.slice(text))
        .collect::<Vec<_>>()
        .join(arrow)
}

/// One processed token next to the raw words it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub processed: String,
    pub raw: String,
    pub spans: Vec<Span>,
}

/// An [`Explanation`] for every token of `document`, in emission order.
pub fn explain(text: &str, document: &ProcessedDocument, arrow: &str) -> Vec<Explanation> {
    document
        .tokens()
        .iter()
        .map(|token| Explanation {
            processed: token.text.clone(),
            raw: chain(text, &token.spans, arrow),
            spans: token.spans.clone(),
        })
        .collect()
}

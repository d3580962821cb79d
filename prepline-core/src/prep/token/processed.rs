//! Processed tokens: stage output with merged provenance
//!
//! The provenance rules every stage follows are encoded here, so stages never touch span lists
//! directly:
//!
//!   - rewriting a token keeps its spans ([`ProcessedToken::with_text`])
//!   - splitting a token gives every piece the same spans (call `with_text` once per piece)
//!   - merging tokens concatenates their spans in input order ([`ProcessedToken::merge`])
//!   - dropping a token drops its spans with it

use crate::prep::token::{RawToken, Span};
use serde::{Deserialize, Serialize};

/// A possibly transformed token (or n-gram) and the raw spans it came from, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessedToken {
    pub text: String,
    pub spans: Vec<Span>,
}

impl ProcessedToken {
    pub fn new(text: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            text: text.into(),
            spans,
        }
    }

    /// Identity copy of a raw token.
    pub fn from_raw(raw: &RawToken) -> Self {
        Self {
            text: raw.text().to_string(),
            spans: vec![raw.span()],
        }
    }

    /// Same provenance, new text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: self.spans.clone(),
        }
    }

    /// Join several tokens into one, texts separated by `connector`, spans concatenated in order.
    pub fn merge(tokens: &[ProcessedToken], connector: &str) -> Self {
        let text = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(connector);
        let spans = tokens.iter().flat_map(|t| t.spans.iter().copied()).collect();
        Self { text, spans }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The raw substrings at this token's spans, in span order.
    ///
    /// Spans that do not fit `source` are skipped.
    pub fn raw_parts<'a>(&self, source: &'a str) -> Vec<&'a str> {
        self.spans.iter().filter_map(|s| s.slice(source)).collect()
    }
}

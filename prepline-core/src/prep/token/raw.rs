//! Raw tokens: words exactly as they appear in the source

use crate::prep::token::Span;
use serde::{Deserialize, Serialize};

/// A word as tokenized: its span and the substring it denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawToken {
    span: Span,
    text: String,
}

impl RawToken {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Build a raw token from a span of `source`, or `None` if the span does not fit.
    pub fn from_source(source: &str, span: Span) -> Option<Self> {
        span.slice(source).map(|text| Self {
            span,
            text: text.to_string(),
        })
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

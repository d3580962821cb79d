//! Byte spans into the original text
//!
//! A [`Span`] is a half-open byte range `start..end` with `start < end`. Empty spans do not
//! exist: the tokenizer never emits an empty word, and nothing downstream may create spans.
//! Offsets are bytes, not characters, so a span can be used to slice the source directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A half-open, non-empty byte range into the original raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct Span {
    start: usize,
    end: usize,
}

#[derive(Deserialize)]
struct RawSpan {
    start: usize,
    end: usize,
}

impl TryFrom<RawSpan> for Span {
    type Error = String;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        Span::new(raw.start, raw.end).ok_or_else(|| {
            format!("span start must be below end, got {}..{}", raw.start, raw.end)
        })
    }
}

impl Span {
    /// Create a span, or `None` when `start >= end`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// A span starting at `start` that covers at least one byte, stretching `end` if needed.
    pub(crate) fn at_least_one(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start + 1),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Create a span from a byte range, or `None` when the range is empty.
    pub fn from_range(range: Range<usize>) -> Option<Self> {
        Self::new(range.start, range.end)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false: spans are never empty. Present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The substring this span denotes in `text`, if it lies within it on char boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.range())
    }

    /// True when the span lies within `text` and on char boundaries.
    pub fn fits(&self, text: &str) -> bool {
        self.slice(text).is_some()
    }

    /// True when the two spans share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}

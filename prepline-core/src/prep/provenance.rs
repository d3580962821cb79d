//! Provenance index
//!
//!     Maps processed text back to the raw spans it came from. Built once per processed
//!     document from the pipeline's final token list, read-only afterwards.
//!
//! Keys and Occurrences
//!
//!     Entries are keyed by exact processed text. The same text can be emitted several times
//!     in one document (every "time" in a long review), so each key maps to all of its
//!     occurrences in emission order. A query can ask for the first occurrence only or for all
//!     of them. Positional access goes through [`ProvenanceIndex::at`].
//!
//!     A miss is an empty result, not an error: querying text that was never emitted (an
//!     unstemmed form, a differently joined n-gram) is an ordinary outcome for a visualizer.

use crate::prep::token::{ProcessedToken, Span};
use std::collections::HashMap;

/// Which occurrences a lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// Spans of the first occurrence only.
    First,
    /// Spans of every occurrence, in emission order.
    #[default]
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvenanceIndex {
    entries: Vec<ProcessedToken>,
    by_text: HashMap<String, Vec<usize>>,
}

impl ProvenanceIndex {
    pub fn build(tokens: &[ProcessedToken]) -> Self {
        let mut by_text: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, token) in tokens.iter().enumerate() {
            by_text.entry(token.text.clone()).or_default().push(position);
        }
        Self {
            entries: tokens.to_vec(),
            by_text,
        }
    }

    /// Spans of every occurrence of `text`, occurrence by occurrence.
    pub fn lookup(&self, text: &str) -> Vec<Span> {
        self.lookup_with(text, LookupMode::All)
    }

    /// Spans of the first occurrence of `text`.
    pub fn lookup_first(&self, text: &str) -> Vec<Span> {
        self.lookup_with(text, LookupMode::First)
    }

    pub fn lookup_with(&self, text: &str, mode: LookupMode) -> Vec<Span> {
        let mut occurrences = self.occurrences(text);
        match mode {
            LookupMode::First => occurrences
                .next()
                .map(|spans| spans.to_vec())
                .unwrap_or_default(),
            LookupMode::All => occurrences.flatten().copied().collect(),
        }
    }

    /// Span lists of each occurrence of `text`, in emission order.
    pub fn occurrences<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a [Span]> + 'a {
        self.by_text
            .get(text)
            .map(|positions| positions.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&position| self.entries[position].spans())
    }

    /// Number of times `text` was emitted.
    pub fn count(&self, text: &str) -> usize {
        self.by_text.get(text).map_or(0, Vec::len)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.by_text.contains_key(text)
    }

    /// The token emitted at `position`.
    pub fn at(&self, position: usize) -> Option<&ProcessedToken> {
        self.entries.get(position)
    }

    /// Positions of every token whose spans overlap `span`: the reverse direction, from a
    /// selection in the raw text to the processed tokens it fed.
    pub fn covering(&self, span: Span) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, token)| token.spans.iter().any(|s| s.overlaps(&span)))
            .map(|(position, _)| position)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessedToken> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prep::testing::factories::mk_processed;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end).unwrap()
    }

    fn sample() -> ProvenanceIndex {
        ProvenanceIndex::build(&mk_processed(&[
            ("time", &[(0, 4)]),
            ("wast your time", &[(10, 17), (18, 22), (23, 27)]),
            ("time", &[(23, 27)]),
        ]))
    }

    #[test]
    fn test_lookup_ngram() {
        let index = sample();
        assert_eq!(
            index.lookup("wast your time"),
            vec![span(10, 17), span(18, 22), span(23, 27)]
        );
    }

    #[test]
    fn test_lookup_all_occurrences() {
        let index = sample();
        assert_eq!(index.lookup("time"), vec![span(0, 4), span(23, 27)]);
        assert_eq!(index.count("time"), 2);
    }

    #[test]
    fn test_lookup_first_occurrence() {
        let index = sample();
        assert_eq!(index.lookup_first("time"), vec![span(0, 4)]);
        assert_eq!(
            index.lookup_with("time", LookupMode::First),
            index.lookup_first("time")
        );
    }

    #[test]
    fn test_miss_is_empty() {
        let index = sample();
        assert!(index.lookup("wasting").is_empty());
        assert!(index.lookup_first("wasting").is_empty());
        assert_eq!(index.occurrences("wasting").count(), 0);
        assert!(!index.contains("wasting"));
    }

    #[test]
    fn test_positional_access() {
        let index = sample();
        assert_eq!(index.len(), 3);
        assert_eq!(index.at(1).map(|t| t.text()), Some("wast your time"));
        assert!(index.at(3).is_none());
    }

    #[test]
    fn test_occurrences_are_separate() {
        let index = sample();
        let occurrences: Vec<_> = index.occurrences("time").collect();
        assert_eq!(occurrences, vec![&[span(0, 4)][..], &[span(23, 27)][..]]);
    }

    #[test]
    fn test_covering() {
        let index = sample();
        assert_eq!(index.covering(span(24, 25)), vec![1, 2]);
        assert!(index.covering(span(5, 9)).is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = ProvenanceIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}

//! The token stream handed from stage to stage
//!
//! Stages take the stream by value and return a new one. The helpers here apply a per-token
//! function while keeping provenance right, which is what most stages need.

use crate::prep::error::StageError;
use crate::prep::token::{ProcessedToken, RawToken};

/// Ordered sequence of processed tokens flowing through a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<ProcessedToken>,
}

impl TokenStream {
    pub fn new(tokens: Vec<ProcessedToken>) -> Self {
        Self { tokens }
    }

    /// Identity stream over raw tokens.
    pub fn from_raw(raw: &[RawToken]) -> Self {
        Self {
            tokens: raw.iter().map(ProcessedToken::from_raw).collect(),
        }
    }

    pub fn tokens(&self) -> &[ProcessedToken] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<ProcessedToken> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Texts only, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Replace each token with zero or more texts. Every output keeps the spans of the token
    /// it came from.
    pub fn flat_map<F>(self, mut f: F) -> Result<Self, StageError>
    where
        F: FnMut(&ProcessedToken) -> Result<Vec<String>, StageError>,
    {
        let mut out = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            for text in f(token)? {
                out.push(token.with_text(text));
            }
        }
        Ok(Self { tokens: out })
    }

    /// Rewrite or drop each token. `None` drops the token and its spans.
    pub fn filter_map<F>(self, mut f: F) -> Result<Self, StageError>
    where
        F: FnMut(&ProcessedToken) -> Result<Option<String>, StageError>,
    {
        let mut out = Vec::with_capacity(self.tokens.len());
        for token in self.tokens {
            if let Some(text) = f(&token)? {
                out.push(ProcessedToken {
                    text,
                    spans: token.spans,
                });
            }
        }
        Ok(Self { tokens: out })
    }

    /// Rewrite every token's text in place. Infallible.
    pub fn map_text<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        for token in &mut self.tokens {
            token.text = f(&token.text);
        }
        self
    }
}

impl From<Vec<ProcessedToken>> for TokenStream {
    fn from(tokens: Vec<ProcessedToken>) -> Self {
        Self::new(tokens)
    }
}

impl IntoIterator for TokenStream {
    type Item = ProcessedToken;
    type IntoIter = std::vec::IntoIter<ProcessedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prep::token::Span;

    fn stream(words: &[(&str, usize, usize)]) -> TokenStream {
        TokenStream::new(
            words
                .iter()
                .map(|(t, s, e)| ProcessedToken::new(*t, vec![Span::new(*s, *e).unwrap()]))
                .collect(),
        )
    }

    #[test]
    fn test_flat_map_split_propagates_spans() {
        let input = stream(&[("well-known", 0, 10)]);
        let out = input
            .flat_map(|t| Ok(t.text.split('-').map(str::to_string).collect()))
            .unwrap();
        assert_eq!(out.texts(), vec!["well", "known"]);
        assert_eq!(out.tokens()[0].spans, out.tokens()[1].spans);
        assert_eq!(out.tokens()[0].spans, vec![Span::new(0, 10).unwrap()]);
    }

    #[test]
    fn test_filter_map_drops_tokens_and_their_spans() {
        let input = stream(&[("the", 0, 3), ("cat", 4, 7)]);
        let out = input
            .filter_map(|t| Ok((t.text != "the").then(|| t.text.clone())))
            .unwrap();
        assert_eq!(out.texts(), vec!["cat"]);
        assert_eq!(out.tokens()[0].spans, vec![Span::new(4, 7).unwrap()]);
    }

    #[test]
    fn test_flat_map_error_stops_processing() {
        let input = stream(&[("a", 0, 1), ("b", 2, 3), ("c", 4, 5)]);
        let mut seen = Vec::new();
        let result = input.flat_map(|t| {
            seen.push(t.text.clone());
            if t.text == "b" {
                Err(StageError::new("test", &t.text, t.spans.clone(), "no b"))
            } else {
                Ok(vec![t.text.clone()])
            }
        });
        assert!(result.is_err());
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_map_text_preserves_order() {
        let input = stream(&[("Ab", 0, 2), ("Cd", 3, 5)]);
        let out = input.map_text(|t| t.to_lowercase());
        assert_eq!(out.texts(), vec!["ab", "cd"]);
    }
}

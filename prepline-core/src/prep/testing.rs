//! Testing utilities
//!
//!     Factories for building tokens tersely and assertions for the provenance invariants.
//!     Used by unit tests across the crate and by the integration tests under `tests/`.
//!
//! Factories
//!
//!     Tokens are written as `(text, start, end)` tuples, processed tokens with a list of
//!     `(start, end)` pairs:
//!
//!     ```rust,ignore
//!     let raw = mk_raw(&[("ok", 0, 2)]);
//!     let stream = mk_stream(&[("wasting", 6, 13), ("your", 14, 18)]);
//!     let grams = mk_processed(&[("wast your", &[(6, 13), (14, 18)])]);
//!     ```
//!
//! Assertions
//!
//!     [`assert_provenance`] checks that every span of every token points into the source,
//!     which is the property every pipeline output must satisfy.

pub mod factories {
    use crate::prep::token::{ProcessedToken, RawToken, Span, TokenStream};

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end)
            .unwrap_or_else(|| panic!("invalid test span {}..{}", start, end))
    }

    pub fn mk_raw(tokens: &[(&str, usize, usize)]) -> Vec<RawToken> {
        tokens
            .iter()
            .map(|(text, start, end)| RawToken::new(span(*start, *end), *text))
            .collect()
    }

    pub fn mk_stream(tokens: &[(&str, usize, usize)]) -> TokenStream {
        TokenStream::from_raw(&mk_raw(tokens))
    }

    pub fn mk_processed(tokens: &[(&str, &[(usize, usize)])]) -> Vec<ProcessedToken> {
        tokens
            .iter()
            .map(|(text, spans)| {
                ProcessedToken::new(*text, spans.iter().map(|(s, e)| span(*s, *e)).collect())
            })
            .collect()
    }
}

use crate::prep::token::ProcessedToken;

/// Assert every token has at least one span and every span slices `source` cleanly.
pub fn assert_provenance(source: &str, tokens: &[ProcessedToken]) {
    for token in tokens {
        assert!(
            !token.spans.is_empty(),
            "token '{}' has no provenance",
            token.text
        );
        for span in &token.spans {
            assert!(
                span.fits(source),
                "span {} of token '{}' does not fit source of length {}",
                span,
                token.text,
                source.len()
            );
        }
    }
}

/// The raw substrings behind `token`, joined with `joiner`.
pub fn reconstruct(source: &str, token: &ProcessedToken, joiner: &str) -> String {
    token.raw_parts(source).join(joiner)
}

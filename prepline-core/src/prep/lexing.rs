//! Tokenizer
//!
//!     Turns raw text into the ordered sequence of [`RawToken`]s the pipeline starts from.
//!
//! Boundaries
//!
//!     Maximal runs of word characters are tokens; everything else separates them. Separators
//!     are dropped from the token stream but not from span accounting: each raw token's span is
//!     the exact byte range of the word in the original text, so the text around and between
//!     tokens can always be recovered from the source.
//!
//! Totality
//!
//!     On `&str` input tokenization never fails and is deterministic. Empty text yields no
//!     tokens. Undecoded input goes through [`tokenize_bytes`], which reports invalid UTF-8 as a
//!     [`TokenizeError`] instead of panicking.

pub mod base_tokenization;

use crate::prep::error::TokenizeError;
use crate::prep::token::{RawToken, Span};

/// Split `text` into word tokens with their byte spans.
pub fn tokenize(text: &str) -> Result<Vec<RawToken>, TokenizeError> {
    let core = base_tokenization::tokenize(text)?;
    let words = core
        .into_iter()
        .filter(|(token, _)| token.is_word())
        .filter_map(|(_, range)| Span::from_range(range))
        .filter_map(|span| RawToken::from_source(text, span))
        .collect();
    Ok(words)
}

/// Decode `bytes` as UTF-8 and tokenize.
pub fn tokenize_bytes(bytes: &[u8]) -> Result<Vec<RawToken>, TokenizeError> {
    tokenize(decode(bytes)?)
}

/// Decode `bytes` as UTF-8, reporting where decoding stopped.
pub fn decode(bytes: &[u8]) -> Result<&str, TokenizeError> {
    std::str::from_utf8(bytes).map_err(|e| TokenizeError::InvalidUtf8 {
        offset: e.valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prep::testing::factories::mk_raw;

    #[test]
    fn test_sentence() {
        let tokens = tokenize("I was wasting your time watching this.").unwrap();
        assert_eq!(
            tokens,
            mk_raw(&[
                ("I", 0, 1),
                ("was", 2, 5),
                ("wasting", 6, 13),
                ("your", 14, 18),
                ("time", 19, 23),
                ("watching", 24, 32),
                ("this", 33, 37),
            ])
        );
    }

    #[test]
    fn test_punctuation_is_dropped_but_offsets_kept() {
        let tokens = tokenize("ok.").unwrap();
        assert_eq!(tokens, mk_raw(&[("ok", 0, 2)]));
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" ...\n\t").unwrap().is_empty());
    }

    #[test]
    fn test_multibyte_offsets_are_bytes() {
        let tokens = tokenize("déjà vu").unwrap();
        assert_eq!(tokens, mk_raw(&[("déjà", 0, 6), ("vu", 7, 9)]));
    }

    #[test]
    fn test_tokenize_bytes_valid() {
        let tokens = tokenize_bytes("hi there".as_bytes()).unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_tokenize_bytes_invalid_utf8() {
        let bytes = [b'o', b'k', b' ', 0xff, b'x'];
        assert_eq!(
            tokenize_bytes(&bytes),
            Err(TokenizeError::InvalidUtf8 { offset: 3 })
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Same text, same tokens; every time.";
        assert_eq!(tokenize(text).unwrap(), tokenize(text).unwrap());
    }
}

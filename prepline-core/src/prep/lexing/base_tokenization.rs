//! Base tokenization using the logos lexer
//!
//! This is the entry point where source strings become token streams. It returns every core
//! token, separators included, paired with its byte range. Filtering down to words happens in
//! [`tokenize`](crate::prep::lexing::tokenize).

use crate::prep::error::TokenizeError;
use crate::prep::token::{Span, Token};
use logos::Logos;
use std::ops::Range;

/// Tokenize source text with location information.
///
/// The two core rules cover every input, so an error here means the lexer itself is broken
/// for this input. It is still reported rather than skipped so that spans stay contiguous.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, TokenizeError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let range = lexer.span();
                let span = Span::at_least_one(range.start, range.end);
                return Err(TokenizeError::Unrecognized { span });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizes() {
        let tokens = tokenize("hello world").unwrap();
        assert_eq!(
            tokens,
            vec![
                (Token::Word, 0..5),
                (Token::Separator, 5..6),
                (Token::Word, 6..11),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_ranges_cover_the_whole_source() {
        let source = "  I was wasting your time watching this.  ";
        let tokens = tokenize(source).unwrap();
        let mut cursor = 0;
        for (_, range) in &tokens {
            assert_eq!(range.start, cursor);
            cursor = range.end;
        }
        assert_eq!(cursor, source.len());
    }

    #[test]
    fn test_tokens_alternate() {
        let tokens = tokenize("a, b; c!").unwrap();
        for pair in tokens.windows(2) {
            assert_ne!(pair[0].0, pair[1].0);
        }
    }
}

//! Core token definitions
//!
//! Text is split into maximal runs of word characters and maximal runs of everything else.
//! Word characters follow the Unicode `\w` class: letters, marks, digits and connector
//! punctuation. The two rules together cover every possible input, so the lexer never
//! reports an error on valid UTF-8.
use logos::Logos;

/// All possible core tokens.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// A maximal run of word characters
    #[regex(r"\w+")]
    Word,

    /// A maximal run of non-word characters (whitespace, punctuation, symbols)
    #[regex(r"[^\w]+")]
    Separator,
}

impl Token {
    /// Check if this token is a word
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word)
    }

    /// Check if this token is a separator
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Separator)
    }
}

//! Accent stripping stage
//!
//! Decomposes each token (NFD), drops combining marks and recomposes (NFC). A token made only
//! of combining marks ends up empty and is dropped together with its span.

use crate::prep::error::StageError;
use crate::prep::token::TokenStream;
use crate::prep::transforms::Stage;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, Default)]
pub struct StripAccents;

impl StripAccents {
    pub fn new() -> Self {
        StripAccents
    }
}

/// Remove diacritics from `text`.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

impl Stage for StripAccents {
    fn name(&self) -> &str {
        "strip-accents"
    }

    fn run(&self, input: TokenStream) -> Result<TokenStream, StageError> {
        input.filter_map(|token| {
            let stripped = strip_accents(&token.text);
            Ok((!stripped.is_empty()).then_some(stripped))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prep::testing::factories::mk_stream;

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("café"), "cafe");
        assert_eq!(strip_accents("naïve"), "naive");
        assert_eq!(strip_accents("Ångström"), "Angstrom");
        assert_eq!(strip_accents("plain"), "plain");
    }

    #[test]
    fn test_decomposed_input() {
        // 'e' followed by U+0301 COMBINING ACUTE ACCENT
        assert_eq!(strip_accents("cafe\u{301}"), "cafe");
    }

    #[test]
    fn test_stage_keeps_spans() {
        let out = StripAccents::new()
            .run(mk_stream(&[("déjà", 0, 6), ("vu", 7, 9)]))
            .unwrap();
        assert_eq!(out.texts(), vec!["deja", "vu"]);
        assert_eq!(out.tokens()[0].spans[0].range(), 0..6);
    }

    #[test]
    fn test_marks_only_token_is_dropped() {
        let out = StripAccents::new()
            .run(mk_stream(&[("\u{301}\u{308}", 0, 4), ("ok", 5, 7)]))
            .unwrap();
        assert_eq!(out.texts(), vec!["ok"]);
    }
}

//! Stemming stage (Snowball stemmers)

use crate::prep::error::StageError;
use crate::prep::registry::Locale;
use crate::prep::token::TokenStream;
use crate::prep::transforms::Stage;
use rust_stemmers::Stemmer;
use std::fmt;

/// Reduces each token to its stem for the configured locale.
///
/// The stemmers expect lowercase input; put a lowercase stage first when the text is mixed
/// case.
pub struct Stem {
    locale: Locale,
    stemmer: Stemmer,
}

impl Stem {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            stemmer: Stemmer::create(locale.stemmer_algorithm()),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Stem a single word.
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }
}

impl fmt::Debug for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stem").field("locale", &self.locale).finish()
    }
}

impl Stage for Stem {
    fn name(&self) -> &str {
        "stem"
    }

    fn run(&self, input: TokenStream) -> Result<TokenStream, StageError> {
        Ok(input.map_text(|text| {
            let stem = self.stem(text);
            if stem.is_empty() {
                text.to_string()
            } else {
                stem
            }
        }))
    }
}

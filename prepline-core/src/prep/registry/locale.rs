//! Locales supported by the stemming and stopword stages
//!
//! Only languages covered by both the Snowball stemmers and the stopword lists are listed,
//! so any locale accepted here works for both stages.

use crate::prep::error::ConfigError;
use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stop_words::LANGUAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    Arabic,
    Danish,
    Dutch,
    English,
    French,
    German,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Russian,
    Spanish,
    Swedish,
    Turkish,
}

impl Locale {
    pub const ALL: [Locale; 14] = [
        Locale::Arabic,
        Locale::Danish,
        Locale::Dutch,
        Locale::English,
        Locale::French,
        Locale::German,
        Locale::Hungarian,
        Locale::Italian,
        Locale::Norwegian,
        Locale::Portuguese,
        Locale::Russian,
        Locale::Spanish,
        Locale::Swedish,
        Locale::Turkish,
    ];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Arabic => "ar",
            Locale::Danish => "da",
            Locale::Dutch => "nl",
            Locale::English => "en",
            Locale::French => "fr",
            Locale::German => "de",
            Locale::Hungarian => "hu",
            Locale::Italian => "it",
            Locale::Norwegian => "no",
            Locale::Portuguese => "pt",
            Locale::Russian => "ru",
            Locale::Spanish => "es",
            Locale::Swedish => "sv",
            Locale::Turkish => "tr",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Locale::Arabic => "arabic",
            Locale::Danish => "danish",
            Locale::Dutch => "dutch",
            Locale::English => "english",
            Locale::French => "french",
            Locale::German => "german",
            Locale::Hungarian => "hungarian",
            Locale::Italian => "italian",
            Locale::Norwegian => "norwegian",
            Locale::Portuguese => "portuguese",
            Locale::Russian => "russian",
            Locale::Spanish => "spanish",
            Locale::Swedish => "swedish",
            Locale::Turkish => "turkish",
        }
    }

    pub(crate) fn stemmer_algorithm(&self) -> Algorithm {
        match self {
            Locale::Arabic => Algorithm::Arabic,
            Locale::Danish => Algorithm::Danish,
            Locale::Dutch => Algorithm::Dutch,
            Locale::English => Algorithm::English,
            Locale::French => Algorithm::French,
            Locale::German => Algorithm::German,
            Locale::Hungarian => Algorithm::Hungarian,
            Locale::Italian => Algorithm::Italian,
            Locale::Norwegian => Algorithm::Norwegian,
            Locale::Portuguese => Algorithm::Portuguese,
            Locale::Russian => Algorithm::Russian,
            Locale::Spanish => Algorithm::Spanish,
            Locale::Swedish => Algorithm::Swedish,
            Locale::Turkish => Algorithm::Turkish,
        }
    }

    pub(crate) fn stopword_language(&self) -> LANGUAGE {
        match self {
            Locale::Arabic => LANGUAGE::Arabic,
            Locale::Danish => LANGUAGE::Danish,
            Locale::Dutch => LANGUAGE::Dutch,
            Locale::English => LANGUAGE::English,
            Locale::French => LANGUAGE::French,
            Locale::German => LANGUAGE::German,
            Locale::Hungarian => LANGUAGE::Hungarian,
            Locale::Italian => LANGUAGE::Italian,
            Locale::Norwegian => LANGUAGE::Norwegian,
            Locale::Portuguese => LANGUAGE::Portuguese,
            Locale::Russian => LANGUAGE::Russian,
            Locale::Spanish => LANGUAGE::Spanish,
            Locale::Swedish => LANGUAGE::Swedish,
            Locale::Turkish => LANGUAGE::Turkish,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::English
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    /// Accepts the ISO code or the English name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Locale::ALL
            .iter()
            .copied()
            .find(|l| l.code() == wanted || l.name() == wanted)
            .ok_or_else(|| ConfigError::UnsupportedLocale(s.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.code().to_string()
    }
}

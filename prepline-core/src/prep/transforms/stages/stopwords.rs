//! Stopword filtering stage
//!
//! Lists come from the `stop-words` crate and are loaded once per locale, then shared by every
//! stage built for that locale. Matching is case-insensitive, so the stage works whether or not
//! a lowercase stage runs first.

use crate::prep::error::StageError;
use crate::prep::registry::Locale;
use crate::prep::token::TokenStream;
use crate::prep::transforms::Stage;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

static LISTS: Lazy<Mutex<HashMap<Locale, Arc<HashSet<String>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn list_for(locale: Locale) -> Arc<HashSet<String>> {
    let mut lists = LISTS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    lists
        .entry(locale)
        .or_insert_with(|| {
            Arc::new(
                stop_words::get(locale.stopword_language())
                    .iter()
                    .map(|s| s.to_lowercase())
                    .collect(),
            )
        })
        .clone()
}

/// Drops tokens found in a stopword list.
#[derive(Debug, Clone)]
pub struct RemoveStopwords {
    words: Arc<HashSet<String>>,
}

impl RemoveStopwords {
    /// Stopwords for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self {
            words: list_for(locale),
        }
    }

    /// A custom list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: Arc::new(words.iter().map(|w| w.to_lowercase()).collect()),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Stage for RemoveStopwords {
    fn name(&self) -> &str {
        "remove-stopwords"
    }

    fn run(&self, input: TokenStream) -> Result<TokenStream, StageError> {
        input.filter_map(|token| {
            Ok((!self.is_stopword(&token.text)).then(|| token.text.clone()))
        })
    }
}

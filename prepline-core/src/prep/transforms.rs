//! Stage infrastructure
//!
//! A [`Stage`] is one named, pure step of a preprocessing pipeline: it takes a
//! [`TokenStream`] and returns a new one. Stages are order sensitive (removing stopwords before
//! stemming is not the same as stemming first) and are shared between documents, so they hold
//! no per-document state.
//!
//! # Writing a stage
//!
//! Implement the trait directly when the stage needs to look at more than one token at a time
//! (see [`NGrams`](stages::NGrams)):
//!
//! ```rust,ignore
//! struct Dedupe;
//!
//! impl Stage for Dedupe {
//!     fn name(&self) -> &str { "dedupe" }
//!     fn run(&self, input: TokenStream) -> Result<TokenStream, StageError> { ... }
//! }
//! ```
//!
//! For the common per-token case, build a [`FnStage`] from a closure instead:
//!
//! ```rust,ignore
//! let shout = FnStage::map("uppercase", |text| text.to_uppercase());
//! let no_digits = FnStage::filter("no-digits", |text| !text.chars().all(char::is_numeric));
//! ```
//!
//! The [`TokenStream`] helpers keep provenance right for per-token functions, and the pipeline
//! checks after every stage that no span was invented.
//!
//! # Module Organization
//!
//! - [`stages`]: the built-in stages (lowercase, accent stripping, stemming, stopwords, n-grams)
//! - [`standard`]: pre-built pipelines

pub mod stages;
pub mod standard;

use crate::prep::error::StageError;
use crate::prep::token::TokenStream;

/// One pluggable transformation step.
///
/// Implementations must be safe to share across threads: the same stage instance may process
/// many documents concurrently. Any internal cache must be private and must not change output.
pub trait Stage: Send + Sync {
    /// Name used in configuration, logs and errors.
    fn name(&self) -> &str;

    /// Transform the stream.
    fn run(&self, input: TokenStream) -> Result<TokenStream, StageError>;
}

type RunFn = Box<dyn Fn(TokenStream) -> Result<TokenStream, StageError> + Send + Sync>;

/// A stage built from a closure.
pub struct FnStage {
    name: String,
    run_fn: RunFn,
}

impl FnStage {
    /// Wrap a whole-stream function.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(TokenStream) -> Result<TokenStream, StageError> + Send + Sync + 'static,
    {
        FnStage {
            name: name.into(),
            run_fn: Box::new(f),
        }
    }

    /// One token in, one token out.
    pub fn map<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::from_fn(name, move |input: TokenStream| Ok(input.map_text(&f)))
    }

    /// One token in, one token out, or an error message for the offending token.
    pub fn try_map<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Result<String, String> + Send + Sync + 'static,
    {
        let name = name.into();
        let stage_name = name.clone();
        Self::from_fn(name, move |input: TokenStream| {
            input.filter_map(|token| {
                f(&token.text).map(Some).map_err(|message| {
                    StageError::new(&stage_name, &token.text, token.spans.clone(), message)
                })
            })
        })
    }

    /// One token in, any number of tokens out. Each output keeps the input's spans.
    pub fn flat_map<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self::from_fn(name, move |input: TokenStream| {
            input.flat_map(|token| Ok(f(&token.text)))
        })
    }

    /// Keep tokens for which `keep` returns true.
    pub fn filter<F>(name: impl Into<String>, keep: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::from_fn(name, move |input: TokenStream| {
            input.filter_map(|token| Ok(keep(&token.text).then(|| token.text.clone())))
        })
    }
}

impl Stage for FnStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: TokenStream) -> Result<TokenStream, StageError> {
        (self.run_fn)(input)
    }
}

impl std::fmt::Debug for FnStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStage").field("name", &self.name).finish()
    }
}

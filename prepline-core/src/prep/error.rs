//! Error types for prepline.
//!
//! Three failure classes, matching the three places work can go wrong:
//!
//!   - [`ConfigError`]: the pipeline options are invalid. Raised eagerly by
//!     [`StageRegistry::build`](crate::prep::registry::StageRegistry::build), never while
//!     processing.
//!   - [`TokenizeError`]: the input could not be tokenized (undecodable bytes).
//!   - [`StageError`]: one stage failed on one document.
//!
//! The last two abort only the current document and are wrapped in [`PipelineError`].
//! Batch callers decide whether that skips the document or aborts the batch.

use crate::prep::token::Span;

/// Invalid pipeline configuration, detected at build time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `ngram_size` must be at least 1.
    #[error("ngram_size must be at least 1, got {0}")]
    InvalidNgramSize(usize),

    /// N-grams need a connector to join their members.
    #[error("ngram_connector must not be empty when ngram_size is {0}")]
    EmptyConnector(usize),

    /// A custom stage reference names nothing in the registry.
    #[error("custom stage '{0}' is not registered")]
    UnknownStage(String),

    /// Two custom stages registered under the same name.
    #[error("a stage named '{0}' is already registered")]
    DuplicateStage(String),

    /// The same builtin listed twice.
    #[error("builtin stage '{0}' is listed more than once")]
    DuplicateBuiltin(String),

    /// A custom stage is placed relative to a builtin that is not enabled.
    #[error("custom stage '{stage}' is placed relative to '{anchor}', which is not enabled")]
    MissingAnchor { stage: String, anchor: String },

    /// Locale not supported by the stemmer or stopword lists.
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    /// A builtin stage string that does not parse.
    #[error("unknown builtin stage '{0}'")]
    UnknownBuiltin(String),

    /// A placement string that does not parse.
    #[error("invalid placement '{0}' (expected first, last, before:<builtin> or after:<builtin>)")]
    InvalidPlacement(String),
}

/// Input that cannot be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// Bytes are not valid UTF-8.
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    /// The lexer met input it has no rule for.
    #[error("unrecognized input at {span}")]
    Unrecognized { span: Span },
}

/// A single stage failed on a single document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stage '{stage}' failed on token '{token}' at {}: {message}", format_spans(.spans))]
pub struct StageError {
    /// Name of the failing stage.
    pub stage: String,
    /// Text of the offending token.
    pub token: String,
    /// Raw spans the offending token came from.
    pub spans: Vec<Span>,
    pub message: String,
}

impl StageError {
    pub fn new(
        stage: impl Into<String>,
        token: impl Into<String>,
        spans: Vec<Span>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            token: token.into(),
            spans,
            message: message.into(),
        }
    }
}

fn format_spans(spans: &[Span]) -> String {
    if spans.is_empty() {
        return "<no span>".to_string();
    }
    spans
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Per-document failure: either tokenization or one of the stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Stage(#[from] StageError),
}

/// Convenience alias for per-document results.
pub type Result<T> = std::result::Result<T, PipelineError>;

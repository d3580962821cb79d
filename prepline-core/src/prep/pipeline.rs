//! The preprocessing pipeline
//!
//! A [`Pipeline`] is an ordered list of stages, built once (usually by
//! [`StageRegistry::build`](crate::prep::registry::StageRegistry::build)) and reused for every
//! document. Running it over a document:
//!
//! 1. Start from an identity copy of the raw tokens: one processed token per raw token,
//!    each carrying its own span.
//! 2. Run each stage in order, feeding it the previous stage's output.
//! 3. After each stage, check provenance: every token must still have spans, and every span
//!    must be one the tokenizer produced. A stage that breaks this fails the document.
//! 4. Build the [`ProvenanceIndex`] from the final tokens.
//!
//! An empty pipeline is the identity: texts come out exactly as tokenized. That is bypass
//! mode with no custom stages.
//!
//! Failure is all-or-nothing per document. The first stage error aborts the document and no
//! partial output is returned.
//!
//! # Usage
//!
//! ```rust,ignore
//! let pipeline = Pipeline::new()
//!     .with_stage(Lowercase)
//!     .with_stage(Stem::new(Locale::English));
//! let doc = pipeline.process_text("I was wasting your time")?;
//! let spans = doc.provenance().lookup("wast");
//! ```

use crate::prep::error::{PipelineError, StageError};
use crate::prep::lexing;
use crate::prep::provenance::ProvenanceIndex;
use crate::prep::token::{ProcessedToken, RawToken, Span, TokenStream};
use crate::prep::transforms::Stage;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Result of running a pipeline over one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedDocument {
    tokens: Vec<ProcessedToken>,
    #[serde(skip)]
    provenance: ProvenanceIndex,
}

impl ProcessedDocument {
    fn new(tokens: Vec<ProcessedToken>) -> Self {
        let provenance = ProvenanceIndex::build(&tokens);
        Self { tokens, provenance }
    }

    pub fn tokens(&self) -> &[ProcessedToken] {
        &self.tokens
    }

    /// Processed texts in order: what a classifier consumes.
    pub fn texts(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.text.clone()).collect()
    }

    pub fn provenance(&self) -> &ProvenanceIndex {
        &self.provenance
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens with their spans as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "tokens": self.tokens })
    }
}

/// An ordered chain of stages.
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
    bypass_defaults: bool,
}

impl Pipeline {
    /// The identity pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stages(stages: Vec<Arc<dyn Stage>>, bypass_defaults: bool) -> Self {
        Self {
            stages,
            bypass_defaults,
        }
    }

    /// Append a stage.
    pub fn with_stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Whether this pipeline was built with built-in stages disabled.
    pub fn bypasses_defaults(&self) -> bool {
        self.bypass_defaults
    }

    /// Run every stage over already tokenized input.
    #[instrument(level = "debug", skip_all, fields(raw_tokens = raw.len()))]
    pub fn process(&self, raw: &[RawToken]) -> Result<ProcessedDocument, PipelineError> {
        let known: HashSet<Span> = raw.iter().map(RawToken::span).collect();
        let mut stream = TokenStream::from_raw(raw);

        for stage in &self.stages {
            let before = stream.len();
            stream = stage.run(stream)?;
            check_provenance(stage.name(), &stream, &known)?;
            debug!(stage = stage.name(), before, after = stream.len(), "stage complete");
        }

        Ok(ProcessedDocument::new(stream.into_tokens()))
    }

    /// Tokenize `text` and run every stage over it.
    pub fn process_text(&self, text: &str) -> Result<ProcessedDocument, PipelineError> {
        let raw = lexing::tokenize(text)?;
        self.process(&raw)
    }
}

fn check_provenance(
    stage: &str,
    stream: &TokenStream,
    known: &HashSet<Span>,
) -> Result<(), StageError> {
    for token in stream.tokens() {
        if token.spans.is_empty() {
            return Err(StageError::new(
                stage,
                &token.text,
                Vec::new(),
                "emitted a token without provenance",
            ));
        }
        if let Some(span) = token.spans.iter().find(|s| !known.contains(s)) {
            return Err(StageError::new(
                stage,
                &token.text,
                token.spans.clone(),
                format!("span {} was not produced by the tokenizer", span),
            ));
        }
    }
    Ok(())
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .field("bypass_defaults", &self.bypass_defaults)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prep::registry::Locale;
    use crate::prep::transforms::stages::{Lowercase, NGrams, Stem};
    use crate::prep::transforms::FnStage;

    #[test]
    fn test_identity_pipeline() {
        let doc = Pipeline::new().process_text("Hello, World!").unwrap();
        assert_eq!(doc.texts(), vec!["Hello", "World"]);
        assert_eq!(doc.tokens()[1].spans, vec![Span::new(7, 12).unwrap()]);
    }

    #[test]
    fn test_stages_run_in_order() {
        let pipeline = Pipeline::new()
            .with_stage(Lowercase)
            .with_stage(Stem::new(Locale::English))
            .with_stage(NGrams::new(3, " "));
        let doc = pipeline
            .process_text("I was wasting your time watching this.")
            .unwrap();
        assert!(doc.texts().contains(&"wast your time".to_string()));
        assert_eq!(pipeline.stage_names(), vec!["lowercase", "stem", "ngrams"]);
    }

    #[test]
    fn test_stage_error_aborts_document() {
        let pipeline = Pipeline::new().with_stage(FnStage::try_map("picky", |t| {
            if t == "bad" {
                Err("refused".to_string())
            } else {
                Ok(t.to_string())
            }
        }));
        let err = pipeline.process_text("good bad good").unwrap_err();
        match err {
            PipelineError::Stage(e) => {
                assert_eq!(e.stage, "picky");
                assert_eq!(e.token, "bad");
                assert_eq!(e.spans, vec![Span::new(5, 8).unwrap()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_fabricated_span_is_rejected() {
        let pipeline = Pipeline::new().with_stage(FnStage::from_fn("liar", |_input| {
            Ok(TokenStream::new(vec![ProcessedToken::new(
                "ghost",
                vec![Span::new(100, 105).unwrap()],
            )]))
        }));
        let err = pipeline.process_text("real words").unwrap_err();
        assert!(err.to_string().contains("was not produced by the tokenizer"));
    }

    #[test]
    fn test_spanless_token_is_rejected() {
        let pipeline = Pipeline::new().with_stage(FnStage::from_fn("empty", |_input| {
            Ok(TokenStream::new(vec![ProcessedToken::new("void", vec![])]))
        }));
        let err = pipeline.process_text("anything").unwrap_err();
        assert!(err.to_string().contains("without provenance"));
    }

    #[test]
    fn test_empty_document() {
        let doc = Pipeline::new()
            .with_stage(Lowercase)
            .process_text("")
            .unwrap();
        assert!(doc.is_empty());
        assert!(doc.provenance().is_empty());
    }

    #[test]
    fn test_to_json() {
        let doc = Pipeline::new().process_text("ok.").unwrap();
        assert_eq!(
            doc.to_json(),
            serde_json::json!({ "tokens": [{ "text": "ok", "spans": [{ "start": 0, "end": 2 }] }] })
        );
    }

    #[test]
    fn test_debug_lists_stage_names() {
        let pipeline = Pipeline::new().with_stage(Lowercase);
        assert_eq!(
            format!("{:?}", pipeline),
            "Pipeline { stages: [\"lowercase\"], bypass_defaults: false }"
        );
    }
}

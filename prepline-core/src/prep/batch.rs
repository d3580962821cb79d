//! Batch processing
//!
//! Runs one pipeline over many documents and collects classifier inputs. Documents share only
//! the read-only [`Pipeline`], so with [`BatchPolicy::SkipFailed`] they are processed in
//! parallel with rayon. Outputs and failures are reported in input order either way.
//!
//! [`BatchPolicy::AbortOnError`] runs sequentially and stops at the first failing document,
//! so the reported cause is always the earliest failure in input order.

use crate::prep::error::PipelineError;
use crate::prep::pipeline::Pipeline;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// One input document. The label is opaque and carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// What a classifier consumes for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierInput {
    pub document_id: String,
    pub label: Option<String>,
    pub tokens: Vec<String>,
}

/// What to do when a document fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPolicy {
    /// Record the failure and keep going.
    #[default]
    SkipFailed,
    /// Stop the batch at the first failure.
    AbortOnError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub document_id: String,
    pub error: PipelineError,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub outputs: Vec<ClassifierInput>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    /// Documents seen, successful or not.
    pub fn total(&self) -> usize {
        self.outputs.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} documents failed",
            self.failures.len(),
            self.total()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("batch aborted at document '{document_id}': {source}")]
    Aborted {
        document_id: String,
        source: PipelineError,
    },
}

fn run_one(pipeline: &Pipeline, document: &Document) -> Result<ClassifierInput, PipelineError> {
    let processed = pipeline.process_text(&document.text)?;
    Ok(ClassifierInput {
        document_id: document.id.clone(),
        label: document.label.clone(),
        tokens: processed.texts(),
    })
}

/// Process every document with `pipeline`.
#[instrument(skip_all, fields(documents = documents.len(), ?policy))]
pub fn process_batch(
    pipeline: &Pipeline,
    documents: &[Document],
    policy: BatchPolicy,
) -> Result<BatchReport, BatchError> {
    let mut report = BatchReport::default();

    match policy {
        BatchPolicy::AbortOnError => {
            for document in documents {
                let output = run_one(pipeline, document).map_err(|source| BatchError::Aborted {
                    document_id: document.id.clone(),
                    source,
                })?;
                report.outputs.push(output);
            }
        }
        BatchPolicy::SkipFailed => {
            let results: Vec<_> = documents
                .par_iter()
                .map(|document| (document, run_one(pipeline, document)))
                .collect();
            for (document, result) in results {
                match result {
                    Ok(output) => report.outputs.push(output),
                    Err(error) => {
                        warn!(document = %document.id, %error, "skipping document");
                        report.failures.push(DocumentFailure {
                            document_id: document.id.clone(),
                            error,
                        });
                    }
                }
            }
        }
    }

    info!(
        processed = report.outputs.len(),
        failed = report.failures.len(),
        "batch complete"
    );
    Ok(report)
}

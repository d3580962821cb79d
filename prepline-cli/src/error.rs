//! Errors surfaced by the CLI.

use prepline_config::LoadError;
use prepline_core::prep::{BatchError, ConfigError, PipelineError};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration: {0}")]
    Load(#[from] LoadError),

    #[error("invalid pipeline: {0}")]
    Build(#[from] ConfigError),

    #[error("{}: {source}", .path.display())]
    Document {
        path: PathBuf,
        source: PipelineError,
    },

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("no processed token matches '{0}'")]
    NoMatch(String),

    #[error("no input documents found")]
    NoInput,

    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
}

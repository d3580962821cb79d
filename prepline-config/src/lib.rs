//! Shared configuration loader for prepline.
//!
//! `defaults/prepline.default.toml` is embedded into every binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user files and single-key
//! overrides on top via [`Loader`] before deserializing into [`PrepConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use prepline_core::prep::{BatchPolicy, PipelineOptions};
use serde::Deserialize;
use std::path::Path;

/// Errors from reading or deserializing configuration sources.
pub type LoadError = ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/prepline.default.toml");

/// Everything a prepline run reads from configuration: pipeline options, batch policy and
/// the markers used when rendering provenance.
#[derive(Debug, Clone, Deserialize)]
pub struct PrepConfig {
    pub pipeline: PipelineOptions,
    pub batch: BatchConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub policy: BatchPolicy,
}

/// Markers used when rendering provenance for people.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    pub open: String,
    pub close: String,
    pub arrow: String,
}

/// Builds a [`PrepConfig`] from the embedded defaults plus any files and overrides added on
/// top. Later sources win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only `prepline.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file on top of what is already loaded. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Like [`Loader::with_file`], but a missing file is skipped.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `pipeline.ngram_size = 3`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply a `key=value` pair as given on a command line.
    ///
    /// The key is trimmed. The value is trimmed too, unless it is whitespace only, in which
    /// case it is kept as written. A value wrapped in double quotes keeps its inner text
    /// verbatim, so `pipeline.ngram_connector=" + "` sets the connector to ` + `.
    pub fn set_assignment(self, assignment: &str) -> Result<Self, ConfigError> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            ConfigError::Message(format!("expected key=value, got '{}'", assignment))
        })?;
        self.set_override(key.trim(), assigned_value(value))
    }

    /// Merge every source and deserialize the result into a [`PrepConfig`].
    pub fn build(self) -> Result<PrepConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn assigned_value(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return raw;
    }
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<PrepConfig, ConfigError> {
    Loader::new().build()
}

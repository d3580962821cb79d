//! Standard pipeline definitions
//!
//! Pre-built pipelines for the common cases, defined as statics using `once_cell::sync::Lazy`.
//! They need no custom stages or options, so they are assembled from stages directly.

use crate::prep::pipeline::Pipeline;
use crate::prep::transforms::stages::Lowercase;
use once_cell::sync::Lazy;

/// The default pipeline: lowercase only, the same stages `PipelineOptions::default()` builds.
///
/// # Example
///
/// ```rust,ignore
/// use prepline_core::prep::transforms::standard::DEFAULT_PIPELINE;
///
/// let doc = DEFAULT_PIPELINE.process_text("Hello World").unwrap();
/// assert_eq!(doc.texts(), vec!["hello", "world"]);
/// ```
pub static DEFAULT_PIPELINE: Lazy<Pipeline> = Lazy::new(|| Pipeline::new().with_stage(Lowercase));

/// Bypass mode with nothing configured: tokens come out exactly as tokenized.
pub static IDENTITY: Lazy<Pipeline> = Lazy::new(|| Pipeline::from_stages(Vec::new(), true));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prep::registry::{PipelineOptions, StageRegistry};

    #[test]
    fn test_default_pipeline_lowercases() {
        let doc = DEFAULT_PIPELINE.process_text("Hello World").unwrap();
        assert_eq!(doc.texts(), vec!["hello", "world"]);
        assert_eq!(DEFAULT_PIPELINE.stage_names(), vec!["lowercase"]);
    }

    #[test]
    fn test_default_pipeline_matches_default_options() {
        let built = StageRegistry::new()
            .build(&PipelineOptions::default())
            .unwrap();
        assert_eq!(built.stage_names(), DEFAULT_PIPELINE.stage_names());
        assert_eq!(built.bypasses_defaults(), DEFAULT_PIPELINE.bypasses_defaults());
    }

    #[test]
    fn test_identity_keeps_case() {
        let doc = IDENTITY.process_text("Hello World").unwrap();
        assert_eq!(doc.texts(), vec!["Hello", "World"]);
        assert!(IDENTITY.bypasses_defaults());
    }
}

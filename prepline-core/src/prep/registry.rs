//! Pipeline registry
//!
//! Turns a [`PipelineOptions`] value into a runnable [`Pipeline`]. Built-in stages are known
//! by name; custom stages are registered here under a name first and referenced by that name
//! from the options.
//!
//! Stage order
//!
//!     Without bypass, the final order is:
//!
//!         customs placed `first`
//!         for each builtin, in listed order:
//!             customs placed `before:<builtin>`, the builtin, customs placed `after:<builtin>`
//!         customs placed `last`
//!         n-grams, when `ngram_size > 1`
//!
//!     Customs sharing a placement keep their listed order. With `bypass_defaults`, built-ins
//!     are ignored and customs run in listed order, placements unused. N-grams are appended in
//!     both modes.
//!
//! All validation happens here, so a built pipeline never fails on configuration.

pub mod locale;
pub mod options;

pub use locale::Locale;
pub use options::{BuiltinKind, BuiltinStage, CustomStageRef, PipelineOptions, Placement};

use crate::prep::error::ConfigError;
use crate::prep::pipeline::Pipeline;
use crate::prep::transforms::stages::{Lowercase, NGrams, RemoveStopwords, Stem, StripAccents};
use crate::prep::transforms::Stage;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Named custom stages available to [`PipelineOptions::custom_stages`].
#[derive(Clone, Default)]
pub struct StageRegistry {
    custom: BTreeMap<String, Arc<dyn Stage>>,
}

impl StageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom stage under its own name.
    pub fn register<S: Stage + 'static>(&mut self, stage: S) -> Result<(), ConfigError> {
        self.register_arc(Arc::new(stage))
    }

    pub fn register_arc(&mut self, stage: Arc<dyn Stage>) -> Result<(), ConfigError> {
        let name = stage.name().to_string();
        if self.custom.contains_key(&name) {
            return Err(ConfigError::DuplicateStage(name));
        }
        self.custom.insert(name, stage);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Registered custom stage names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.custom.keys().map(String::as_str).collect()
    }

    /// Validate `options` and assemble the pipeline they describe.
    pub fn build(&self, options: &PipelineOptions) -> Result<Pipeline, ConfigError> {
        if options.ngram_size < 1 {
            return Err(ConfigError::InvalidNgramSize(options.ngram_size));
        }
        if options.ngram_size > 1 && options.ngram_connector.is_empty() {
            return Err(ConfigError::EmptyConnector(options.ngram_size));
        }

        let customs = options
            .custom_stages
            .iter()
            .map(|reference| {
                self.custom
                    .get(&reference.name)
                    .map(|stage| (reference.placement, Arc::clone(stage)))
                    .ok_or_else(|| ConfigError::UnknownStage(reference.name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut stages: Vec<Arc<dyn Stage>> = if options.bypass_defaults {
            customs.into_iter().map(|(_, stage)| stage).collect()
        } else {
            interleave(&options.builtin_stages, &options.custom_stages, customs)?
        };

        if options.ngram_size > 1 {
            stages.push(Arc::new(
                NGrams::new(options.ngram_size, options.ngram_connector.clone())
                    .with_lower_orders(options.keep_lower_orders),
            ));
        }

        let pipeline = Pipeline::from_stages(stages, options.bypass_defaults);
        debug!(
            stages = ?pipeline.stage_names(),
            bypass = options.bypass_defaults,
            "pipeline built"
        );
        Ok(pipeline)
    }
}

fn interleave(
    builtins: &[BuiltinStage],
    references: &[CustomStageRef],
    customs: Vec<(Placement, Arc<dyn Stage>)>,
) -> Result<Vec<Arc<dyn Stage>>, ConfigError> {
    let mut seen = HashSet::new();
    for builtin in builtins {
        if !seen.insert(builtin.kind()) {
            return Err(ConfigError::DuplicateBuiltin(builtin.kind().to_string()));
        }
    }

    for reference in references {
        if let Placement::Before(anchor) | Placement::After(anchor) = reference.placement {
            if !seen.contains(&anchor) {
                return Err(ConfigError::MissingAnchor {
                    stage: reference.name.clone(),
                    anchor: anchor.to_string(),
                });
            }
        }
    }

    let mut stages: Vec<Arc<dyn Stage>> = placed(&customs, Placement::First).collect();
    for builtin in builtins {
        stages.extend(placed(&customs, Placement::Before(builtin.kind())));
        stages.push(instantiate(*builtin));
        stages.extend(placed(&customs, Placement::After(builtin.kind())));
    }
    stages.extend(placed(&customs, Placement::Last));
    Ok(stages)
}

fn placed(
    customs: &[(Placement, Arc<dyn Stage>)],
    wanted: Placement,
) -> impl Iterator<Item = Arc<dyn Stage>> + '_ {
    customs
        .iter()
        .filter(move |(placement, _)| *placement == wanted)
        .map(|(_, stage)| Arc::clone(stage))
}

fn instantiate(builtin: BuiltinStage) -> Arc<dyn Stage> {
    match builtin {
        BuiltinStage::Lowercase => Arc::new(Lowercase),
        BuiltinStage::StripAccents => Arc::new(StripAccents),
        BuiltinStage::Stem(locale) => Arc::new(Stem::new(locale)),
        BuiltinStage::RemoveStopwords(locale) => Arc::new(RemoveStopwords::new(locale)),
    }
}

impl std::fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageRegistry")
            .field("custom", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prep::token::Span;
    use crate::prep::transforms::FnStage;

    fn registry() -> StageRegistry {
        let mut registry = StageRegistry::new();
        registry
            .register(FnStage::map("uppercase", |t| t.to_uppercase()))
            .unwrap();
        registry
            .register(FnStage::map("tag", |t| format!("<{}>", t)))
            .unwrap();
        registry
    }

    #[test]
    fn test_default_pipeline() {
        let pipeline = StageRegistry::new()
            .build(&PipelineOptions::default())
            .unwrap();
        assert_eq!(pipeline.stage_names(), vec!["lowercase"]);
        assert!(!pipeline.bypasses_defaults());
    }

    #[test]
    fn test_ngram_size_zero() {
        let options = PipelineOptions::default().with_ngrams(0);
        assert_eq!(
            StageRegistry::new().build(&options).unwrap_err(),
            ConfigError::InvalidNgramSize(0)
        );
    }

    #[test]
    fn test_empty_connector() {
        let options = PipelineOptions::default().with_ngrams(2).with_connector("");
        assert_eq!(
            StageRegistry::new().build(&options).unwrap_err(),
            ConfigError::EmptyConnector(2)
        );
    }

    #[test]
    fn test_empty_connector_allowed_for_unigrams() {
        let options = PipelineOptions::default().with_connector("");
        assert!(StageRegistry::new().build(&options).is_ok());
    }

    #[test]
    fn test_unknown_custom_stage() {
        let options = PipelineOptions::default().with_custom("shout");
        assert_eq!(
            registry().build(&options).unwrap_err(),
            ConfigError::UnknownStage("shout".into())
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = registry();
        assert_eq!(
            registry.register(FnStage::map("uppercase", |t| t.to_string())),
            Err(ConfigError::DuplicateStage("uppercase".into()))
        );
        assert_eq!(registry.names(), vec!["tag", "uppercase"]);
    }

    #[test]
    fn test_duplicate_builtin() {
        let options = PipelineOptions::empty()
            .with_builtin(BuiltinStage::Stem(Locale::English))
            .with_builtin(BuiltinStage::Stem(Locale::German));
        assert_eq!(
            StageRegistry::new().build(&options).unwrap_err(),
            ConfigError::DuplicateBuiltin("stem".into())
        );
    }

    #[test]
    fn test_missing_anchor() {
        let options = PipelineOptions::default()
            .with_custom(CustomStageRef::new("tag").placed(Placement::After(BuiltinKind::Stem)));
        assert_eq!(
            registry().build(&options).unwrap_err(),
            ConfigError::MissingAnchor {
                stage: "tag".into(),
                anchor: "stem".into()
            }
        );
    }

    #[test]
    fn test_placement_order() {
        let options = PipelineOptions::default()
            .with_builtin(BuiltinStage::Stem(Locale::English))
            .with_custom("tag")
            .with_custom(
                CustomStageRef::new("uppercase").placed(Placement::Before(BuiltinKind::Stem)),
            )
            .with_ngrams(2);
        let pipeline = registry().build(&options).unwrap();
        assert_eq!(
            pipeline.stage_names(),
            vec!["lowercase", "uppercase", "stem", "tag", "ngrams"]
        );
    }

    #[test]
    fn test_first_placement() {
        let options = PipelineOptions::default()
            .with_custom(CustomStageRef::new("tag").placed(Placement::First));
        let pipeline = registry().build(&options).unwrap();
        assert_eq!(pipeline.stage_names(), vec!["tag", "lowercase"]);
    }

    #[test]
    fn test_bypass_ignores_builtins_and_placements() {
        let mut options = PipelineOptions::default()
            .with_builtin(BuiltinStage::Stem(Locale::English))
            .with_custom("tag")
            .with_custom(CustomStageRef::new("uppercase").placed(Placement::First));
        options.bypass_defaults = true;
        let pipeline = registry().build(&options).unwrap();
        assert_eq!(pipeline.stage_names(), vec!["tag", "uppercase"]);
        assert!(pipeline.bypasses_defaults());
    }

    #[test]
    fn test_bypass_skips_anchor_validation() {
        let options = PipelineOptions::bypass()
            .with_custom(CustomStageRef::new("tag").placed(Placement::After(BuiltinKind::Stem)));
        assert!(registry().build(&options).is_ok());
    }

    #[test]
    fn test_bypass_with_custom_uppercase() {
        let options = PipelineOptions::bypass().with_custom("uppercase");
        let doc = registry().build(&options).unwrap().process_text("ok.").unwrap();
        assert_eq!(doc.texts(), vec!["OK"]);
        assert_eq!(doc.tokens()[0].spans, vec![Span::new(0, 2).unwrap()]);
    }

    #[test]
    fn test_bypass_alone_is_identity() {
        let pipeline = StageRegistry::new()
            .build(&PipelineOptions::bypass())
            .unwrap();
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_stem_and_trigrams() {
        let options = PipelineOptions::empty()
            .with_builtin(BuiltinStage::Stem(Locale::English))
            .with_ngrams(3);
        let doc = StageRegistry::new()
            .build(&options)
            .unwrap()
            .process_text("I was wasting your time watching this.")
            .unwrap();
        assert_eq!(
            doc.provenance().lookup("wast your time"),
            vec![
                Span::new(6, 13).unwrap(),
                Span::new(14, 18).unwrap(),
                Span::new(19, 23).unwrap()
            ]
        );
    }
}

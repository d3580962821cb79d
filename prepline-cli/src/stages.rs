//! Demonstration custom stages available to every CLI invocation.
//!
//! `uppercase` is a closure stage; `reverse` implements [`Stage`] directly. Both are referenced
//! by name from `--custom` or from `pipeline.custom_stages` in a config file.

use prepline_core::prep::{ConfigError, FnStage, Stage, StageError, StageRegistry, TokenStream};

/// Reverses the characters of every token.
#[derive(Debug, Default)]
pub(crate) struct Reverse;

impl Stage for Reverse {
    fn name(&self) -> &str {
        "reverse"
    }

    fn run(&self, input: TokenStream) -> Result<TokenStream, StageError> {
        Ok(input.map_text(|text| text.chars().rev().collect()))
    }
}

/// A registry holding the demonstration stages.
pub(crate) fn registry() -> Result<StageRegistry, ConfigError> {
    let mut registry = StageRegistry::new();
    registry.register(FnStage::map("uppercase", |text| text.to_uppercase()))?;
    registry.register(Reverse)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_both_stages() {
        let registry = registry().unwrap();
        assert_eq!(registry.names(), vec!["reverse", "uppercase"]);
    }
}

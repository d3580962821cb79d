//! Lowercasing stage

use crate::prep::error::StageError;
use crate::prep::token::TokenStream;
use crate::prep::transforms::Stage;

/// Unicode lowercasing of every token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lowercase;

impl Lowercase {
    pub fn new() -> Self {
        Lowercase
    }
}

impl Stage for Lowercase {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn run(&self, input: TokenStream) -> Result<TokenStream, StageError> {
        Ok(input.map_text(str::to_lowercase))
    }
}

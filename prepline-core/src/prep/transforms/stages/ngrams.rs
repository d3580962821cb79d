//! N-gram construction stage
//!
//! Slides a window of `size` tokens over the stream and merges each window into one token:
//! texts joined with the connector, spans concatenated in window order. Windows are only
//! emitted where `size` full tokens exist, there is no padding at either end, so a stream
//! shorter than `size` produces nothing.
//!
//! With `keep_lower_orders`, every gram of order `1..=size` that fits is emitted, grouped by
//! starting position and then by ascending order:
//!
//!     a b c, size 2  →  a, a b, b, b c, c

use crate::prep::error::StageError;
use crate::prep::token::{ProcessedToken, TokenStream};
use crate::prep::transforms::Stage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NGrams {
    size: usize,
    connector: String,
    keep_lower_orders: bool,
}

impl NGrams {
    /// `size` must be at least 1; the registry validates this before building.
    pub fn new(size: usize, connector: impl Into<String>) -> Self {
        Self {
            size: size.max(1),
            connector: connector.into(),
            keep_lower_orders: false,
        }
    }

    pub fn with_lower_orders(mut self, keep: bool) -> Self {
        self.keep_lower_orders = keep;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn connector(&self) -> &str {
        &self.connector
    }
}

impl Stage for NGrams {
    fn name(&self) -> &str {
        "ngrams"
    }

    fn run(&self, input: TokenStream) -> Result<TokenStream, StageError> {
        let tokens = input.into_tokens();

        let grams = if self.keep_lower_orders {
            let mut out = Vec::new();
            for start in 0..tokens.len() {
                for order in 1..=self.size {
                    let Some(window) = tokens.get(start..start + order) else {
                        break;
                    };
                    out.push(ProcessedToken::merge(window, &self.connector));
                }
            }
            out
        } else {
            tokens
                .windows(self.size)
                .map(|window| ProcessedToken::merge(window, &self.connector))
                .collect()
        };

        Ok(TokenStream::new(grams))
    }
}

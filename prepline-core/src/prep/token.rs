//! Token types shared across the tokenizer, the stages and the provenance index.
//!
//! Token Layers
//!
//!     Core Tokens:
//!         Word and separator tokens produced by the logos lexer. See [core](core). Separators
//!         never leave the tokenizer, but they are what keeps the word spans honest: a span is
//!         always an exact byte range of the original text.
//!
//!     Raw Tokens:
//!         A word as it appears in the source: its [`Span`] and the substring it denotes. See
//!         [raw](raw). Created once by the tokenizer and never changed afterwards.
//!
//!     Processed Tokens:
//!         What the stages produce. A processed token holds its (possibly transformed) text and
//!         the ordered list of raw spans that contributed to it. A stemmed word has one span, an
//!         n-gram has one span per member. See [processed](processed).
//!
//!     Token Stream:
//!         The value handed from stage to stage. See [stream](stream).
//!
//! Provenance
//!
//!     Spans are the only link back to the source. No stage may invent one: every span in the
//!     output of a pipeline is a span the tokenizer produced. The pipeline checks this after
//!     every stage.

pub mod core;
pub mod processed;
pub mod raw;
pub mod span;
pub mod stream;

pub use core::Token;
pub use processed::ProcessedToken;
pub use raw::RawToken;
pub use span::Span;
pub use stream::TokenStream;

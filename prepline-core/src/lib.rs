//! # prepline
//!
//! Pluggable text preprocessing with reversible token provenance.
//!
//! Raw text is tokenized into byte spans, pushed through an ordered chain of stages
//! (lowercasing, accent stripping, stemming, stopword removal, caller supplied stages,
//! n-gram construction) and comes out as two things:
//!
//!   - a flat stream of processed tokens, ready for a downstream classifier
//!   - a provenance index mapping every processed token back to the raw spans it came from
//!
//! File Layout
//!
//! src/prep
//!   ├── token        Spans, raw and processed tokens, the stage-to-stage token stream
//!   ├── lexing       Word / separator tokenization (logos)
//!   ├── transforms   The Stage trait, closure adapters and the built-in stages
//!   ├── pipeline     Running stages over a document and threading provenance
//!   ├── provenance   Reverse lookup from processed text to raw spans
//!   ├── registry     Pipeline options, custom stage registration, pipeline building
//!   ├── batch        Many documents at once, with skip / abort policies
//!   └── render       Helpers for visualizers (highlighting, raw chains)
//!
//! For test factories and span assertions, see the [testing module](prep::testing).

pub mod prep;

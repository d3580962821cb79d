//! Main module for prepline library functionality

pub mod batch;
pub mod error;
pub mod lexing;
pub mod pipeline;
pub mod provenance;
pub mod registry;
pub mod render;
pub mod testing;
pub mod token;
pub mod transforms;

pub use batch::{
    process_batch, BatchError, BatchPolicy, BatchReport, ClassifierInput, Document, DocumentFailure,
};
pub use error::{ConfigError, PipelineError, StageError, TokenizeError};
pub use lexing::{decode, tokenize, tokenize_bytes};
pub use pipeline::{Pipeline, ProcessedDocument};
pub use provenance::{LookupMode, ProvenanceIndex};
pub use registry::{
    BuiltinKind, BuiltinStage, CustomStageRef, Locale, PipelineOptions, Placement, StageRegistry,
};
pub use render::{chain, explain, highlight, Explanation};
pub use token::{ProcessedToken, RawToken, Span, TokenStream};
pub use transforms::{FnStage, Stage};

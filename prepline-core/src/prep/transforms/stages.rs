//! Built-in stages
//!
//! Every stage here implements [`Stage`](crate::prep::transforms::Stage) directly. The
//! registry turns [`BuiltinStage`](crate::prep::registry::BuiltinStage) options into these.

pub mod accents;
pub mod lowercase;
pub mod ngrams;
pub mod stemming;
pub mod stopwords;

pub use accents::StripAccents;
pub use lowercase::Lowercase;
pub use ngrams::NGrams;
pub use stemming::Stem;
pub use stopwords::RemoveStopwords;

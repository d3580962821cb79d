//! Pipeline options
//!
//! The single configuration value a pipeline is built from. Every field has a serde default,
//! so a configuration file only needs to name what it changes. String forms:
//!
//!     builtin stages:  "lowercase", "strip-accents", "stem:<locale>", "remove-stopwords:<locale>"
//!     placements:      "first", "last", "before:<builtin>", "after:<builtin>"
//!
//! where `<builtin>` is one of `lowercase`, `strip-accents`, `stem`, `remove-stopwords`.

use crate::prep::error::ConfigError;
use crate::prep::registry::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The built-in stages, each independently toggleable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuiltinStage {
    Lowercase,
    StripAccents,
    Stem(Locale),
    RemoveStopwords(Locale),
}

/// A builtin stage without its parameters, used to anchor custom stage placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuiltinKind {
    Lowercase,
    StripAccents,
    Stem,
    RemoveStopwords,
}

impl BuiltinKind {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinKind::Lowercase => "lowercase",
            BuiltinKind::StripAccents => "strip-accents",
            BuiltinKind::Stem => "stem",
            BuiltinKind::RemoveStopwords => "remove-stopwords",
        }
    }
}

impl BuiltinStage {
    pub fn kind(&self) -> BuiltinKind {
        match self {
            BuiltinStage::Lowercase => BuiltinKind::Lowercase,
            BuiltinStage::StripAccents => BuiltinKind::StripAccents,
            BuiltinStage::Stem(_) => BuiltinKind::Stem,
            BuiltinStage::RemoveStopwords(_) => BuiltinKind::RemoveStopwords,
        }
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lowercase" => Ok(BuiltinKind::Lowercase),
            "strip-accents" => Ok(BuiltinKind::StripAccents),
            "stem" => Ok(BuiltinKind::Stem),
            "remove-stopwords" => Ok(BuiltinKind::RemoveStopwords),
            other => Err(ConfigError::UnknownBuiltin(other.to_string())),
        }
    }
}

impl fmt::Display for BuiltinStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinStage::Stem(locale) | BuiltinStage::RemoveStopwords(locale) => {
                write!(f, "{}:{}", self.kind(), locale)
            }
            _ => write!(f, "{}", self.kind()),
        }
    }
}

impl FromStr for BuiltinStage {
    type Err = ConfigError;

    /// `stem` and `remove-stopwords` without a locale default to English.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, locale) = match s.trim().split_once(':') {
            Some((kind, locale)) => (kind, Some(locale.parse::<Locale>()?)),
            None => (s.trim(), None),
        };
        let kind = kind.parse::<BuiltinKind>()?;
        match (kind, locale) {
            (BuiltinKind::Lowercase, None) => Ok(BuiltinStage::Lowercase),
            (BuiltinKind::StripAccents, None) => Ok(BuiltinStage::StripAccents),
            (BuiltinKind::Stem, locale) => Ok(BuiltinStage::Stem(locale.unwrap_or_default())),
            (BuiltinKind::RemoveStopwords, locale) => {
                Ok(BuiltinStage::RemoveStopwords(locale.unwrap_or_default()))
            }
            _ => Err(ConfigError::UnknownBuiltin(s.to_string())),
        }
    }
}

/// Where a custom stage runs relative to the built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Placement {
    /// Before every builtin.
    First,
    /// After every builtin.
    #[default]
    Last,
    /// Immediately before the given builtin.
    Before(BuiltinKind),
    /// Immediately after the given builtin.
    After(BuiltinKind),
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::First => f.write_str("first"),
            Placement::Last => f.write_str("last"),
            Placement::Before(kind) => write!(f, "before:{}", kind),
            Placement::After(kind) => write!(f, "after:{}", kind),
        }
    }
}

impl FromStr for Placement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPlacement(s.to_string());
        match s.trim().split_once(':') {
            None if s.trim() == "first" => Ok(Placement::First),
            None if s.trim() == "last" => Ok(Placement::Last),
            Some(("before", kind)) => kind.parse().map(Placement::Before).map_err(|_| invalid()),
            Some(("after", kind)) => kind.parse().map(Placement::After).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = ConfigError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.to_string()
                }
            }
        )*
    };
}

string_conversions!(BuiltinStage, BuiltinKind, Placement);

/// Reference to a registered custom stage, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomStageRef {
    pub name: String,
    #[serde(default)]
    pub placement: Placement,
}

impl CustomStageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            placement: Placement::default(),
        }
    }

    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

impl From<&str> for CustomStageRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Everything needed to build a [`Pipeline`](crate::prep::pipeline::Pipeline).
///
/// The default is the documented default pipeline: lowercase only, no custom stages,
/// unigrams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Built-in stages, in run order.
    pub builtin_stages: Vec<BuiltinStage>,
    /// Custom stages, by registered name, with their placement.
    pub custom_stages: Vec<CustomStageRef>,
    /// Ignore `builtin_stages` and run only `custom_stages`, in listed order.
    pub bypass_defaults: bool,
    /// N-gram order; 1 adds no n-gram stage.
    pub ngram_size: usize,
    /// Joins n-gram members.
    pub ngram_connector: String,
    /// Also emit every lower-order gram.
    pub keep_lower_orders: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            builtin_stages: vec![BuiltinStage::Lowercase],
            custom_stages: Vec::new(),
            bypass_defaults: false,
            ngram_size: 1,
            ngram_connector: " ".to_string(),
            keep_lower_orders: false,
        }
    }
}

impl PipelineOptions {
    /// Built-ins disabled, nothing else configured: the identity pipeline.
    pub fn bypass() -> Self {
        Self {
            bypass_defaults: true,
            ..Self::default()
        }
    }

    /// No built-ins at all (but not in bypass mode, so placements still validate).
    pub fn empty() -> Self {
        Self {
            builtin_stages: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_builtin(mut self, stage: BuiltinStage) -> Self {
        self.builtin_stages.push(stage);
        self
    }

    pub fn with_custom(mut self, stage: impl Into<CustomStageRef>) -> Self {
        self.custom_stages.push(stage.into());
        self
    }

    pub fn with_ngrams(mut self, size: usize) -> Self {
        self.ngram_size = size;
        self
    }

    pub fn with_connector(mut self, connector: impl Into<String>) -> Self {
        self.ngram_connector = connector.into();
        self
    }

    pub fn with_lower_orders(mut self, keep: bool) -> Self {
        self.keep_lower_orders = keep;
        self
    }
}

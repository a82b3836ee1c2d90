//! Error types for reveal configuration.
//!
//! Runtime reveal handling never fails; these only come out of config
//! validation and root-margin parsing.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RevealError {
    /// Visibility threshold outside [0, 1] (or NaN).
    #[error("visibility threshold {threshold} is outside [0, 1]")]
    ThresholdOutOfRange { threshold: f64 },

    /// Root margin string could not be parsed as CSS margin shorthand.
    #[error("invalid root margin '{input}': {reason}")]
    InvalidRootMargin { input: String, reason: String },

    /// Counter frame interval must be positive.
    #[error("counter frame interval must be greater than zero")]
    ZeroFrameInterval,

    /// A selector in the config was empty.
    #[error("empty selector for {kind}")]
    EmptySelector { kind: String },

    #[error("config parse error: {reason}")]
    ConfigParse { reason: String },
}

impl From<serde_json::Error> for RevealError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = core::result::Result<T, RevealError>;

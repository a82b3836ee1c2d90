use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChromeError {
    #[error("{field} must be a non-negative number of pixels, got {value}")]
    NegativeDistance { field: String, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: String, value: f64 },

    #[error("empty selector for {what}")]
    EmptySelector { what: String },
}

pub type Result<T> = core::result::Result<T, ChromeError>;

//! Error types for job configuration

use thiserror::Error;

/// Reasons operator input cannot be turned into a [`JobConfig`]
///
/// [`JobConfig`]: crate::domain::job::JobConfig
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required field was left empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field does not hold a non-negative integer
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A numeric field is below its minimum
    #[error("{field} must be at least {min}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        value: u32,
    },

    /// A flag field holds something other than a boolean literal
    #[error("{field} must be true or false, got {value:?}")]
    InvalidFlag { field: &'static str, value: String },

    /// An index range entry is neither `n` nor `a-b`
    #[error("invalid index range {0:?}, expected forms like 5 or 1-20")]
    InvalidRange(String),
}

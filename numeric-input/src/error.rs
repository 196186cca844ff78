//! Error types for configuration loading and checking
//!
//! The gatekeeper and validator never fail. These errors only come from
//! reading a configuration or from [`NumericConfig::check`](crate::NumericConfig::check).

use thiserror::Error;

/// Result type for numeric-input operations
pub type Result<T> = std::result::Result<T, NumericInputError>;

/// Errors that can occur while loading or checking a field configuration
#[derive(Debug, Error)]
pub enum NumericInputError {
    /// Lower bound is greater than upper bound
    #[error("min ({min}) is greater than max ({max})")]
    InvertedBounds { min: f64, max: f64 },

    /// Decimal range is empty
    #[error("minDecimals ({min}) is greater than maxDecimals ({max})")]
    InvertedDecimals { min: usize, max: usize },

    /// A bound is NaN or infinite
    #[error("{name} must be a finite number, got {value}")]
    NonFiniteBound { name: &'static str, value: f64 },

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

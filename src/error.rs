//! Error types for the gait sensing engine.

use thiserror::Error;

/// Errors that can occur while configuring or feeding the engine.
#[derive(Debug, Error)]
pub enum GaitError {
    /// A reading carried a NaN or infinite component.
    #[error("invalid sample at {timestamp_ms}ms: {reason}")]
    InvalidSample {
        /// Timestamp of the rejected reading.
        timestamp_ms: u64,
        /// What was wrong with it.
        reason: String,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Required sensor hardware is missing.
    #[error("sensor unavailable: {0}")]
    SensorUnavailable(String),
}

impl GaitError {
    /// Creates an invalid sample error.
    #[must_use]
    pub fn invalid_sample(timestamp_ms: u64, reason: impl Into<String>) -> Self {
        Self::InvalidSample {
            timestamp_ms,
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a config loading error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    /// Creates a sensor unavailable error.
    #[must_use]
    pub fn sensor_unavailable(which: impl Into<String>) -> Self {
        Self::SensorUnavailable(which.into())
    }
}

/// Result type for gait sensing operations.
pub type Result<T> = std::result::Result<T, GaitError>;

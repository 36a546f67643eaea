//! Error types for orbit setup and scene configuration.

use std::path::PathBuf;

/// Rejected orbit parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    /// Orbit period must be finite and strictly positive.
    #[error("orbit period must be a positive, finite number of milliseconds (got {0})")]
    InvalidPeriod(f64),

    /// Orbit radius must be finite and non-negative.
    #[error("orbit radius must be a non-negative, finite number (got {0})")]
    InvalidRadius(f64),

    /// Speed multiplier must be finite.
    #[error("speed multiplier must be finite (got {0})")]
    NonFiniteSpeed(f64),
}

/// Errors that can occur while loading or validating a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A field holds a value outside its accepted range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// Orbit parameters were rejected.
    #[error(transparent)]
    Orbit(#[from] OrbitError),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

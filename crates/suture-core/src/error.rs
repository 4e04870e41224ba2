//! Error types for suture configuration.
//!
//! The per-step update never fails; only configuration and binding paths
//! return `SutureResult<T>`.

use thiserror::Error;

/// External input the configured selection strategy depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredInput {
    /// Body positions, needed by the automatic extremal strategy.
    BodyPositions,
    /// Picker feed, needed by the manual strategy.
    PickerFeed,
}

impl std::fmt::Display for RequiredInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequiredInput::BodyPositions => write!(f, "body positions"),
            RequiredInput::PickerFeed => write!(f, "picker feed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SutureError {
    /// A required input was not bound when the synthesizer was initialized.
    #[error("Missing dependency: no {input} bound")]
    MissingDependency { input: RequiredInput },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Particle index is out of bounds.
    #[error("Particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: u32, count: usize },
}

/// Convenience alias for `Result<T, SutureError>`.
pub type SutureResult<T> = Result<T, SutureError>;

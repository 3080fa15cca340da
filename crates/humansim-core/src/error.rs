//! Error types for the simulation library.
//!
//! The tick path itself is infallible; only world setup can fail.

use thiserror::Error;

/// Errors raised while loading or validating a [`WorldConfig`](crate::config::WorldConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    #[error("failed to parse world config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read world config: {0}")]
    Io(#[from] std::io::Error),
}

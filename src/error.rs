// src/error.rs

use thiserror::Error;

/// Errors raised by the simulation engine.
///
/// All of them are raised at the point of violation and propagate to the
/// caller; nothing in the engine retries.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("invalid offer {0}, expected a value in [0, 1]")]
    InvalidOffer(f64),

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

//! Evaluator error types.

use thiserror::Error;

/// Result type for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while running experiments.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvalError {
    /// Circuit construction failed.
    #[error("Synthesis error: {0}")]
    Synth(String),

    /// Simulation or stress injection failed.
    #[error("Simulation error: {0}")]
    Sim(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Export error: {0}")]
    Export(String),

    /// Invalid sweep or experiment configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<brigade_synth::SynthError> for EvalError {
    fn from(e: brigade_synth::SynthError) -> Self {
        EvalError::Synth(e.to_string())
    }
}

impl From<brigade_sim::SimError> for EvalError {
    fn from(e: brigade_sim::SimError) -> Self {
        EvalError::Sim(e.to_string())
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(e: serde_json::Error) -> Self {
        EvalError::Export(e.to_string())
    }
}

impl From<serde_yaml_ng::Error> for EvalError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        EvalError::Config(e.to_string())
    }
}

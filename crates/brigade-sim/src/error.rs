//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by simulation, verification and stress injection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// More T gates requested for removal than the circuit holds.
    #[error("Cannot cancel {requested} T gates, circuit only has {available}")]
    InsufficientTGates {
        /// Requested cancel count.
        requested: usize,
        /// T and T-dagger gates in the circuit.
        available: usize,
    },

    /// Basis states are packed into a `u128`.
    #[error("Circuit has {qubits} qubits, simulator supports at most {max}")]
    TooManyQubits {
        /// Qubits in the circuit.
        qubits: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Qubit roles do not form a bucket-brigade layout.
    #[error("Circuit does not have a bucket-brigade layout: {0}")]
    LayoutMismatch(String),

    /// Circuit IR error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] brigade_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

//! Error types for the synth crate.

use thiserror::Error;

/// Errors produced while building or expanding a QRAM circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Decomposition name or id not registered in the catalog.
    #[error("Unknown decomposition: {0}")]
    UnknownDecomposition(String),

    /// Mirror strategy name not recognized.
    #[error("Unknown mirror strategy: {0}")]
    UnknownMirrorStrategy(String),

    /// The mirror scheme cannot run with the chosen strategy.
    #[error("Decomposition '{scheme}' cannot be used as mirror with strategy {strategy}")]
    IncompatibleMirrorStrategy {
        /// Mirror decomposition name.
        scheme: String,
        /// Mirror strategy name.
        strategy: String,
    },

    /// The data pass needs a scheme that is exact on any target value.
    #[error("Decomposition '{0}' is compute-only and cannot drive the data pass")]
    IncompatibleDataDecomposition(String),

    /// The address register is wider than the builder supports.
    #[error("Address width {n} exceeds the maximum of {max} qubits")]
    AddressWidthTooLarge {
        /// Requested address qubits.
        n: usize,
        /// Largest supported width.
        max: usize,
    },

    /// The ancilla pool cannot hand out the requested qubits.
    #[error("Ancilla pool exhausted: requested {requested}, {available} available within budget")]
    AncillaPoolExhausted {
        /// Number of ancillas requested.
        requested: usize,
        /// Number that could still be supplied.
        available: usize,
    },

    /// A generator was called with the wrong number of ancillas.
    #[error("Decomposition '{scheme}' needs {expected} ancillas, got {got}")]
    AncillaCountMismatch {
        /// Decomposition name.
        scheme: String,
        /// Declared ancilla requirement.
        expected: usize,
        /// Ancillas supplied.
        got: usize,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] brigade_ir::IrError),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

//! Time-steps of concurrently executable operations.

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::operation::{Operation, Provenance};
use crate::qubit::QubitId;

/// A set of operations acting on pairwise disjoint qubits.
///
/// Operation order inside a moment carries no meaning; it is kept stable so
/// that printing and T-gate enumeration are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Moment {
    operations: Vec<Operation>,
}

impl Moment {
    /// Create an empty moment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a moment from operations, rejecting shared qubits.
    pub fn from_operations(operations: impl IntoIterator<Item = Operation>) -> IrResult<Self> {
        let mut moment = Self::new();
        for op in operations {
            moment.push(op)?;
        }
        Ok(moment)
    }

    /// Add an operation if none of its qubits is already in use.
    pub fn push(&mut self, op: Operation) -> IrResult<()> {
        if let Some(q) = op.qubits.iter().find(|q| self.touches(**q)) {
            return Err(IrError::MomentConflict {
                qubit: *q,
                gate_name: op.gate.name().into(),
            });
        }
        self.operations.push(op);
        Ok(())
    }

    /// Merge another moment into this one.
    pub fn absorb(&mut self, other: Moment) -> IrResult<()> {
        for op in other.operations {
            self.push(op)?;
        }
        Ok(())
    }

    /// Whether any operation acts on `qubit`.
    pub fn touches(&self, qubit: QubitId) -> bool {
        self.operations.iter().any(|op| op.acts_on(qubit))
    }

    /// All qubits used in this moment.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.operations.iter().flat_map(|op| op.qubits.iter().copied())
    }

    /// The operations of this moment.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True if the moment holds no operation (an identity time-step).
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Whether the moment contains a T or T-dagger.
    pub fn has_t(&self) -> bool {
        self.operations.iter().any(|op| op.gate.is_t())
    }

    /// Same qubits, every operation replaced by its adjoint.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            operations: self.operations.iter().map(Operation::inverse).collect(),
        }
    }

    /// Tag every operation with `provenance`.
    #[must_use]
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        for op in &mut self.operations {
            op.provenance = provenance;
        }
        self
    }

    /// Keep only operations for which `keep(index, op)` returns true.
    pub fn retain_indexed(&mut self, mut keep: impl FnMut(usize, &Operation) -> bool) {
        let mut index = 0;
        self.operations.retain(|op| {
            let kept = keep(index, op);
            index += 1;
            kept
        });
    }
}

/// Reverse a moment sequence and invert every gate.
pub fn invert_moments(moments: &[Moment]) -> Vec<Moment> {
    moments.iter().rev().map(Moment::inverse).collect()
}

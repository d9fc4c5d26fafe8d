//! Gate applications with provenance.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;

/// Identifier of one logical Toffoli gadget in a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GadgetId(pub u32);

impl fmt::Display for GadgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Which pass of the bucket-brigade circuit produced a gadget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Root-to-leaves routing.
    Query,
    /// Memory read into the target.
    Data,
    /// Uncomputation of the routing.
    Mirror,
}

impl Phase {
    /// Short name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Query => "query",
            Phase::Data => "data",
            Phase::Mirror => "mirror",
        }
    }
}

/// Where an operation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Emitted directly by the tree builder.
    Native,
    /// Produced by expanding a logical Toffoli gadget.
    Gadget {
        /// The gadget instance.
        gadget: GadgetId,
        /// Name of the decomposition scheme that generated the gate.
        scheme: &'static str,
        /// Pass the gadget belongs to.
        phase: Phase,
    },
}

impl Provenance {
    /// The originating gadget, if any.
    pub fn gadget(&self) -> Option<GadgetId> {
        match self {
            Provenance::Native => None,
            Provenance::Gadget { gadget, .. } => Some(*gadget),
        }
    }
}

/// A gate applied to an ordered tuple of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Operation {
    /// The applied gate.
    pub gate: Gate,
    /// Operands in gate order (controls first, target last).
    pub qubits: Vec<QubitId>,
    /// Origin of the operation.
    pub provenance: Provenance,
}

impl Operation {
    /// Create a native operation, checking arity and operand uniqueness.
    pub fn new(gate: Gate, qubits: Vec<QubitId>) -> IrResult<Self> {
        if qubits.len() != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().into(),
                expected: gate.num_qubits(),
                got: qubits.len(),
            });
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(gate.name().into()),
                });
            }
        }
        Ok(Self {
            gate,
            qubits,
            provenance: Provenance::Native,
        })
    }

    /// Hadamard on `q`.
    pub fn h(q: QubitId) -> Self {
        Self::single(Gate::H, q)
    }

    /// T on `q`.
    pub fn t(q: QubitId) -> Self {
        Self::single(Gate::T, q)
    }

    /// T-dagger on `q`.
    pub fn tdg(q: QubitId) -> Self {
        Self::single(Gate::Tdg, q)
    }

    /// CNOT from `control` to `target`.
    pub fn cx(control: QubitId, target: QubitId) -> IrResult<Self> {
        Self::new(Gate::CX, vec![control, target])
    }

    /// Toffoli on `(c0, c1, target)`.
    pub fn ccx(c0: QubitId, c1: QubitId, target: QubitId) -> IrResult<Self> {
        Self::new(Gate::CCX, vec![c0, c1, target])
    }

    fn single(gate: Gate, q: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![q],
            provenance: Provenance::Native,
        }
    }

    /// Attach a provenance tag.
    #[must_use]
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// The adjoint operation on the same qubits.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            gate: self.gate.inverse(),
            qubits: self.qubits.clone(),
            provenance: self.provenance,
        }
    }

    /// Whether this operation touches `qubit`.
    #[inline]
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        for (i, q) in self.qubits.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{q}")?;
        }
        Ok(())
    }
}

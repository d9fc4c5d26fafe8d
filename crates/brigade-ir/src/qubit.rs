//! Qubit identifiers and roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
///
/// Ids are dense: the n-th qubit added to a circuit has id `n`, which is also
/// its bit position in a simulated basis state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Position of this qubit in dense per-qubit tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// What a qubit is used for in a bucket-brigade circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QubitRole {
    /// One bit of the classical or superposed address.
    Address,
    /// Root wire carrying the routed signal.
    Bus,
    /// Routing qubit owned by an internal tree node, starts in |0⟩.
    Routing,
    /// Memory cell read by the data pass.
    Memory,
    /// Read-out qubit receiving `bus AND memory[address]`.
    Target,
    /// Scratch qubit handed out by the ancilla pool, starts in |0⟩.
    Ancilla,
}

impl QubitRole {
    /// Short name used in reports and diagrams.
    pub fn name(self) -> &'static str {
        match self {
            QubitRole::Address => "address",
            QubitRole::Bus => "bus",
            QubitRole::Routing => "routing",
            QubitRole::Memory => "memory",
            QubitRole::Target => "target",
            QubitRole::Ancilla => "ancilla",
        }
    }

    /// Whether a verifier expects this qubit back in |0⟩ after a query.
    pub fn is_scratch(self) -> bool {
        matches!(self, QubitRole::Routing | QubitRole::Ancilla)
    }
}

impl fmt::Display for QubitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A qubit with its role and a readable label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The unique identifier.
    pub id: QubitId,
    /// What the qubit is used for.
    pub role: QubitRole,
    /// Label such as `a0`, `bus`, `r2`, `m3`, `target` or `anc1`.
    pub name: String,
}

impl Qubit {
    /// Create a new qubit.
    pub fn new(id: QubitId, role: QubitRole, name: impl Into<String>) -> Self {
        Self {
            id,
            role,
            name: name.into(),
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

//! Primitive gate set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clifford+T primitives plus the logical Toffoli.
///
/// `CCX` only appears in expanded circuits when a gadget is kept whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Controlled-X (CNOT), qubits are (control, target).
    CX,
    /// Toffoli, qubits are (control, control, target).
    CCX,
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::CX => "cx",
            Gate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            Gate::H | Gate::S | Gate::Sdg | Gate::T | Gate::Tdg => 1,
            Gate::CX => 2,
            Gate::CCX => 3,
        }
    }

    /// The adjoint gate.
    #[inline]
    pub fn inverse(self) -> Gate {
        match self {
            Gate::S => Gate::Sdg,
            Gate::Sdg => Gate::S,
            Gate::T => Gate::Tdg,
            Gate::Tdg => Gate::T,
            Gate::H | Gate::CX | Gate::CCX => self,
        }
    }

    /// T or T-dagger, the gates counted by T-count and T-depth.
    #[inline]
    pub fn is_t(self) -> bool {
        matches!(self, Gate::T | Gate::Tdg)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_is_involution() {
        for gate in [Gate::H, Gate::S, Gate::Sdg, Gate::T, Gate::Tdg, Gate::CX, Gate::CCX] {
            assert_eq!(gate.inverse().inverse(), gate);
        }
        assert_eq!(Gate::T.inverse(), Gate::Tdg);
        assert_eq!(Gate::S.inverse(), Gate::Sdg);
    }

    #[test]
    fn test_arity() {
        assert_eq!(Gate::T.num_qubits(), 1);
        assert_eq!(Gate::CX.num_qubits(), 2);
        assert_eq!(Gate::CCX.num_qubits(), 3);
    }

    #[test]
    fn test_is_t() {
        assert!(Gate::T.is_t());
        assert!(Gate::Tdg.is_t());
        assert!(!Gate::S.is_t());
    }
}

//! Resource counting over a circuit.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::gate::Gate;
use crate::qubit::QubitRole;

/// Gate and layout statistics of a circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCounts {
    /// Total number of qubits, ancillas included.
    pub qubits: usize,
    /// Qubits allocated from the ancilla pool.
    pub ancillas: usize,
    /// Number of moments.
    pub depth: usize,
    /// T plus T-dagger count.
    pub t_count: usize,
    /// Moments containing at least one T or T-dagger.
    pub t_depth: usize,
    /// CNOT count.
    pub cx_count: usize,
    /// Hadamard count.
    pub h_count: usize,
    /// S plus S-dagger count.
    pub s_count: usize,
    /// Undecomposed Toffolis left in the circuit.
    pub ccx_count: usize,
    /// Distinct gadgets the operations came from.
    pub gadgets: usize,
    /// Count per gate name.
    pub gate_counts: BTreeMap<String, usize>,
}

impl ResourceCounts {
    /// Count the resources of `circuit`.
    pub fn of(circuit: &Circuit) -> Self {
        let mut counts = Self {
            qubits: circuit.num_qubits(),
            ancillas: circuit.qubits_with_role(QubitRole::Ancilla).len(),
            depth: circuit.depth(),
            t_depth: circuit.t_depth(),
            ..Self::default()
        };
        let mut gadgets = FxHashSet::default();

        for (_, op) in circuit.operations() {
            *counts.gate_counts.entry(op.gate.name().to_string()).or_insert(0) += 1;
            match op.gate {
                Gate::T | Gate::Tdg => counts.t_count += 1,
                Gate::CX => counts.cx_count += 1,
                Gate::H => counts.h_count += 1,
                Gate::S | Gate::Sdg => counts.s_count += 1,
                Gate::CCX => counts.ccx_count += 1,
            }
            if let Some(g) = op.provenance.gadget() {
                gadgets.insert(g);
            }
        }
        counts.gadgets = gadgets.len();
        counts
    }

    /// Total number of operations.
    pub fn total_gates(&self) -> usize {
        self.gate_counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{GadgetId, Operation, Phase, Provenance};
    use crate::qubit::QubitId;

    #[test]
    fn test_counts() {
        let mut c = Circuit::new("count");
        c.add_register(QubitRole::Memory, "m", 2);
        c.add_qubit(QubitRole::Ancilla, "anc0");
        let tag = Provenance::Gadget {
            gadget: GadgetId(0),
            scheme: "zero-ancilla-t-depth-4",
            phase: Phase::Query,
        };
        c.push_operation(Operation::h(QubitId(0)).with_provenance(tag))
            .unwrap();
        c.push_operation(Operation::t(QubitId(0)).with_provenance(tag))
            .unwrap();
        c.push_operation(Operation::cx(QubitId(0), QubitId(1)).unwrap())
            .unwrap();
        c.push_operation(Operation::tdg(QubitId(2))).unwrap();

        let r = ResourceCounts::of(&c);
        assert_eq!(r.qubits, 3);
        assert_eq!(r.ancillas, 1);
        assert_eq!(r.depth, 4);
        assert_eq!(r.t_count, 2);
        assert_eq!(r.t_depth, 2);
        assert_eq!(r.cx_count, 1);
        assert_eq!(r.h_count, 1);
        assert_eq!(r.gadgets, 1);
        assert_eq!(r.gate_counts.get("tdg"), Some(&1));
        assert_eq!(r.total_gates(), 4);
    }
}

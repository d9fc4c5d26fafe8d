//! Moment-by-moment simulation traces.

use brigade_ir::Circuit;
use serde::Serialize;

use crate::error::SimResult;
use crate::layout::{BasisInput, QramLayout};
use crate::state::{SparseState, bitstring};
use crate::verifier::ObservedAmplitude;

/// State size after one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    /// Moment index.
    pub moment: usize,
    /// Operations in the moment.
    pub operations: usize,
    /// Non-zero amplitudes after the moment.
    pub support: usize,
}

/// A full run of one basis input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationTrace {
    /// Circuit name.
    pub circuit: String,
    /// Initial basis state, qubit 0 first.
    pub initial: String,
    /// Ideal output when the circuit has a QRAM layout.
    pub expected: Option<String>,
    /// One step per moment.
    pub steps: Vec<TraceStep>,
    /// Final amplitudes, largest first.
    pub amplitudes: Vec<ObservedAmplitude>,
}

impl SimulationTrace {
    /// Largest support reached during the run.
    pub fn peak_support(&self) -> usize {
        self.steps.iter().map(|s| s.support).max().unwrap_or(1)
    }
}

/// Trace `circuit` starting from `input`.
pub fn trace(circuit: &Circuit, input: &BasisInput) -> SimResult<SimulationTrace> {
    let layout = QramLayout::from_circuit(circuit)?;
    let start = layout.encode(input);
    let expected = (!layout.is_empty())
        .then(|| bitstring(layout.encode(&layout.ideal(input)), layout.num_qubits));

    let mut state = SparseState::basis(layout.num_qubits, start)?;
    let mut steps = Vec::with_capacity(circuit.depth());
    for (moment, m) in circuit.moments().iter().enumerate() {
        state.apply_moment(m);
        steps.push(TraceStep {
            moment,
            operations: m.len(),
            support: state.support(),
        });
    }

    let amplitudes = state
        .dominant(usize::MAX)
        .into_iter()
        .map(|(b, a)| ObservedAmplitude::new(b, a, layout.num_qubits))
        .collect();
    Ok(SimulationTrace {
        circuit: circuit.name().to_string(),
        initial: bitstring(start, layout.num_qubits),
        expected,
        steps,
        amplitudes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_ir::{Operation, QubitRole};

    #[test]
    fn test_trace_records_every_moment() {
        let mut c = Circuit::new("route");
        let a = c.add_qubit(QubitRole::Address, "a0");
        let bus = c.add_qubit(QubitRole::Bus, "bus");
        let r = c.add_qubit(QubitRole::Routing, "r0");
        c.add_register(QubitRole::Memory, "m", 2);
        c.add_qubit(QubitRole::Target, "target");
        c.push_operation(Operation::h(a)).unwrap();
        c.push_operation(Operation::ccx(a, bus, r).unwrap()).unwrap();
        c.push_operation(Operation::h(a)).unwrap();

        let input = BasisInput {
            address: 0,
            bus: true,
            memory: 0,
            target: false,
        };
        let tr = trace(&c, &input).unwrap();
        assert_eq!(tr.steps.len(), 3);
        assert_eq!(tr.steps[0].support, 2);
        assert_eq!(tr.steps[1].support, 2);
        assert_eq!(tr.peak_support(), 4);
        assert_eq!(tr.initial, "010000");
        assert_eq!(tr.expected.as_deref(), Some("010000"));
        assert_eq!(tr.amplitudes.len(), 4);
    }
}

//! Peephole rewriting of neighbouring gates.
//!
//! Two operations are neighbours when the second is the next operation on
//! every qubit of the first and both act on the same qubits in the same
//! order. Neighbours are rewritten as follows:
//!
//! | Pair | Result |
//! |------|--------|
//! | `T Tdg`, `S Sdg`, `H H`, `CX CX`, `CCX CCX` (either order) | removed |
//! | `T T` | `S` |
//! | `Tdg Tdg` | `Sdg` |
//!
//! Every rewrite is an exact identity, so the optimized circuit has the same
//! unitary. Sweeps repeat until one changes nothing; moments left empty are
//! then dropped.

use brigade_ir::{Circuit, Gate, Moment, OpSite, Operation, QubitId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SynthResult;

/// What an optimization run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeepholeStats {
    /// Sweeps over the circuit, including the final one that changed nothing.
    pub rounds: usize,
    /// Neighbour pairs removed.
    pub cancelled_pairs: usize,
    /// `T T` and `Tdg Tdg` pairs merged into one gate.
    pub merged_pairs: usize,
    /// Moments dropped because they became empty.
    pub removed_moments: usize,
}

impl PeepholeStats {
    /// Whether any gate was removed or merged.
    pub fn changed(&self) -> bool {
        self.cancelled_pairs + self.merged_pairs > 0
    }
}

enum Rewrite {
    Cancel,
    Merge(Gate),
}

fn rewrite(first: Gate, second: Gate) -> Option<Rewrite> {
    match (first, second) {
        (Gate::T, Gate::T) => Some(Rewrite::Merge(Gate::S)),
        (Gate::Tdg, Gate::Tdg) => Some(Rewrite::Merge(Gate::Sdg)),
        (a, b) if a.inverse() == b => Some(Rewrite::Cancel),
        _ => None,
    }
}

/// Clifford+T peephole optimizer, run to a fixed point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Peephole;

impl Peephole {
    /// Create the optimizer.
    pub fn new() -> Self {
        Self
    }

    /// Optimized copy of `circuit` with the same qubit table.
    pub fn run(&self, circuit: &Circuit) -> SynthResult<(Circuit, PeepholeStats)> {
        let mut slots: Vec<Vec<Option<Operation>>> = circuit
            .moments()
            .iter()
            .map(|m| m.operations().iter().cloned().map(Some).collect())
            .collect();

        let mut stats = PeepholeStats::default();
        loop {
            let (cancelled, merged) = sweep(&mut slots, circuit.num_qubits());
            stats.rounds += 1;
            stats.cancelled_pairs += cancelled;
            stats.merged_pairs += merged;
            if cancelled + merged == 0 {
                break;
            }
        }

        let mut out = Circuit::new(circuit.name());
        for q in circuit.qubits() {
            out.add_qubit(q.role, q.name.clone());
        }
        for moment in slots {
            let ops: Vec<Operation> = moment.into_iter().flatten().collect();
            if ops.is_empty() {
                stats.removed_moments += 1;
                continue;
            }
            out.push_moment(Moment::from_operations(ops)?)?;
        }

        debug!(
            rounds = stats.rounds,
            cancelled = stats.cancelled_pairs,
            merged = stats.merged_pairs,
            depth_before = circuit.depth(),
            depth_after = out.depth(),
            "peephole optimization"
        );
        Ok((out, stats))
    }
}

/// One pass in moment order. Returns (cancelled, merged) pair counts.
fn sweep(slots: &mut [Vec<Option<Operation>>], num_qubits: usize) -> (usize, usize) {
    // Latest surviving operation per qubit; `None` after a cancellation
    // exposes an older operation, which the next sweep picks up.
    let mut last: Vec<Option<OpSite>> = vec![None; num_qubits];
    let mut cancelled = 0;
    let mut merged = 0;

    for m in 0..slots.len() {
        for i in 0..slots[m].len() {
            let Some(op) = slots[m][i].as_ref() else {
                continue;
            };
            let gate = op.gate;
            let qubits = op.qubits.clone();

            let action = neighbour(&last, &qubits).and_then(|p| {
                let earlier = slots[p.moment][p.index].as_ref()?;
                if earlier.qubits != qubits {
                    return None;
                }
                rewrite(earlier.gate, gate).map(|r| (p, r))
            });

            match action {
                Some((p, Rewrite::Cancel)) => {
                    slots[p.moment][p.index] = None;
                    slots[m][i] = None;
                    for q in &qubits {
                        last[q.index()] = None;
                    }
                    cancelled += 1;
                }
                Some((p, Rewrite::Merge(into))) => {
                    if let Some(earlier) = slots[p.moment][p.index].as_mut() {
                        earlier.gate = into;
                    }
                    slots[m][i] = None;
                    merged += 1;
                }
                None => {
                    let here = OpSite { moment: m, index: i };
                    for q in &qubits {
                        last[q.index()] = Some(here);
                    }
                }
            }
        }
    }
    (cancelled, merged)
}

/// The operation preceding one on `qubits`, if it is the same on all of them.
fn neighbour(last: &[Option<OpSite>], qubits: &[QubitId]) -> Option<OpSite> {
    let first = last[qubits.first()?.index()]?;
    qubits
        .iter()
        .all(|q| last[q.index()] == Some(first))
        .then_some(first)
}

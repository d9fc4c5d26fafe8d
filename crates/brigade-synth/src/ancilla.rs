//! Ancilla pool.

use brigade_ir::{Circuit, QubitId, QubitRole};

use crate::error::{SynthError, SynthResult};

/// Lazily allocated scratch qubits with an optional size budget.
///
/// Released qubits are handed out again, lowest id first, before any new
/// qubit is added to the circuit. All registered schemes return their
/// ancillas to |0⟩, so a released qubit is always clean.
#[derive(Debug, Clone, Default)]
pub struct AncillaPool {
    budget: Option<usize>,
    allocated: Vec<QubitId>,
    free: Vec<QubitId>,
}

impl AncillaPool {
    /// Pool that may grow to `budget` qubits (`None` for unbounded).
    pub fn new(budget: Option<usize>) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    /// Take `count` ancillas, allocating new ones in `circuit` if needed.
    ///
    /// Either all `count` qubits are handed out or none are.
    pub fn acquire(&mut self, circuit: &mut Circuit, count: usize) -> SynthResult<Vec<QubitId>> {
        let reused = self.free.len().min(count);
        let fresh = count - reused;
        if let Some(budget) = self.budget {
            let room = budget.saturating_sub(self.allocated.len());
            if fresh > room {
                return Err(SynthError::AncillaPoolExhausted {
                    requested: count,
                    available: self.free.len() + room,
                });
            }
        }

        let mut out: Vec<QubitId> = self.free.drain(..reused).collect();
        for _ in 0..fresh {
            let name = format!("anc{}", self.allocated.len());
            let id = circuit.add_qubit(QubitRole::Ancilla, name);
            self.allocated.push(id);
            out.push(id);
        }
        Ok(out)
    }

    /// Return ancillas to the pool.
    pub fn release(&mut self, qubits: impl IntoIterator<Item = QubitId>) {
        self.free.extend(qubits);
        self.free.sort_unstable();
    }

    /// Every ancilla allocated so far.
    pub fn allocated(&self) -> &[QubitId] {
        &self.allocated
    }

    /// Ancillas currently handed out.
    pub fn in_use(&self) -> usize {
        self.allocated.len() - self.free.len()
    }

    /// The configured budget.
    pub fn budget(&self) -> Option<usize> {
        self.budget
    }
}

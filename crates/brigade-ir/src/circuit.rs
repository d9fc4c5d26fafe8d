//! Moment-ordered circuit container.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::moment::Moment;
use crate::operation::Operation;
use crate::qubit::{Qubit, QubitId, QubitRole};

/// Position of one operation: moment index and slot inside the moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OpSite {
    /// Index of the moment.
    pub moment: usize,
    /// Index of the operation inside the moment.
    pub index: usize,
}

/// A quantum circuit as an ordered list of moments over role-tagged qubits.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits, indexed by `QubitId`.
    qubits: Vec<Qubit>,
    /// Time-ordered moments.
    moments: Vec<Moment>,
    /// Per qubit, the first moment index after its last use.
    #[serde(skip)]
    frontier: Vec<usize>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a single qubit with a role and label.
    pub fn add_qubit(&mut self, role: QubitRole, name: impl Into<String>) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id, role, name));
        self.frontier.push(0);
        id
    }

    /// Add `size` qubits labelled `{prefix}0 .. {prefix}{size-1}`.
    pub fn add_register(&mut self, role: QubitRole, prefix: &str, size: usize) -> Vec<QubitId> {
        (0..size)
            .map(|i| self.add_qubit(role, format!("{prefix}{i}")))
            .collect()
    }

    // =========================================================================
    // Appending
    // =========================================================================

    /// Append a moment at the end of the circuit.
    pub fn push_moment(&mut self, moment: Moment) -> IrResult<usize> {
        self.check_qubits(&moment)?;
        let index = self.moments.len();
        for q in moment.qubits() {
            self.frontier[q.index()] = index + 1;
        }
        self.moments.push(moment);
        Ok(index)
    }

    /// Append a single operation as its own moment.
    pub fn push_operation(&mut self, op: Operation) -> IrResult<usize> {
        self.push_moment(Moment::from_operations([op])?)
    }

    /// Place a moment at the earliest index after the last use of its qubits.
    ///
    /// The moment merges into an existing one when that index is already
    /// occupied. Returns the index used, or `None` for an empty moment.
    pub fn schedule_moment(&mut self, moment: Moment) -> IrResult<Option<usize>> {
        if moment.is_empty() {
            return Ok(None);
        }
        self.check_qubits(&moment)?;
        let slot = moment
            .qubits()
            .map(|q| self.frontier[q.index()])
            .max()
            .unwrap_or(0);
        for q in moment.qubits() {
            self.frontier[q.index()] = slot + 1;
        }
        if slot == self.moments.len() {
            self.moments.push(moment);
        } else {
            self.moments[slot].absorb(moment)?;
        }
        Ok(Some(slot))
    }

    fn check_qubits(&self, moment: &Moment) -> IrResult<()> {
        for op in moment.operations() {
            for q in &op.qubits {
                if q.index() >= self.qubits.len() {
                    return Err(IrError::QubitNotFound {
                        qubit: *q,
                        gate_name: Some(op.gate.name().into()),
                    });
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Name of the circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// All qubits in id order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Look up a qubit.
    pub fn qubit(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.get(id.index())
    }

    /// Ids of all qubits with the given role, in id order.
    pub fn qubits_with_role(&self, role: QubitRole) -> Vec<QubitId> {
        self.qubits
            .iter()
            .filter(|q| q.role == role)
            .map(|q| q.id)
            .collect()
    }

    /// The moments in time order.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Number of moments, including empty ones.
    pub fn depth(&self) -> usize {
        self.moments.len()
    }

    /// Number of moments containing a T or T-dagger.
    pub fn t_depth(&self) -> usize {
        self.moments.iter().filter(|m| m.has_t()).count()
    }

    /// Iterate over all operations with their sites, in moment order.
    pub fn operations(&self) -> impl Iterator<Item = (OpSite, &Operation)> + '_ {
        self.moments.iter().enumerate().flat_map(|(m, moment)| {
            moment
                .operations()
                .iter()
                .enumerate()
                .map(move |(index, op)| (OpSite { moment: m, index }, op))
        })
    }

    /// Sites of every T and T-dagger, in moment order.
    pub fn t_sites(&self) -> Vec<OpSite> {
        self.operations()
            .filter(|(_, op)| op.gate.is_t())
            .map(|(site, _)| site)
            .collect()
    }

    /// Copy of the circuit with the operations at `sites` deleted.
    ///
    /// Moments that become empty are kept as identity time-steps so the
    /// remaining operations keep their positions.
    pub fn without_operations(&self, sites: &[OpSite]) -> Circuit {
        let removed: FxHashSet<OpSite> = sites.iter().copied().collect();
        let mut out = self.clone();
        for (m, moment) in out.moments.iter_mut().enumerate() {
            moment.retain_indexed(|index, _| !removed.contains(&OpSite { moment: m, index }));
        }
        out
    }

    /// Re-check every structural invariant: known qubits and disjoint moments.
    pub fn validate(&self) -> IrResult<()> {
        for moment in &self.moments {
            self.check_qubits(moment)?;
            Moment::from_operations(moment.operations().iter().cloned())?;
        }
        Ok(())
    }
}

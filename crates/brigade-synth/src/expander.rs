//! Gate-level expansion of logical passes.

use brigade_ir::{Circuit, Moment, Provenance, QubitId};
use tracing::{debug, warn};

use crate::ancilla::AncillaPool;
use crate::catalog::{Catalog, DecompositionScheme};
use crate::error::{SynthError, SynthResult};
use crate::tree::{Gadget, LogicalOp, LogicalPass, SiblingGroup};

/// Replaces logical gadgets with scheme moments and schedules them.
///
/// In serial mode every moment is appended. In parallel mode every moment is
/// placed, as a unit, right after the last moment touching its qubits.
pub struct Expander<'a> {
    catalog: &'a Catalog,
    parallel: bool,
    pool: AncillaPool,
    serialized_groups: usize,
}

impl<'a> Expander<'a> {
    /// Create an expander drawing schemes from `catalog`.
    pub fn new(catalog: &'a Catalog, parallel: bool, ancilla_budget: Option<usize>) -> Self {
        Self {
            catalog,
            parallel,
            pool: AncillaPool::new(ancilla_budget),
            serialized_groups: 0,
        }
    }

    /// Sibling groups that fell back to serial placement for lack of ancillas.
    pub fn serialized_groups(&self) -> usize {
        self.serialized_groups
    }

    /// The ancilla pool.
    pub fn pool(&self) -> &AncillaPool {
        &self.pool
    }

    /// Expand `pass` into `circuit`.
    pub fn expand(&mut self, circuit: &mut Circuit, pass: &LogicalPass) -> SynthResult<()> {
        let catalog = self.catalog;
        let scheme = catalog.lookup(pass.scheme)?;
        let before = circuit.depth();
        for group in &pass.groups {
            self.expand_group(circuit, pass, scheme, group)?;
        }
        debug!(
            phase = pass.phase.name(),
            scheme = %scheme.id,
            gadgets = pass.gadget_count(),
            moments_added = circuit.depth() - before,
            parallel = self.parallel,
            "expanded pass"
        );
        Ok(())
    }

    fn expand_group(
        &mut self,
        circuit: &mut Circuit,
        pass: &LogicalPass,
        scheme: &DecompositionScheme,
        group: &SiblingGroup,
    ) -> SynthResult<()> {
        let packed = self.parallel && scheme.parallelizable;
        let per_gadget = scheme.ancillas();

        // One set per gadget when packing, otherwise one shared set and
        // serial placement.
        let mut shared = !packed;
        let mut sets: Vec<Vec<QubitId>> = Vec::new();
        if per_gadget > 0 {
            if packed {
                match self.pool.acquire(circuit, per_gadget * group.gadget_count()) {
                    Ok(qubits) => sets = qubits.chunks(per_gadget).map(<[_]>::to_vec).collect(),
                    Err(SynthError::AncillaPoolExhausted {
                        requested,
                        available,
                    }) => {
                        warn!(
                            phase = pass.phase.name(),
                            scheme = %scheme.id,
                            requested,
                            available,
                            "ancilla pool exhausted, serializing sibling group"
                        );
                        self.serialized_groups += 1;
                        shared = true;
                    }
                    Err(e) => return Err(e),
                }
            }
            if shared {
                sets = vec![self.pool.acquire(circuit, per_gadget)?];
            }
        }

        let mut next_set = 0;
        for op in &group.ops {
            match op {
                LogicalOp::Native(op) => {
                    self.place(circuit, Moment::from_operations([op.clone()])?, false)?;
                }
                LogicalOp::Gadget(gadget) => {
                    let ancillas: &[QubitId] = match sets.get(if shared { 0 } else { next_set }) {
                        Some(set) => set.as_slice(),
                        None => &[],
                    };
                    next_set += 1;
                    for moment in expand_gadget(scheme, gadget, ancillas, pass)? {
                        self.place(circuit, moment, shared)?;
                    }
                }
            }
        }

        for set in sets {
            self.pool.release(set);
        }
        Ok(())
    }

    fn place(&self, circuit: &mut Circuit, moment: Moment, force_serial: bool) -> SynthResult<()> {
        if self.parallel && !force_serial {
            circuit.schedule_moment(moment)?;
        } else {
            circuit.push_moment(moment)?;
        }
        Ok(())
    }
}

/// Gate-level moments of one gadget, tagged with their provenance.
fn expand_gadget(
    scheme: &DecompositionScheme,
    gadget: &Gadget,
    ancillas: &[QubitId],
    pass: &LogicalPass,
) -> SynthResult<Vec<Moment>> {
    let [c0, c1] = gadget.controls;
    let moments = if gadget.inverted {
        scheme.generate_inverse(c0, c1, gadget.target, ancillas)?
    } else {
        scheme.generate(c0, c1, gadget.target, ancillas)?
    };
    let tag = Provenance::Gadget {
        gadget: gadget.id,
        scheme: scheme.name(),
        phase: pass.phase,
    };
    Ok(moments.into_iter().map(|m| m.with_provenance(tag)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DecompositionId;
    use crate::tree::{GadgetIds, QramTree};
    use brigade_ir::{QubitRole, ResourceCounts};

    fn expand_query(id: DecompositionId, n: usize, parallel: bool, budget: Option<usize>) -> (Circuit, usize) {
        let catalog = Catalog::standard();
        let mut circuit = Circuit::new("x");
        let tree = QramTree::allocate(&mut circuit, n);
        let pass = tree
            .query_pass(catalog.lookup(id).unwrap(), &mut GadgetIds::new())
            .unwrap();
        let mut expander = Expander::new(&catalog, parallel, budget);
        expander.expand(&mut circuit, &pass).unwrap();
        (circuit, expander.serialized_groups())
    }

    #[test]
    fn test_serial_depth_is_sum_of_gadgets() {
        let (circuit, _) = expand_query(DecompositionId::ZeroAncillaTDepth4, 2, false, None);
        // 3 gadgets of depth 12 plus 3 native CNOTs.
        assert_eq!(circuit.depth(), 3 * 12 + 3);
        let counts = ResourceCounts::of(&circuit);
        assert_eq!(counts.t_count, 3 * 7);
        assert_eq!(counts.gadgets, 3);
    }

    #[test]
    fn test_parallel_never_deeper() {
        for id in DecompositionId::ALL {
            let (serial, _) = expand_query(id, 3, false, None);
            let (packed, _) = expand_query(id, 3, true, None);
            let s = ResourceCounts::of(&serial);
            let p = ResourceCounts::of(&packed);
            assert!(p.t_depth <= s.t_depth, "{id}");
            assert!(p.depth <= s.depth, "{id}");
            assert_eq!(p.t_count, s.t_count, "{id}");
        }
    }

    #[test]
    fn test_serial_reuses_one_ancilla_set() {
        let (circuit, serialized) = expand_query(DecompositionId::FourAncillaTDepth1A, 3, false, None);
        assert_eq!(circuit.qubits_with_role(QubitRole::Ancilla).len(), 4);
        assert_eq!(serialized, 0);
    }

    #[test]
    fn test_parallel_takes_one_set_per_sibling() {
        let (circuit, serialized) = expand_query(DecompositionId::OneAncillaTDepth2, 3, true, None);
        // Widest level has 4 siblings.
        assert_eq!(circuit.qubits_with_role(QubitRole::Ancilla).len(), 4);
        assert_eq!(serialized, 0);
    }

    #[test]
    fn test_budget_falls_back_to_serial() {
        let (circuit, serialized) = expand_query(DecompositionId::OneAncillaTDepth2, 3, true, Some(2));
        assert_eq!(circuit.qubits_with_role(QubitRole::Ancilla).len(), 2);
        // Level 2 (four siblings) cannot get four sets.
        assert_eq!(serialized, 1);
    }

    #[test]
    fn test_budget_below_one_set_is_fatal() {
        let catalog = Catalog::standard();
        let mut circuit = Circuit::new("x");
        let tree = QramTree::allocate(&mut circuit, 1);
        let scheme = catalog.lookup(DecompositionId::FourAncillaTDepth1A).unwrap();
        let pass = tree.query_pass(scheme, &mut GadgetIds::new()).unwrap();
        let mut expander = Expander::new(&catalog, true, Some(3));
        let err = expander.expand(&mut circuit, &pass).unwrap_err();
        assert!(matches!(err, SynthError::AncillaPoolExhausted { requested: 4, .. }));
    }

    #[test]
    fn test_provenance_tags() {
        let (circuit, _) = expand_query(DecompositionId::RelativePhaseTDepth4Cx3, 1, false, None);
        let tagged = circuit
            .operations()
            .filter(|(_, op)| matches!(op.provenance, Provenance::Gadget { scheme, .. } if scheme == "relative-phase-t-depth-4-cx-3"))
            .count();
        assert_eq!(tagged, 9);
    }
}

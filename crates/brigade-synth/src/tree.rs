//! Bucket-brigade routing tree and its logical passes.
//!
//! Node `(level, prefix)` owns routing qubit `r[2^level - 1 + prefix]`. At
//! level `l` every active wire `w` with prefix `p` is split by address bit
//! `a_l`: a Toffoli copies `a_l AND w` onto the node's routing qubit, then a
//! CNOT clears it from `w`. The routing qubit continues as prefix `2p + 1`
//! and `w` continues as prefix `2p`. After `n` levels exactly one of the
//! `2^n` leaf wires carries the bus value for any classical address.

use brigade_ir::{Circuit, GadgetId, Operation, Phase, QubitId, QubitRole};
use serde::Serialize;
use tracing::debug;

use crate::catalog::{DecompositionId, DecompositionScheme, ExitState};
use crate::error::{SynthError, SynthResult};

/// One logical Toffoli to be expanded by a decomposition scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gadget {
    /// Unique id within a build.
    pub id: GadgetId,
    /// The two controls.
    pub controls: [QubitId; 2],
    /// The target.
    pub target: QubitId,
    /// Expand with the gate-level adjoint of the scheme.
    pub inverted: bool,
}

/// A step of a logical pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    /// Toffoli gadget, decomposed at expansion time.
    Gadget(Gadget),
    /// Gate emitted as is.
    Native(Operation),
}

/// Operations of one tree level (or the whole data pass).
///
/// Gadgets in a group act on disjoint routing qubits, so in parallel mode the
/// group is the unit that requests ancilla sets from the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiblingGroup {
    /// Operations in emission order.
    pub ops: Vec<LogicalOp>,
}

impl SiblingGroup {
    /// Gadgets in this group.
    pub fn gadgets(&self) -> impl Iterator<Item = &Gadget> {
        self.ops.iter().filter_map(|op| match op {
            LogicalOp::Gadget(g) => Some(g),
            LogicalOp::Native(_) => None,
        })
    }

    /// Number of gadgets in this group.
    pub fn gadget_count(&self) -> usize {
        self.gadgets().count()
    }
}

/// A logical pass: gadgets and native gates, grouped by tree level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalPass {
    /// Which pass this is.
    pub phase: Phase,
    /// Scheme used to expand every gadget of the pass.
    pub scheme: DecompositionId,
    /// Sibling groups in order.
    pub groups: Vec<SiblingGroup>,
}

impl LogicalPass {
    /// Total number of gadgets.
    pub fn gadget_count(&self) -> usize {
        self.groups.iter().map(SiblingGroup::gadget_count).sum()
    }

    /// All gadgets in emission order.
    pub fn gadgets(&self) -> impl Iterator<Item = &Gadget> {
        self.groups.iter().flat_map(SiblingGroup::gadgets)
    }
}

/// Sequential gadget id allocator shared by the passes of one build.
#[derive(Debug, Clone, Default)]
pub struct GadgetIds {
    next: u32,
}

impl GadgetIds {
    /// Start at `g0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> GadgetId {
        let id = GadgetId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> usize {
        self.next as usize
    }
}

/// Registers of an `n`-level bucket-brigade tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QramTree {
    /// Address bits, `a0` most significant.
    pub address: Vec<QubitId>,
    /// Root wire.
    pub bus: QubitId,
    /// One routing qubit per internal node, breadth-first.
    pub routing: Vec<QubitId>,
    /// One memory cell per leaf.
    pub memory: Vec<QubitId>,
    /// Read-out qubit.
    pub target: QubitId,
}

impl QramTree {
    /// Add the registers of an `n`-level tree to `circuit`.
    ///
    /// Qubits are laid out as address, bus, routing, memory, target.
    pub fn allocate(circuit: &mut Circuit, n: usize) -> Self {
        let address = circuit.add_register(QubitRole::Address, "a", n);
        let bus = circuit.add_qubit(QubitRole::Bus, "bus");
        let routing = circuit.add_register(QubitRole::Routing, "r", (1 << n) - 1);
        let memory = circuit.add_register(QubitRole::Memory, "m", 1 << n);
        let target = circuit.add_qubit(QubitRole::Target, "target");
        Self {
            address,
            bus,
            routing,
            memory,
            target,
        }
    }

    /// Number of address bits.
    pub fn levels(&self) -> usize {
        self.address.len()
    }

    /// Routing qubit of node `(level, prefix)`.
    pub fn node(&self, level: usize, prefix: usize) -> QubitId {
        self.routing[(1 << level) - 1 + prefix]
    }

    /// Active wires after `levels` splits, indexed by prefix.
    pub fn wires_after(&self, levels: usize) -> Vec<QubitId> {
        let mut wires = vec![self.bus];
        for level in 0..levels {
            wires = wires
                .iter()
                .enumerate()
                .flat_map(|(prefix, &w)| [w, self.node(level, prefix)])
                .collect();
        }
        wires
    }

    /// Leaf wire of every address.
    pub fn leaf_wires(&self) -> Vec<QubitId> {
        self.wires_after(self.levels())
    }

    /// Routing pass from the root to the leaves, one group per level.
    pub fn query_pass(
        &self,
        scheme: &DecompositionScheme,
        ids: &mut GadgetIds,
    ) -> SynthResult<LogicalPass> {
        let mut groups = Vec::with_capacity(self.levels());
        for (level, &bit) in self.address.iter().enumerate() {
            let mut group = SiblingGroup::default();
            for (prefix, &wire) in self.wires_after(level).iter().enumerate() {
                let node = self.node(level, prefix);
                group.ops.push(LogicalOp::Gadget(Gadget {
                    id: ids.next_id(),
                    controls: [bit, wire],
                    target: node,
                    inverted: false,
                }));
                group.ops.push(LogicalOp::Native(Operation::cx(node, wire)?));
            }
            groups.push(group);
        }

        let pass = LogicalPass {
            phase: Phase::Query,
            scheme: scheme.id,
            groups,
        };
        debug!(
            levels = self.levels(),
            gadgets = pass.gadget_count(),
            scheme = %scheme.id,
            "built query pass"
        );
        Ok(pass)
    }

    /// Memory read: `target ^= leaf(x) AND m_x` for every leaf.
    pub fn data_pass(
        &self,
        scheme: &DecompositionScheme,
        ids: &mut GadgetIds,
    ) -> SynthResult<LogicalPass> {
        if scheme.exit_state == ExitState::ComputeOnly {
            return Err(SynthError::IncompatibleDataDecomposition(
                scheme.name().to_string(),
            ));
        }
        let ops = self
            .leaf_wires()
            .into_iter()
            .zip(&self.memory)
            .map(|(leaf, &cell)| {
                LogicalOp::Gadget(Gadget {
                    id: ids.next_id(),
                    controls: [leaf, cell],
                    target: self.target,
                    inverted: false,
                })
            })
            .collect();

        let pass = LogicalPass {
            phase: Phase::Data,
            scheme: scheme.id,
            groups: vec![SiblingGroup { ops }],
        };
        debug!(gadgets = pass.gadget_count(), scheme = %scheme.id, "built data pass");
        Ok(pass)
    }
}

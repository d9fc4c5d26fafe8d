//! Mirror (uncompute) pass construction.

use std::fmt;
use std::str::FromStr;

use brigade_ir::Phase;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{DecompositionScheme, ExitState};
use crate::error::{SynthError, SynthResult};
use crate::tree::{Gadget, GadgetIds, LogicalOp, LogicalPass, SiblingGroup};

/// How the mirror pass is derived from the query pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MirrorStrategy {
    /// Reverse the query and invert every gadget at gate level.
    #[default]
    OutToIn,
    /// Re-run the levels from the leaves inward with forward gadgets.
    InToOut,
}

impl MirrorStrategy {
    /// Both strategies.
    pub const ALL: [MirrorStrategy; 2] = [MirrorStrategy::OutToIn, MirrorStrategy::InToOut];

    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            MirrorStrategy::OutToIn => "out-to-in",
            MirrorStrategy::InToOut => "in-to-out",
        }
    }
}

impl fmt::Display for MirrorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MirrorStrategy {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "out-to-in" => Ok(MirrorStrategy::OutToIn),
            "in-to-out" => Ok(MirrorStrategy::InToOut),
            _ => Err(SynthError::UnknownMirrorStrategy(s.to_string())),
        }
    }
}

/// Check that `scheme` can uncompute under `strategy`.
///
/// A compute-only scheme run forward would act on routing qubits that are
/// already set, so it is only accepted when inverted (Out-to-In).
pub fn validate_mirror(scheme: &DecompositionScheme, strategy: MirrorStrategy) -> SynthResult<()> {
    if strategy == MirrorStrategy::InToOut && scheme.exit_state == ExitState::ComputeOnly {
        return Err(SynthError::IncompatibleMirrorStrategy {
            scheme: scheme.name().to_string(),
            strategy: strategy.name().to_string(),
        });
    }
    Ok(())
}

/// Derive the mirror pass of `query`.
///
/// Levels are always visited from the leaves back to the root. Out-to-In
/// reverses every level operation by operation and marks gadgets inverted.
/// In-to-Out keeps the wire order of each level and emits every
/// `(gadget, cnot)` pair as `(cnot, gadget)` with the gadget run forward.
pub fn build_mirror(
    query: &LogicalPass,
    scheme: &DecompositionScheme,
    strategy: MirrorStrategy,
    ids: &mut GadgetIds,
) -> SynthResult<LogicalPass> {
    validate_mirror(scheme, strategy)?;

    let mut relabel = |g: &Gadget, inverted: bool| {
        LogicalOp::Gadget(Gadget {
            id: ids.next_id(),
            inverted,
            ..*g
        })
    };

    let groups = query
        .groups
        .iter()
        .rev()
        .map(|group| {
            let ops = match strategy {
                MirrorStrategy::OutToIn => group
                    .ops
                    .iter()
                    .rev()
                    .map(|op| match op {
                        LogicalOp::Gadget(g) => relabel(g, true),
                        LogicalOp::Native(n) => LogicalOp::Native(n.inverse()),
                    })
                    .collect(),
                MirrorStrategy::InToOut => {
                    let mut ops = Vec::with_capacity(group.ops.len());
                    for segment in segments(&group.ops) {
                        for op in segment.iter().rev() {
                            ops.push(match op {
                                LogicalOp::Gadget(g) => relabel(g, false),
                                LogicalOp::Native(n) => LogicalOp::Native(n.clone()),
                            });
                        }
                    }
                    ops
                }
            };
            SiblingGroup { ops }
        })
        .collect();

    let pass = LogicalPass {
        phase: Phase::Mirror,
        scheme: scheme.id,
        groups,
    };
    debug!(
        gadgets = pass.gadget_count(),
        scheme = %scheme.id,
        strategy = %strategy,
        "built mirror pass"
    );
    Ok(pass)
}

/// Split `ops` into runs that each start at a gadget.
fn segments(ops: &[LogicalOp]) -> Vec<&[LogicalOp]> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, op) in ops.iter().enumerate() {
        if i > start && matches!(op, LogicalOp::Gadget(_)) {
            out.push(&ops[start..i]);
            start = i;
        }
    }
    if start < ops.len() {
        out.push(&ops[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DecompositionId;
    use crate::tree::QramTree;
    use brigade_ir::{Circuit, Gate};

    fn query(n: usize) -> (QramTree, LogicalPass, GadgetIds) {
        let mut circuit = Circuit::new("m");
        let tree = QramTree::allocate(&mut circuit, n);
        let scheme = DecompositionScheme::builtin(DecompositionId::ZeroAncillaTDepth4);
        let mut ids = GadgetIds::new();
        let pass = tree.query_pass(&scheme, &mut ids).unwrap();
        (tree, pass, ids)
    }

    #[test]
    fn test_out_to_in_reverses_and_inverts() {
        let (_, q, mut ids) = query(2);
        let scheme = DecompositionScheme::builtin(DecompositionId::ZeroAncillaTDepth3);
        let m = build_mirror(&q, &scheme, MirrorStrategy::OutToIn, &mut ids).unwrap();

        assert_eq!(m.phase, Phase::Mirror);
        assert_eq!(m.scheme, DecompositionId::ZeroAncillaTDepth3);
        assert_eq!(m.gadget_count(), q.gadget_count());
        assert!(m.gadgets().all(|g| g.inverted));

        // Last level first, last operation first.
        assert!(matches!(&m.groups[0].ops[0], LogicalOp::Native(op) if op.gate == Gate::CX));
        let mirrored: Vec<_> = m.gadgets().map(|g| g.target).collect();
        let mut original: Vec<_> = q.gadgets().map(|g| g.target).collect();
        original.reverse();
        assert_eq!(mirrored, original);

        let first_mirror_id = m.gadgets().next().unwrap().id;
        assert_eq!(first_mirror_id.0 as usize, q.gadget_count());
    }

    #[test]
    fn test_in_to_out_keeps_wire_order() {
        let (tree, q, mut ids) = query(2);
        let scheme = DecompositionScheme::builtin(DecompositionId::RelativePhaseTDepth4Cx3);
        let m = build_mirror(&q, &scheme, MirrorStrategy::InToOut, &mut ids).unwrap();

        assert!(m.gadgets().all(|g| !g.inverted));
        let level1 = &m.groups[0].ops;
        assert_eq!(level1.len(), 4);
        assert!(matches!(&level1[0], LogicalOp::Native(_)));
        assert!(matches!(&level1[1], LogicalOp::Gadget(g) if g.target == tree.node(1, 0)));
        assert!(matches!(&level1[3], LogicalOp::Gadget(g) if g.target == tree.node(1, 1)));
    }

    #[test]
    fn test_compute_only_rejected_in_to_out() {
        let (_, q, mut ids) = query(1);
        let scheme = DecompositionScheme::builtin(DecompositionId::ComputeFourAncillaTDepth1);
        let err = build_mirror(&q, &scheme, MirrorStrategy::InToOut, &mut ids).unwrap_err();
        assert!(matches!(err, SynthError::IncompatibleMirrorStrategy { .. }));
        assert!(build_mirror(&q, &scheme, MirrorStrategy::OutToIn, &mut ids).is_ok());
    }

    #[test]
    fn test_strategy_names() {
        for s in MirrorStrategy::ALL {
            assert_eq!(s.name().parse::<MirrorStrategy>().unwrap(), s);
        }
        assert_eq!("IN_TO_OUT".parse::<MirrorStrategy>().unwrap(), MirrorStrategy::InToOut);
        assert!("sideways".parse::<MirrorStrategy>().is_err());
    }
}

//! Toffoli decomposition catalog.
//!
//! Every scheme is a static table of moments over symbolic operand slots
//! (`c0`, `c1`, `target` and pool ancillas). Binding the slots to concrete
//! qubits yields the gate-level moments that replace one logical Toffoli.
//!
//! # Schemes
//!
//! | Name | T | T-depth | CX | Ancillas | Exit state |
//! |------|---|---------|----|----------|------------|
//! | `no-decomp` | 0 | 0 | 0 | 0 | exact |
//! | `zero-ancilla-t-depth-3` | 7 | 3 | 7 | 0 | exact |
//! | `zero-ancilla-t-depth-4` | 7 | 4 | 6 | 0 | exact |
//! | `zero-ancilla-t-depth-4-inv` | 7 | 4 | 6 | 0 | exact |
//! | `one-ancilla-t-depth-2` | 7 | 2 | 10 | 1 | exact |
//! | `one-ancilla-t-depth-4` | 7 | 4 | 8 | 1 | exact |
//! | `four-ancilla-t-depth-1-a` | 7 | 1 | 16 | 4 | exact |
//! | `four-ancilla-t-depth-1-b` | 7 | 1 | 18 | 4 | exact |
//! | `t-depth-5-cx-6` | 7 | 5 | 6 | 0 | exact |
//! | `t-depth-5-cx-6-inv` | 7 | 5 | 6 | 0 | exact |
//! | `t-depth-4-cx-8` | 7 | 4 | 8 | 0 | exact |
//! | `t-depth-4-cx-8-inv` | 7 | 4 | 8 | 0 | exact |
//! | `relative-phase-t-depth-4-cx-3` | 4 | 4 | 3 | 0 | relative phase |
//! | `relative-phase-cx-4-t-depth-4` | 4 | 4 | 4 | 0 | relative phase |
//! | `relative-phase-t-depth-4-cx-4` | 4 | 4 | 4 | 0 | relative phase |
//! | `compute-zero-ancilla-t-depth-2` | 4 | 2 | 6 | 0 | compute only |
//! | `compute-four-ancilla-t-depth-1` | 4 | 1 | 16 | 4 | compute only |

use std::fmt;
use std::str::FromStr;

use brigade_ir::{Gate, Moment, Operation, QubitId, invert_moments};
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

// =============================================================================
// Identifiers and profiles
// =============================================================================

/// Closed set of registered Toffoli decompositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DecompositionId {
    /// Keep the Toffoli as a single `ccx`.
    #[serde(rename = "no-decomp")]
    NoDecomp,
    /// Seven T gates in three layers, no ancilla.
    #[serde(rename = "zero-ancilla-t-depth-3")]
    ZeroAncillaTDepth3,
    /// Seven T gates in four layers, no ancilla.
    #[serde(rename = "zero-ancilla-t-depth-4")]
    ZeroAncillaTDepth4,
    /// Moment-reversed variant of `zero-ancilla-t-depth-4`.
    #[serde(rename = "zero-ancilla-t-depth-4-inv")]
    ZeroAncillaTDepth4Inv,
    /// T-depth 2 using one ancilla.
    #[serde(rename = "one-ancilla-t-depth-2")]
    OneAncillaTDepth2,
    /// T-depth 4 using one ancilla.
    #[serde(rename = "one-ancilla-t-depth-4")]
    OneAncillaTDepth4,
    /// T-depth 1 using four ancillas, shallow parity encoder.
    #[serde(rename = "four-ancilla-t-depth-1-a")]
    FourAncillaTDepth1A,
    /// T-depth 1 using four ancillas, sequential parity encoder.
    #[serde(rename = "four-ancilla-t-depth-1-b")]
    FourAncillaTDepth1B,
    /// T-depth 5 with six CNOTs.
    #[serde(rename = "t-depth-5-cx-6")]
    TDepth5Cx6,
    /// Moment-reversed variant of `t-depth-5-cx-6`.
    #[serde(rename = "t-depth-5-cx-6-inv")]
    TDepth5Cx6Inv,
    /// T-depth 4 with eight CNOTs.
    #[serde(rename = "t-depth-4-cx-8")]
    TDepth4Cx8,
    /// Moment-reversed variant of `t-depth-4-cx-8`.
    #[serde(rename = "t-depth-4-cx-8-inv")]
    TDepth4Cx8Inv,
    /// Four T gates, three CNOTs, relative phase on the target.
    #[serde(rename = "relative-phase-t-depth-4-cx-3")]
    RelativePhaseTDepth4Cx3,
    /// Four T gates, four CNOTs, leading CNOT from `c1`.
    #[serde(rename = "relative-phase-cx-4-t-depth-4")]
    RelativePhaseCx4TDepth4,
    /// Four T gates, four CNOTs, leading T on the target.
    #[serde(rename = "relative-phase-t-depth-4-cx-4")]
    RelativePhaseTDepth4Cx4,
    /// Four T gates, valid only on a fresh target.
    #[serde(rename = "compute-zero-ancilla-t-depth-2")]
    ComputeZeroAncillaTDepth2,
    /// Four T gates in one layer with four ancillas, valid only on a fresh target.
    #[serde(rename = "compute-four-ancilla-t-depth-1")]
    ComputeFourAncillaTDepth1,
}

impl DecompositionId {
    /// Every registered id, in catalog order.
    pub const ALL: [DecompositionId; 17] = [
        DecompositionId::NoDecomp,
        DecompositionId::ZeroAncillaTDepth3,
        DecompositionId::ZeroAncillaTDepth4,
        DecompositionId::ZeroAncillaTDepth4Inv,
        DecompositionId::OneAncillaTDepth2,
        DecompositionId::OneAncillaTDepth4,
        DecompositionId::FourAncillaTDepth1A,
        DecompositionId::FourAncillaTDepth1B,
        DecompositionId::TDepth5Cx6,
        DecompositionId::TDepth5Cx6Inv,
        DecompositionId::TDepth4Cx8,
        DecompositionId::TDepth4Cx8Inv,
        DecompositionId::RelativePhaseTDepth4Cx3,
        DecompositionId::RelativePhaseCx4TDepth4,
        DecompositionId::RelativePhaseTDepth4Cx4,
        DecompositionId::ComputeZeroAncillaTDepth2,
        DecompositionId::ComputeFourAncillaTDepth1,
    ];

    /// Kebab-case name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            DecompositionId::NoDecomp => "no-decomp",
            DecompositionId::ZeroAncillaTDepth3 => "zero-ancilla-t-depth-3",
            DecompositionId::ZeroAncillaTDepth4 => "zero-ancilla-t-depth-4",
            DecompositionId::ZeroAncillaTDepth4Inv => "zero-ancilla-t-depth-4-inv",
            DecompositionId::OneAncillaTDepth2 => "one-ancilla-t-depth-2",
            DecompositionId::OneAncillaTDepth4 => "one-ancilla-t-depth-4",
            DecompositionId::FourAncillaTDepth1A => "four-ancilla-t-depth-1-a",
            DecompositionId::FourAncillaTDepth1B => "four-ancilla-t-depth-1-b",
            DecompositionId::TDepth5Cx6 => "t-depth-5-cx-6",
            DecompositionId::TDepth5Cx6Inv => "t-depth-5-cx-6-inv",
            DecompositionId::TDepth4Cx8 => "t-depth-4-cx-8",
            DecompositionId::TDepth4Cx8Inv => "t-depth-4-cx-8-inv",
            DecompositionId::RelativePhaseTDepth4Cx3 => "relative-phase-t-depth-4-cx-3",
            DecompositionId::RelativePhaseCx4TDepth4 => "relative-phase-cx-4-t-depth-4",
            DecompositionId::RelativePhaseTDepth4Cx4 => "relative-phase-t-depth-4-cx-4",
            DecompositionId::ComputeZeroAncillaTDepth2 => "compute-zero-ancilla-t-depth-2",
            DecompositionId::ComputeFourAncillaTDepth1 => "compute-four-ancilla-t-depth-1",
        }
    }
}

impl fmt::Display for DecompositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecompositionId {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        DecompositionId::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| SynthError::UnknownDecomposition(s.to_string()))
    }
}

/// What a gadget leaves behind besides flipping its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitState {
    /// Equal to CCX on every input, ancillas restored.
    Exact,
    /// Correct permutation up to an input-dependent diagonal phase.
    RelativePhase,
    /// Exact only when the target enters in |0⟩; its inverse is an exact uncompute.
    ComputeOnly,
}

impl ExitState {
    /// Short name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            ExitState::Exact => "exact",
            ExitState::RelativePhase => "relative-phase",
            ExitState::ComputeOnly => "compute-only",
        }
    }
}

impl fmt::Display for ExitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared cost of one gadget expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceProfile {
    /// T plus T-dagger gates.
    pub t_count: usize,
    /// Moments containing a T or T-dagger.
    pub t_depth: usize,
    /// CNOT gates.
    pub cx_count: usize,
    /// Hadamard gates.
    pub h_count: usize,
    /// Number of moments.
    pub depth: usize,
    /// Pool ancillas required.
    pub ancillas: usize,
}

impl ResourceProfile {
    const fn new(
        t_count: usize,
        t_depth: usize,
        cx_count: usize,
        h_count: usize,
        depth: usize,
        ancillas: usize,
    ) -> Self {
        Self {
            t_count,
            t_depth,
            cx_count,
            h_count,
            depth,
            ancillas,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Control0,
    Control1,
    Target,
    Ancilla(u8),
}

const C0: Slot = Slot::Control0;
const C1: Slot = Slot::Control1;
const TG: Slot = Slot::Target;
const A0: Slot = Slot::Ancilla(0);
const A1: Slot = Slot::Ancilla(1);
const A2: Slot = Slot::Ancilla(2);
const A3: Slot = Slot::Ancilla(3);

#[derive(Debug, Clone, Copy)]
struct Step {
    gate: Gate,
    slots: [Slot; 3],
}

const fn h(q: Slot) -> Step {
    Step { gate: Gate::H, slots: [q; 3] }
}

const fn s(q: Slot) -> Step {
    Step { gate: Gate::S, slots: [q; 3] }
}

const fn t(q: Slot) -> Step {
    Step { gate: Gate::T, slots: [q; 3] }
}

const fn tdg(q: Slot) -> Step {
    Step { gate: Gate::Tdg, slots: [q; 3] }
}

const fn cx(control: Slot, target: Slot) -> Step {
    Step {
        gate: Gate::CX,
        slots: [control, target, target],
    }
}

const fn ccx(c0: Slot, c1: Slot, target: Slot) -> Step {
    Step {
        gate: Gate::CCX,
        slots: [c0, c1, target],
    }
}

type Layer = &'static [Step];

#[derive(Debug, Clone, Copy)]
enum Template {
    /// Moments emitted as listed.
    Layers(&'static [Layer]),
    /// `encoder`, `core`, the encoder in reverse moment order, then `suffix`.
    ///
    /// The encoder must contain only self-inverse gates.
    Sandwich {
        encoder: &'static [Layer],
        core: Layer,
        suffix: &'static [Layer],
    },
}

const NO_DECOMP: &[Layer] = &[&[ccx(C0, C1, TG)]];

const ZERO_ANCILLA_T_DEPTH_3: &[Layer] = &[
    &[h(TG)],
    &[tdg(C0), t(C1), t(TG)],
    &[cx(C0, C1)],
    &[cx(TG, C0)],
    &[tdg(C0), cx(C1, TG)],
    &[cx(C1, C0)],
    &[tdg(C0), tdg(C1), t(TG)],
    &[cx(TG, C0)],
    &[s(C0), cx(C1, TG)],
    &[cx(C0, C1), h(TG)],
];

const ZERO_ANCILLA_T_DEPTH_4: &[Layer] = &[
    &[h(TG)],
    &[t(C0), t(C1), t(TG)],
    &[cx(TG, C0)],
    &[tdg(C0)],
    &[cx(C1, C0)],
    &[cx(C1, TG)],
    &[t(C0), tdg(TG)],
    &[cx(C1, TG)],
    &[cx(TG, C0)],
    &[tdg(C0)],
    &[cx(C1, C0)],
    &[h(TG)],
];

const ZERO_ANCILLA_T_DEPTH_4_INV: &[Layer] = &[
    &[h(TG)],
    &[cx(C1, C0)],
    &[tdg(C0)],
    &[cx(TG, C0)],
    &[cx(C1, TG)],
    &[t(C0), tdg(TG)],
    &[cx(C1, TG)],
    &[cx(C1, C0)],
    &[tdg(C0)],
    &[cx(TG, C0)],
    &[t(C0), t(C1), t(TG)],
    &[h(TG)],
];

const ONE_ANCILLA_T_DEPTH_2: &[Layer] = &[
    &[h(TG)],
    &[cx(C0, TG)],
    &[cx(TG, A0)],
    &[cx(C1, A0)],
    &[tdg(A0), t(TG), tdg(C1), tdg(C0)],
    &[cx(C1, A0)],
    &[cx(TG, A0)],
    &[cx(C0, TG)],
    &[cx(C1, C0)],
    &[cx(TG, C1)],
    &[tdg(TG), t(C1), t(C0)],
    &[cx(TG, C1)],
    &[cx(C1, C0), h(TG)],
];

const ONE_ANCILLA_T_DEPTH_4: &[Layer] = &[
    &[h(TG)],
    &[t(C0), t(C1), t(TG)],
    &[cx(TG, C0)],
    &[cx(TG, A0)],
    &[tdg(C0)],
    &[cx(C1, C0)],
    &[cx(C1, A0)],
    &[t(C0), tdg(A0)],
    &[cx(TG, C0)],
    &[cx(TG, A0)],
    &[tdg(C0)],
    &[cx(C1, C0)],
    &[cx(C1, A0)],
    &[h(TG)],
];

const FOUR_ANCILLA_A_ENCODER: &[Layer] = &[
    &[h(TG), cx(C1, A2), cx(C0, A0)],
    &[cx(C1, A1), cx(TG, A2), cx(A0, A3)],
    &[cx(C0, A1), cx(TG, A3), cx(A2, A0)],
];

const FOUR_ANCILLA_A_CORE: Layer = &[t(C0), t(C1), t(TG), t(A0), tdg(A1), tdg(A2), tdg(A3)];

const FOUR_ANCILLA_B_ENCODER: &[Layer] = &[
    &[h(TG)],
    &[cx(TG, A3)],
    &[cx(TG, A1)],
    &[cx(TG, A0)],
    &[cx(C1, A2)],
    &[cx(C1, A1)],
    &[cx(C1, A0)],
    &[cx(C0, A2)],
    &[cx(C0, A1)],
    &[cx(C0, TG)],
];

const FOUR_ANCILLA_B_CORE: Layer = &[tdg(C0), tdg(C1), t(TG), t(A0), tdg(A1), t(A2), tdg(A3)];

const T_DEPTH_5_CX_6: &[Layer] = &[
    &[h(TG)],
    &[cx(C1, TG)],
    &[tdg(TG)],
    &[cx(C0, TG)],
    &[t(TG)],
    &[cx(C1, TG)],
    &[tdg(TG)],
    &[cx(C0, TG)],
    &[t(C1), t(TG)],
    &[cx(C0, C1)],
    &[t(C0), tdg(C1), h(TG)],
    &[cx(C0, C1)],
];

const T_DEPTH_5_CX_6_INV: &[Layer] = &[
    &[cx(C0, C1)],
    &[t(C0), tdg(C1), h(TG)],
    &[cx(C0, C1)],
    &[t(C1), t(TG)],
    &[cx(C0, TG)],
    &[tdg(TG)],
    &[cx(C1, TG)],
    &[t(TG)],
    &[cx(C0, TG)],
    &[tdg(TG)],
    &[cx(C1, TG)],
    &[h(TG)],
];

const T_DEPTH_4_CX_8: &[Layer] = &[
    &[h(TG)],
    &[t(C0), t(C1), t(TG)],
    &[cx(C0, C1)],
    &[cx(C1, TG)],
    &[cx(C0, C1), t(TG)],
    &[cx(C1, TG)],
    &[cx(C0, C1)],
    &[tdg(C1), tdg(TG)],
    &[cx(C1, TG)],
    &[cx(C0, C1), tdg(TG)],
    &[cx(C1, TG)],
    &[h(TG)],
];

const T_DEPTH_4_CX_8_INV: &[Layer] = &[
    &[h(TG)],
    &[cx(C1, TG)],
    &[cx(C0, C1), tdg(TG)],
    &[cx(C1, TG)],
    &[tdg(C1), tdg(TG)],
    &[cx(C0, C1)],
    &[cx(C1, TG)],
    &[cx(C0, C1), t(TG)],
    &[cx(C1, TG)],
    &[cx(C0, C1)],
    &[t(C0), t(C1), t(TG)],
    &[h(TG)],
];

const RELATIVE_PHASE_T_DEPTH_4_CX_3: &[Layer] = &[
    &[h(TG)],
    &[t(TG)],
    &[cx(C1, TG)],
    &[tdg(TG)],
    &[cx(C0, TG)],
    &[t(TG)],
    &[cx(C1, TG)],
    &[tdg(TG)],
    &[h(TG)],
];

const RELATIVE_PHASE_CX_4_T_DEPTH_4: &[Layer] = &[
    &[h(TG)],
    &[cx(C1, TG)],
    &[tdg(TG)],
    &[cx(C0, TG)],
    &[t(TG)],
    &[cx(C1, TG)],
    &[tdg(TG)],
    &[cx(C0, TG)],
    &[t(TG)],
    &[h(TG)],
];

const RELATIVE_PHASE_T_DEPTH_4_CX_4: &[Layer] = &[
    &[h(TG)],
    &[tdg(TG)],
    &[cx(C0, TG)],
    &[t(TG)],
    &[cx(C1, TG)],
    &[tdg(TG)],
    &[cx(C0, TG)],
    &[t(TG)],
    &[cx(C1, TG)],
    &[h(TG)],
];

const COMPUTE_ZERO_ANCILLA_T_DEPTH_2: &[Layer] = &[
    &[h(TG)],
    &[t(TG)],
    &[cx(C0, TG)],
    &[cx(C1, TG)],
    &[cx(TG, C0)],
    &[cx(TG, C1)],
    &[tdg(C0), tdg(C1), t(TG)],
    &[cx(TG, C0)],
    &[cx(TG, C1)],
    &[h(TG)],
    &[s(TG)],
];

const COMPUTE_FOUR_ANCILLA_ENCODER: &[Layer] = &[
    &[h(TG)],
    &[cx(C0, A0)],
    &[cx(C0, A3)],
    &[cx(C1, A1)],
    &[cx(C1, A3)],
    &[cx(TG, A0)],
    &[cx(TG, A1)],
    &[cx(TG, A2)],
    &[cx(TG, A3)],
];

const COMPUTE_FOUR_ANCILLA_CORE: Layer = &[tdg(A0), tdg(A1), t(A2), t(A3)];

const COMPUTE_FOUR_ANCILLA_SUFFIX: &[Layer] = &[&[s(TG)]];

// =============================================================================
// Schemes
// =============================================================================

/// One registered decomposition: generator plus declared metadata.
#[derive(Debug, Clone)]
pub struct DecompositionScheme {
    /// Identifier.
    pub id: DecompositionId,
    /// Declared gate and depth costs.
    pub profile: ResourceProfile,
    /// Behavior on inputs outside the compute contract.
    pub exit_state: ExitState,
    /// Whether sibling gadgets of this scheme may be packed into shared moments.
    pub parallelizable: bool,
    template: Template,
}

impl DecompositionScheme {
    /// The built-in scheme for `id`.
    pub fn builtin(id: DecompositionId) -> Self {
        use DecompositionId as D;
        use ExitState::{ComputeOnly, Exact, RelativePhase};

        let (profile, exit_state, template) = match id {
            D::NoDecomp => (
                ResourceProfile::new(0, 0, 0, 0, 1, 0),
                Exact,
                Template::Layers(NO_DECOMP),
            ),
            D::ZeroAncillaTDepth3 => (
                ResourceProfile::new(7, 3, 7, 2, 10, 0),
                Exact,
                Template::Layers(ZERO_ANCILLA_T_DEPTH_3),
            ),
            D::ZeroAncillaTDepth4 => (
                ResourceProfile::new(7, 4, 6, 2, 12, 0),
                Exact,
                Template::Layers(ZERO_ANCILLA_T_DEPTH_4),
            ),
            D::ZeroAncillaTDepth4Inv => (
                ResourceProfile::new(7, 4, 6, 2, 12, 0),
                Exact,
                Template::Layers(ZERO_ANCILLA_T_DEPTH_4_INV),
            ),
            D::OneAncillaTDepth2 => (
                ResourceProfile::new(7, 2, 10, 2, 13, 1),
                Exact,
                Template::Layers(ONE_ANCILLA_T_DEPTH_2),
            ),
            D::OneAncillaTDepth4 => (
                ResourceProfile::new(7, 4, 8, 2, 14, 1),
                Exact,
                Template::Layers(ONE_ANCILLA_T_DEPTH_4),
            ),
            D::FourAncillaTDepth1A => (
                ResourceProfile::new(7, 1, 16, 2, 7, 4),
                Exact,
                Template::Sandwich {
                    encoder: FOUR_ANCILLA_A_ENCODER,
                    core: FOUR_ANCILLA_A_CORE,
                    suffix: &[],
                },
            ),
            D::FourAncillaTDepth1B => (
                ResourceProfile::new(7, 1, 18, 2, 21, 4),
                Exact,
                Template::Sandwich {
                    encoder: FOUR_ANCILLA_B_ENCODER,
                    core: FOUR_ANCILLA_B_CORE,
                    suffix: &[],
                },
            ),
            D::TDepth5Cx6 => (
                ResourceProfile::new(7, 5, 6, 2, 12, 0),
                Exact,
                Template::Layers(T_DEPTH_5_CX_6),
            ),
            D::TDepth5Cx6Inv => (
                ResourceProfile::new(7, 5, 6, 2, 12, 0),
                Exact,
                Template::Layers(T_DEPTH_5_CX_6_INV),
            ),
            D::TDepth4Cx8 => (
                ResourceProfile::new(7, 4, 8, 2, 12, 0),
                Exact,
                Template::Layers(T_DEPTH_4_CX_8),
            ),
            D::TDepth4Cx8Inv => (
                ResourceProfile::new(7, 4, 8, 2, 12, 0),
                Exact,
                Template::Layers(T_DEPTH_4_CX_8_INV),
            ),
            D::RelativePhaseTDepth4Cx3 => (
                ResourceProfile::new(4, 4, 3, 2, 9, 0),
                RelativePhase,
                Template::Layers(RELATIVE_PHASE_T_DEPTH_4_CX_3),
            ),
            D::RelativePhaseCx4TDepth4 => (
                ResourceProfile::new(4, 4, 4, 2, 10, 0),
                RelativePhase,
                Template::Layers(RELATIVE_PHASE_CX_4_T_DEPTH_4),
            ),
            D::RelativePhaseTDepth4Cx4 => (
                ResourceProfile::new(4, 4, 4, 2, 10, 0),
                RelativePhase,
                Template::Layers(RELATIVE_PHASE_T_DEPTH_4_CX_4),
            ),
            D::ComputeZeroAncillaTDepth2 => (
                ResourceProfile::new(4, 2, 6, 2, 11, 0),
                ComputeOnly,
                Template::Layers(COMPUTE_ZERO_ANCILLA_T_DEPTH_2),
            ),
            D::ComputeFourAncillaTDepth1 => (
                ResourceProfile::new(4, 1, 16, 2, 20, 4),
                ComputeOnly,
                Template::Sandwich {
                    encoder: COMPUTE_FOUR_ANCILLA_ENCODER,
                    core: COMPUTE_FOUR_ANCILLA_CORE,
                    suffix: COMPUTE_FOUR_ANCILLA_SUFFIX,
                },
            ),
        };

        Self {
            id,
            profile,
            exit_state,
            parallelizable: id != D::FourAncillaTDepth1B,
            template,
        }
    }

    /// Name of the scheme.
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Number of pool ancillas a gadget of this scheme needs.
    pub fn ancillas(&self) -> usize {
        self.profile.ancillas
    }

    /// Moments implementing `CCX(c0, c1, target)` with the given ancillas.
    pub fn generate(
        &self,
        c0: QubitId,
        c1: QubitId,
        target: QubitId,
        ancillas: &[QubitId],
    ) -> SynthResult<Vec<Moment>> {
        if ancillas.len() != self.profile.ancillas {
            return Err(SynthError::AncillaCountMismatch {
                scheme: self.name().to_string(),
                expected: self.profile.ancillas,
                got: ancillas.len(),
            });
        }
        let resolve = |slot: Slot| match slot {
            Slot::Control0 => c0,
            Slot::Control1 => c1,
            Slot::Target => target,
            Slot::Ancilla(i) => ancillas[usize::from(i)],
        };

        let layers: Vec<Layer> = match self.template {
            Template::Layers(layers) => layers.to_vec(),
            Template::Sandwich {
                encoder,
                core,
                suffix,
            } => encoder
                .iter()
                .copied()
                .chain(std::iter::once(core))
                .chain(encoder.iter().rev().copied())
                .chain(suffix.iter().copied())
                .collect(),
        };

        let mut moments = Vec::with_capacity(layers.len());
        for layer in layers {
            let mut moment = Moment::new();
            for step in layer {
                let arity = step.gate.num_qubits();
                let qubits = step.slots[..arity].iter().map(|s| resolve(*s)).collect();
                moment.push(Operation::new(step.gate, qubits)?)?;
            }
            moments.push(moment);
        }
        Ok(moments)
    }

    /// The gate-level adjoint of [`generate`](Self::generate).
    pub fn generate_inverse(
        &self,
        c0: QubitId,
        c1: QubitId,
        target: QubitId,
        ancillas: &[QubitId],
    ) -> SynthResult<Vec<Moment>> {
        Ok(invert_moments(&self.generate(c0, c1, target, ancillas)?))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Registry of decomposition schemes, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    schemes: Vec<DecompositionScheme>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in scheme.
    pub fn standard() -> Self {
        Self {
            schemes: DecompositionId::ALL
                .into_iter()
                .map(DecompositionScheme::builtin)
                .collect(),
        }
    }

    /// Register a scheme, replacing any scheme with the same id.
    pub fn register(&mut self, scheme: DecompositionScheme) {
        self.schemes.retain(|s| s.id != scheme.id);
        self.schemes.push(scheme);
    }

    /// Look up a scheme.
    pub fn lookup(&self, id: DecompositionId) -> SynthResult<&DecompositionScheme> {
        self.schemes
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SynthError::UnknownDecomposition(id.name().to_string()))
    }

    /// Registered schemes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DecompositionScheme> {
        self.schemes.iter()
    }

    /// Number of registered schemes.
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

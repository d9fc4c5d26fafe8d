//! Integration tests for QRAM construction and resource accounting.

use brigade_ir::{Gate, Phase, Provenance, QubitRole};
use brigade_synth::{
    BuildOptions, Catalog, DecompositionId, MirrorStrategy, QramBuilder, SynthError,
};
use proptest::prelude::*;

fn build(options: &BuildOptions) -> brigade_synth::BuiltQram {
    QramBuilder::default().build(options).unwrap()
}

// =============================================================================
// Resource accounting
// =============================================================================

#[test]
fn t_count_is_sum_over_gadgets() {
    let catalog = Catalog::standard();
    let options = BuildOptions {
        address_qubits: 3,
        query: DecompositionId::ZeroAncillaTDepth3,
        mirror: DecompositionId::TDepth4Cx8,
        data: DecompositionId::RelativePhaseTDepth4Cx3,
        ..BuildOptions::default()
    };
    let built = build(&options);
    let t = |id| catalog.lookup(id).unwrap().profile.t_count;
    assert_eq!(
        built.resources.t_count,
        7 * t(options.query) + 8 * t(options.data) + 7 * t(options.mirror)
    );
    assert_eq!(built.gadgets.total(), 22);
    assert_eq!(built.resources.gadgets, 22);
}

#[test]
fn scenario_relative_phase_pair_packs_tighter() {
    let serial = BuildOptions {
        address_qubits: 2,
        query: DecompositionId::RelativePhaseTDepth4Cx3,
        mirror: DecompositionId::RelativePhaseTDepth4Cx4,
        strategy: MirrorStrategy::OutToIn,
        parallel: false,
        ..BuildOptions::default()
    };
    let parallel = BuildOptions {
        parallel: true,
        ..serial.clone()
    };
    let s = build(&serial);
    let p = build(&parallel);

    assert_eq!(p.gadgets.query, 3);
    assert_eq!(p.gadgets.mirror, 3);
    assert_eq!(p.resources.t_count, s.resources.t_count);
    assert_eq!(p.resources.t_count, 3 * 4 + 4 * 7 + 3 * 4);
    assert!(p.resources.t_depth < s.resources.t_depth);
}

#[test]
fn optimized_builds_never_cost_more() {
    for id in DecompositionId::ALL {
        if id == DecompositionId::ComputeZeroAncillaTDepth2
            || id == DecompositionId::ComputeFourAncillaTDepth1
        {
            continue;
        }
        for parallel in [false, true] {
            let plain = BuildOptions {
                address_qubits: 2,
                query: id,
                mirror: id,
                data: id,
                parallel,
                ..BuildOptions::default()
            };
            let optimized = BuildOptions {
                optimize: true,
                ..plain.clone()
            };
            let a = build(&plain).resources;
            let b = build(&optimized).resources;
            assert!(b.t_count <= a.t_count, "{id}");
            assert!(b.t_depth <= a.t_depth, "{id}");
            assert!(b.cx_count <= a.cx_count, "{id}");
            assert!(b.h_count <= a.h_count, "{id}");
            assert!(b.depth <= a.depth, "{id}");
            assert!(b.total_gates() <= a.total_gates(), "{id}");
            assert_eq!(b.qubits, a.qubits, "{id}");
        }
    }
}

#[test]
fn no_decomp_leaves_toffolis() {
    let options = BuildOptions {
        query: DecompositionId::NoDecomp,
        mirror: DecompositionId::NoDecomp,
        data: DecompositionId::NoDecomp,
        ..BuildOptions::default()
    };
    let built = build(&options);
    assert_eq!(built.resources.ccx_count, 10);
    assert_eq!(built.resources.t_count, 0);
}

#[test]
fn every_operation_is_traceable() {
    let built = build(&BuildOptions {
        parallel: true,
        ..BuildOptions::default()
    });
    let mut natives = 0;
    for (_, op) in built.circuit.operations() {
        match op.provenance {
            Provenance::Native => {
                assert_eq!(op.gate, Gate::CX);
                natives += 1;
            }
            Provenance::Gadget { phase, scheme, .. } => {
                assert_eq!(scheme, "zero-ancilla-t-depth-4");
                assert!(matches!(phase, Phase::Query | Phase::Data | Phase::Mirror));
            }
        }
    }
    // One routing CNOT per query and per mirror gadget.
    assert_eq!(natives, 6);
}

#[test]
fn ancillas_follow_registers() {
    let built = build(&BuildOptions {
        address_qubits: 2,
        query: DecompositionId::OneAncillaTDepth4,
        mirror: DecompositionId::OneAncillaTDepth4,
        data: DecompositionId::FourAncillaTDepth1B,
        ..BuildOptions::default()
    });
    let roles: Vec<QubitRole> = built.circuit.qubits().iter().map(|q| q.role).collect();
    let first_ancilla = roles.iter().position(|r| *r == QubitRole::Ancilla).unwrap();
    assert_eq!(first_ancilla, 11);
    assert!(roles[first_ancilla..].iter().all(|r| *r == QubitRole::Ancilla));
    assert_eq!(built.resources.ancillas, 4);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn compute_only_data_scheme_rejected() {
    let err = QramBuilder::default()
        .build(&BuildOptions {
            data: DecompositionId::ComputeFourAncillaTDepth1,
            ..BuildOptions::default()
        })
        .unwrap_err();
    assert!(matches!(err, SynthError::IncompatibleDataDecomposition(_)));
}

#[test]
fn compute_only_mirror_allowed_out_to_in() {
    let built = build(&BuildOptions {
        query: DecompositionId::ComputeZeroAncillaTDepth2,
        mirror: DecompositionId::ComputeZeroAncillaTDepth2,
        strategy: MirrorStrategy::OutToIn,
        ..BuildOptions::default()
    });
    assert_eq!(built.resources.t_count, 3 * 4 + 4 * 7 + 3 * 4);
}

// =============================================================================
// Properties
// =============================================================================

fn arb_scheme() -> impl Strategy<Value = DecompositionId> {
    prop::sample::select(DecompositionId::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn parallel_t_depth_never_exceeds_serial(
        n in 1_usize..=3,
        query in arb_scheme(),
        mirror in arb_scheme(),
        budget in prop::option::of(4_usize..=12),
    ) {
        let serial = BuildOptions {
            address_qubits: n,
            query,
            mirror,
            strategy: MirrorStrategy::OutToIn,
            parallel: false,
            ancilla_budget: budget,
            ..BuildOptions::default()
        };
        let parallel = BuildOptions { parallel: true, ..serial.clone() };
        let builder = QramBuilder::default();
        let s = builder.build(&serial).unwrap();
        let p = builder.build(&parallel).unwrap();
        prop_assert!(p.resources.t_depth <= s.resources.t_depth);
        prop_assert!(p.resources.depth <= s.resources.depth);
        prop_assert_eq!(p.resources.t_count, s.resources.t_count);
        prop_assert!(p.qubit_formula_holds());
        prop_assert!(p.circuit.validate().is_ok());
    }
}

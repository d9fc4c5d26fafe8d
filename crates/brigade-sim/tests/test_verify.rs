//! Verification of built QRAM circuits.

use brigade_ir::{Circuit, QubitRole};
use brigade_sim::{
    Regime, SimError, StateOutcome, VerificationReport, Verifier, VerifierConfig,
};
use brigade_synth::{
    BuildOptions, Catalog, DecompositionId, ExitState, MirrorStrategy, QramBuilder,
};

fn verify(options: &BuildOptions) -> VerificationReport {
    let built = QramBuilder::default().build(options).unwrap();
    Verifier::default().verify(&built.circuit).unwrap()
}

fn pair(
    n: usize,
    query: DecompositionId,
    mirror: DecompositionId,
    strategy: MirrorStrategy,
) -> BuildOptions {
    BuildOptions {
        address_qubits: n,
        query,
        mirror,
        strategy,
        ..BuildOptions::default()
    }
}

// =============================================================================
// Valid pairs
// =============================================================================

#[test]
fn relative_phase_scenario_passes_for_every_address() {
    let options = BuildOptions {
        parallel: true,
        ..pair(
            2,
            DecompositionId::RelativePhaseTDepth4Cx3,
            DecompositionId::RelativePhaseTDepth4Cx4,
            MirrorStrategy::OutToIn,
        )
    };
    let report = verify(&options);
    assert_eq!(report.regime, Regime::Exhaustive);
    assert_eq!(report.states_checked, 256);
    assert_eq!(report.exact, 256);
    assert!(report.superposition.iter().all(|c| c.passed));
    assert!(report.passed());
}

#[test]
fn every_valid_pair_passes_for_small_trees() {
    let catalog = Catalog::standard();
    let usable: Vec<_> = catalog
        .iter()
        .filter(|s| s.exit_state != ExitState::RelativePhase)
        .collect();

    let mut checked = 0;
    for n in 1..=2 {
        for strategy in MirrorStrategy::ALL {
            for parallel in [false, true] {
                for query in &usable {
                    for mirror in &usable {
                        let compute_only = query.exit_state == ExitState::ComputeOnly
                            || mirror.exit_state == ExitState::ComputeOnly;
                        if compute_only && strategy == MirrorStrategy::InToOut {
                            continue;
                        }
                        let options = BuildOptions {
                            parallel,
                            ..pair(n, query.id, mirror.id, strategy)
                        };
                        let report = verify(&options);
                        assert!(report.passed(), "{options:?}: {report:?}");
                        checked += 1;
                    }
                }
            }
        }
    }
    // 12 exact and 2 compute-only schemes
    assert_eq!(checked, 2 * 2 * (12 * 12 * 2 + (14 * 14 - 12 * 12)));
}

#[test]
fn unpackable_scheme_serializes_and_passes() {
    for strategy in MirrorStrategy::ALL {
        let options = BuildOptions {
            parallel: true,
            ..pair(
                2,
                DecompositionId::FourAncillaTDepth1B,
                DecompositionId::FourAncillaTDepth1B,
                strategy,
            )
        };
        let built = QramBuilder::default().build(&options).unwrap();
        // one shared set of four
        assert_eq!(built.resources.ancillas, 4);
        let report = Verifier::default().verify(&built.circuit).unwrap();
        assert!(report.passed(), "{strategy}: {report:?}");
    }
}

#[test]
fn optimized_circuits_keep_their_verdict() {
    use brigade_synth::DecompositionId as D;
    use brigade_synth::MirrorStrategy::{InToOut, OutToIn};

    let cases = [
        (D::ZeroAncillaTDepth4, D::ZeroAncillaTDepth4, OutToIn),
        (D::OneAncillaTDepth2, D::TDepth5Cx6Inv, InToOut),
        (D::FourAncillaTDepth1B, D::FourAncillaTDepth1A, OutToIn),
        (D::RelativePhaseTDepth4Cx3, D::RelativePhaseTDepth4Cx4, OutToIn),
        (D::ComputeZeroAncillaTDepth2, D::ComputeFourAncillaTDepth1, OutToIn),
        (D::RelativePhaseTDepth4Cx3, D::RelativePhaseCx4TDepth4, OutToIn),
    ];
    for (query, mirror, strategy) in cases {
        for parallel in [false, true] {
            let plain = BuildOptions {
                parallel,
                ..pair(2, query, mirror, strategy)
            };
            let optimized = BuildOptions {
                optimize: true,
                ..plain.clone()
            };
            let a = verify(&plain);
            let b = verify(&optimized);
            assert_eq!(a.passed(), b.passed(), "{optimized:?}");
            assert_eq!(a.exact, b.exact, "{optimized:?}");
            assert_eq!(a.phase_only, b.phase_only, "{optimized:?}");
            assert_eq!(a.mismatches, b.mismatches, "{optimized:?}");
        }
    }
}

#[test]
fn default_configuration_passes_three_levels() {
    let report = verify(&pair(
        3,
        DecompositionId::ZeroAncillaTDepth4,
        DecompositionId::ZeroAncillaTDepth4,
        MirrorStrategy::OutToIn,
    ));
    assert_eq!(report.states_checked, 8 * 2 * 256 * 2);
    assert!(report.passed());
}

#[test]
fn empty_tree_is_trivially_correct() {
    let report = verify(&BuildOptions {
        address_qubits: 0,
        ..BuildOptions::default()
    });
    assert_eq!(report.regime, Regime::Trivial);
    assert!(report.passed());
}

#[test]
fn compute_only_pair_passes_out_to_in() {
    let report = verify(&pair(
        2,
        DecompositionId::ComputeZeroAncillaTDepth2,
        DecompositionId::ComputeZeroAncillaTDepth2,
        MirrorStrategy::OutToIn,
    ));
    assert!(report.passed(), "{report:?}");
}

#[test]
fn in_to_out_with_matching_relative_phase_passes() {
    let report = verify(&pair(
        2,
        DecompositionId::RelativePhaseTDepth4Cx3,
        DecompositionId::RelativePhaseTDepth4Cx3,
        MirrorStrategy::InToOut,
    ));
    assert!(report.passed(), "{report:?}");
}

#[test]
fn sampled_regime_for_wide_addresses() {
    let report = verify(&pair(
        4,
        DecompositionId::ZeroAncillaTDepth4,
        DecompositionId::ZeroAncillaTDepth4,
        MirrorStrategy::OutToIn,
    ));
    assert_eq!(report.regime, Regime::Sampled);
    assert_eq!(report.states_checked, 16 * 2 * 6 * 2);
    assert!(report.passed());
}

// =============================================================================
// Falsified pairs
// =============================================================================

#[test]
fn mismatched_relative_phases_are_phase_only_failures() {
    let report = verify(&pair(
        2,
        DecompositionId::RelativePhaseTDepth4Cx3,
        DecompositionId::RelativePhaseCx4TDepth4,
        MirrorStrategy::OutToIn,
    ));
    assert!(!report.passed());
    assert_eq!(report.mismatches, 0);
    assert_eq!(report.phase_only, 64);
    let ce = report.counter_example.unwrap();
    assert_eq!(ce.outcome, StateOutcome::PhaseOnly);
    assert!(ce.relative_phase.is_some());
}

#[test]
fn in_to_out_with_uncancelled_phase_fails() {
    let report = verify(&pair(
        2,
        DecompositionId::RelativePhaseTDepth4Cx4,
        DecompositionId::RelativePhaseTDepth4Cx4,
        MirrorStrategy::InToOut,
    ));
    assert!(!report.passed());
    assert_eq!(report.mismatches, 0);
    assert!(report.phase_only > 0);
}

#[test]
fn relative_phase_read_out_is_falsified() {
    let report = verify(&BuildOptions {
        data: DecompositionId::RelativePhaseTDepth4Cx3,
        ..BuildOptions::default()
    });
    assert!(!report.passed());
    assert_eq!(report.mismatches, 0);
    assert!(report.phase_only > 0);
    assert!(report.phase_only_percent() > 0.0);
    assert!(
        (report.exact_percent() + report.phase_only_percent() - 100.0).abs() < 1e-9
    );
}

#[test]
fn counter_example_is_deterministic() {
    let options = pair(
        2,
        DecompositionId::RelativePhaseTDepth4Cx3,
        DecompositionId::RelativePhaseCx4TDepth4,
        MirrorStrategy::OutToIn,
    );
    let built = QramBuilder::default().build(&options).unwrap();
    let small_chunks = Verifier::new(VerifierConfig {
        chunk_size: 7,
        ..VerifierConfig::default()
    });
    let a = Verifier::default().verify(&built.circuit).unwrap();
    let b = small_chunks.verify(&built.circuit).unwrap();
    assert_eq!(a.counter_example, b.counter_example);
    assert_eq!(a.phase_only, b.phase_only);
}

// =============================================================================
// Layout errors
// =============================================================================

#[test]
fn missing_registers_are_rejected() {
    let mut c = Circuit::new("broken");
    c.add_register(QubitRole::Address, "a", 2);
    c.add_qubit(QubitRole::Bus, "bus");
    let err = Verifier::default().verify(&c).unwrap_err();
    assert!(matches!(err, SimError::LayoutMismatch(_)));
}

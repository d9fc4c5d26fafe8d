//! Functional verification against the ideal QRAM relation.
//!
//! Every classical input `|x, b, r=0, M, t, anc=0⟩` must map to
//! `|x, b, r=0, M, t ⊕ (b ∧ M_x), anc=0⟩` with one common global phase.
//! Inputs are enumerated in a fixed order (address, bus, memory word,
//! target), evaluated in parallel chunks with rayon and reduced sequentially,
//! so counts and the reported counter-example never depend on thread timing.

use std::f64::consts::TAU;

use brigade_ir::Circuit;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimResult;
use crate::layout::{BasisInput, QramLayout};
use crate::state::{SparseState, bitstring};

/// Verifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Largest address width checked over every memory word.
    pub exhaustive_limit: usize,
    /// Inputs per parallel chunk.
    pub chunk_size: usize,
    /// Stop after the chunk holding the first failure.
    pub short_circuit: bool,
    /// Seed for random memory words and phases.
    pub seed: u64,
    /// Run the superposition checks.
    pub superposition: bool,
    /// Amplitude and fidelity tolerance.
    pub tolerance: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            exhaustive_limit: 3,
            chunk_size: 1024,
            short_circuit: false,
            seed: 42,
            superposition: true,
            tolerance: 1e-9,
        }
    }
}

/// How the basis inputs were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regime {
    /// No address qubits, nothing to check.
    Trivial,
    /// Every memory word.
    Exhaustive,
    /// Fixed memory patterns per address.
    Sampled,
}

/// Classification of one basis input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateOutcome {
    /// Ideal image with the reference global phase.
    Exact,
    /// Ideal image with a different phase; detectable only by interference.
    PhaseOnly,
    /// Wrong basis state or leaked amplitude.
    Mismatch,
}

/// One amplitude of an observed output state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedAmplitude {
    /// Basis state, qubit 0 first.
    pub state: String,
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl ObservedAmplitude {
    pub(crate) fn new(basis: u128, amp: Complex64, num_qubits: usize) -> Self {
        Self {
            state: bitstring(basis, num_qubits),
            re: amp.re,
            im: amp.im,
        }
    }
}

/// The first failing input in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterExample {
    /// The classical input.
    pub input: BasisInput,
    /// How it failed.
    pub outcome: StateOutcome,
    /// Ideal output basis state.
    pub expected: String,
    /// Largest amplitudes of the actual output.
    pub observed: Vec<ObservedAmplitude>,
    /// Phase relative to the reference, in radians, for phase-only failures.
    pub relative_phase: Option<f64>,
}

/// Kind of superposition input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuperpositionKind {
    /// Equal weights over every address.
    Uniform,
    /// Equal magnitudes with seeded random phases.
    RandomPhase,
}

/// Result of one superposition check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperpositionCheck {
    /// Input kind.
    pub kind: SuperpositionKind,
    /// Memory word used.
    pub memory: u64,
    /// Fidelity with the ideal image.
    pub fidelity: f64,
    /// Whether the fidelity is within tolerance of 1.
    pub passed: bool,
}

/// Outcome of verifying one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Input selection.
    pub regime: Regime,
    /// Address width.
    pub address_bits: usize,
    /// Basis inputs evaluated.
    pub states_checked: usize,
    /// Inputs classified exact.
    pub exact: usize,
    /// Inputs classified phase-only.
    pub phase_only: usize,
    /// Inputs classified mismatch.
    pub mismatches: usize,
    /// Global phase of the first checked input, in radians.
    pub reference_phase: Option<f64>,
    /// Superposition checks, in order.
    pub superposition: Vec<SuperpositionCheck>,
    /// First failing input.
    pub counter_example: Option<CounterExample>,
    /// Evaluation stopped early after a failure.
    pub truncated: bool,
}

impl VerificationReport {
    fn new(regime: Regime, address_bits: usize) -> Self {
        Self {
            regime,
            address_bits,
            states_checked: 0,
            exact: 0,
            phase_only: 0,
            mismatches: 0,
            reference_phase: None,
            superposition: Vec::new(),
            counter_example: None,
            truncated: false,
        }
    }

    /// No mismatch, no phase-only input and every superposition check passed.
    pub fn passed(&self) -> bool {
        self.mismatches == 0 && self.phase_only == 0 && self.superposition.iter().all(|c| c.passed)
    }

    /// Share of exact inputs, in percent.
    pub fn exact_percent(&self) -> f64 {
        percent(self.exact, self.states_checked)
    }

    /// Share of phase-only inputs, in percent.
    pub fn phase_only_percent(&self) -> f64 {
        percent(self.phase_only, self.states_checked)
    }

    /// Share of mismatching inputs, in percent.
    pub fn mismatch_percent(&self) -> f64 {
        percent(self.mismatches, self.states_checked)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

enum Raw {
    /// Output is the ideal basis state with this amplitude.
    Basis(Complex64),
    /// Output differs; largest amplitudes.
    Off(Vec<(u128, Complex64)>),
}

/// Checks circuits against the ideal QRAM relation.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    /// Create a verifier.
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify `circuit`, whose qubit roles must form a bucket-brigade layout.
    pub fn verify(&self, circuit: &Circuit) -> SimResult<VerificationReport> {
        let layout = QramLayout::from_circuit(circuit)?;
        if layout.is_empty() {
            return Ok(VerificationReport::new(Regime::Trivial, 0));
        }

        let (regime, inputs) = self.basis_inputs(&layout);
        let mut report = VerificationReport::new(regime, layout.address_bits());
        let tol = self.config.tolerance;
        let mut reference: Option<Complex64> = None;
        let mut failed = false;

        for chunk in inputs.chunks(self.config.chunk_size.max(1)) {
            let raws: Vec<Raw> = chunk
                .par_iter()
                .map(|input| evaluate(circuit, &layout, input, tol))
                .collect::<SimResult<_>>()?;

            let mut chunk_failures = 0;
            for (input, raw) in chunk.iter().zip(raws) {
                report.states_checked += 1;
                let expected = layout.encode(&layout.ideal(input));
                let (outcome, observed, relative_phase) = match raw {
                    Raw::Basis(amp) => {
                        let r = *reference.get_or_insert(amp);
                        let observed = vec![(expected, amp)];
                        if (amp - r).norm() < tol {
                            (StateOutcome::Exact, observed, None)
                        } else {
                            (StateOutcome::PhaseOnly, observed, Some((amp / r).arg()))
                        }
                    }
                    Raw::Off(observed) => (StateOutcome::Mismatch, observed, None),
                };
                match outcome {
                    StateOutcome::Exact => report.exact += 1,
                    StateOutcome::PhaseOnly => report.phase_only += 1,
                    StateOutcome::Mismatch => report.mismatches += 1,
                }
                if outcome != StateOutcome::Exact {
                    chunk_failures += 1;
                    if report.counter_example.is_none() {
                        report.counter_example = Some(CounterExample {
                            input: *input,
                            outcome,
                            expected: bitstring(expected, layout.num_qubits),
                            observed: observed
                                .into_iter()
                                .map(|(b, a)| ObservedAmplitude::new(b, a, layout.num_qubits))
                                .collect(),
                            relative_phase,
                        });
                    }
                }
            }
            debug!(
                states = chunk.len(),
                failures = chunk_failures,
                checked = report.states_checked,
                "verified chunk"
            );

            failed |= chunk_failures > 0;
            if failed && self.config.short_circuit {
                report.truncated = report.states_checked < inputs.len();
                break;
            }
        }
        report.reference_phase = reference.map(|r| r.arg());

        if self.config.superposition && !(failed && self.config.short_circuit) {
            report.superposition = self.superposition_checks(circuit, &layout)?;
        }
        Ok(report)
    }

    /// Basis inputs in enumeration order.
    pub fn basis_inputs(&self, layout: &QramLayout) -> (Regime, Vec<BasisInput>) {
        let cells = layout.cells();
        let mask = word_mask(cells);
        let mut inputs = Vec::new();

        if layout.address_bits() <= self.config.exhaustive_limit {
            for address in 0..cells {
                for bus in [false, true] {
                    for memory in 0..=mask {
                        for target in [false, true] {
                            inputs.push(BasisInput {
                                address,
                                bus,
                                memory,
                                target,
                            });
                        }
                    }
                }
            }
            return (Regime::Exhaustive, inputs);
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        for address in 0..cells {
            let random: u64 = rng.r#gen::<u64>() & mask;
            let patterns = [
                0,
                mask,
                1 << address,
                mask ^ (1 << address),
                ALTERNATING & mask,
                random,
            ];
            for bus in [false, true] {
                for memory in patterns {
                    for target in [false, true] {
                        inputs.push(BasisInput {
                            address,
                            bus,
                            memory,
                            target,
                        });
                    }
                }
            }
        }
        (Regime::Sampled, inputs)
    }

    fn superposition_checks(
        &self,
        circuit: &Circuit,
        layout: &QramLayout,
    ) -> SimResult<Vec<SuperpositionCheck>> {
        let cells = layout.cells();
        let mask = word_mask(cells);
        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(1));
        let words = [ALTERNATING & mask, mask, rng.r#gen::<u64>() & mask];
        let norm = 1.0 / (cells as f64).sqrt();

        let mut checks = Vec::new();
        for kind in [SuperpositionKind::Uniform, SuperpositionKind::RandomPhase] {
            for memory in words {
                let weights: Vec<Complex64> = (0..cells)
                    .map(|_| match kind {
                        SuperpositionKind::Uniform => Complex64::new(norm, 0.0),
                        SuperpositionKind::RandomPhase => {
                            Complex64::from_polar(norm, rng.r#gen::<f64>() * TAU)
                        }
                    })
                    .collect();
                let inputs: Vec<BasisInput> = (0..cells)
                    .map(|address| BasisInput {
                        address,
                        bus: true,
                        memory,
                        target: false,
                    })
                    .collect();

                let mut state = SparseState::from_amplitudes(
                    layout.num_qubits,
                    inputs.iter().zip(&weights).map(|(i, w)| (layout.encode(i), *w)),
                )?;
                let ideal = SparseState::from_amplitudes(
                    layout.num_qubits,
                    inputs
                        .iter()
                        .zip(&weights)
                        .map(|(i, w)| (layout.encode(&layout.ideal(i)), *w)),
                )?;
                state.run(circuit);
                let fidelity = ideal.fidelity(&state);
                checks.push(SuperpositionCheck {
                    kind,
                    memory,
                    fidelity,
                    passed: fidelity >= 1.0 - self.config.tolerance,
                });
            }
        }
        Ok(checks)
    }
}

const ALTERNATING: u64 = 0xAAAA_AAAA_AAAA_AAAA;

fn word_mask(cells: u64) -> u64 {
    if cells >= 64 {
        u64::MAX
    } else {
        (1u64 << cells) - 1
    }
}

fn evaluate(
    circuit: &Circuit,
    layout: &QramLayout,
    input: &BasisInput,
    tol: f64,
) -> SimResult<Raw> {
    let expected = layout.encode(&layout.ideal(input));
    let mut state = SparseState::basis(layout.num_qubits, layout.encode(input))?;
    state.run(circuit);
    let amp = state.amplitude(expected);
    if (amp.norm() - 1.0).abs() < tol {
        Ok(Raw::Basis(amp))
    } else {
        Ok(Raw::Off(state.dominant(4)))
    }
}

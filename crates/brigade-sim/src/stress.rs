//! T-gate cancellation stress testing.
//!
//! Removing T and T-dagger gates from an otherwise correct circuit should
//! only ever make verification fail more often as more gates are removed.
//! Selections for one seed are nested: the sites removed for `k` are a prefix
//! of those removed for `k + 1`.

use brigade_ir::{Circuit, OpSite};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::verifier::{StateOutcome, Verifier};

/// Removes seeded random subsets of T gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct StressInjector;

impl StressInjector {
    /// The `cancel_count` T sites removed for `seed`, in selection order.
    pub fn select(circuit: &Circuit, cancel_count: usize, seed: u64) -> SimResult<Vec<OpSite>> {
        let mut sites = circuit.t_sites();
        if cancel_count > sites.len() {
            return Err(SimError::InsufficientTGates {
                requested: cancel_count,
                available: sites.len(),
            });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        sites.shuffle(&mut rng);
        sites.truncate(cancel_count);
        Ok(sites)
    }

    /// Copy of `circuit` with `cancel_count` seeded T sites removed.
    pub fn inject(circuit: &Circuit, cancel_count: usize, seed: u64) -> SimResult<Circuit> {
        let sites = Self::select(circuit, cancel_count, seed)?;
        Ok(circuit.without_operations(&sites))
    }
}

/// Failure statistics for one cancel count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressPoint {
    /// T gates removed.
    pub cancel_count: usize,
    /// Seeds tried.
    pub trials: usize,
    /// Trials whose circuit failed verification.
    pub failures: usize,
    /// Failures detectable only through phase.
    pub phase_only_failures: usize,
    /// `failures / trials`.
    pub failure_rate: f64,
}

/// A failure rate that dropped as more gates were removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonotonicityViolation {
    /// Smaller cancel count.
    pub from_count: usize,
    /// Larger cancel count.
    pub to_count: usize,
    /// Failure rate at `from_count`.
    pub from_rate: f64,
    /// Failure rate at `to_count`.
    pub to_rate: f64,
}

/// Failure rate as a function of the cancel count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StressCurve {
    /// Total T gates in the unmodified circuit.
    pub total_t: usize,
    /// One point per cancel count, in sweep order.
    pub points: Vec<StressPoint>,
    /// Adjacent points whose failure rate decreased.
    pub violations: Vec<MonotonicityViolation>,
}

impl StressCurve {
    /// True when the failure rate never decreased.
    pub fn is_monotone(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Inject-and-verify over a range of cancel counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressSweep {
    /// Cancel counts, ascending.
    pub cancel_counts: Vec<usize>,
    /// Seeds per cancel count; trial `i` uses `seed + i`.
    pub trials: usize,
    /// Base seed.
    pub seed: u64,
}

impl Default for StressSweep {
    fn default() -> Self {
        Self {
            cancel_counts: (0..=4).collect(),
            trials: 8,
            seed: 42,
        }
    }
}

impl StressSweep {
    /// Sweep `0..=max_cancel`.
    pub fn up_to(max_cancel: usize, trials: usize, seed: u64) -> Self {
        Self {
            cancel_counts: (0..=max_cancel).collect(),
            trials,
            seed,
        }
    }

    /// Run the sweep against `circuit`.
    pub fn run(&self, circuit: &Circuit, verifier: &Verifier) -> SimResult<StressCurve> {
        let total_t = circuit.t_sites().len();
        let mut points = Vec::with_capacity(self.cancel_counts.len());

        for &cancel_count in &self.cancel_counts {
            let mut failures = 0;
            let mut phase_only_failures = 0;
            for trial in 0..self.trials {
                let seed = self.seed.wrapping_add(trial as u64);
                let stressed = StressInjector::inject(circuit, cancel_count, seed)?;
                let report = verifier.verify(&stressed)?;
                if !report.passed() {
                    failures += 1;
                    let phase_only = report
                        .counter_example
                        .as_ref()
                        .is_some_and(|ce| ce.outcome == StateOutcome::PhaseOnly)
                        && report.mismatches == 0;
                    if phase_only {
                        phase_only_failures += 1;
                    }
                }
            }
            let failure_rate = if self.trials == 0 {
                0.0
            } else {
                failures as f64 / self.trials as f64
            };
            debug!(cancel_count, failures, trials = self.trials, "stress point");
            points.push(StressPoint {
                cancel_count,
                trials: self.trials,
                failures,
                phase_only_failures,
                failure_rate,
            });
        }

        let violations = find_violations(&points);
        for v in &violations {
            warn!(
                from = v.from_count,
                to = v.to_count,
                from_rate = v.from_rate,
                to_rate = v.to_rate,
                "failure rate decreased as more T gates were removed"
            );
        }
        Ok(StressCurve {
            total_t,
            points,
            violations,
        })
    }
}

fn find_violations(points: &[StressPoint]) -> Vec<MonotonicityViolation> {
    points
        .windows(2)
        .filter(|w| w[1].failure_rate < w[0].failure_rate)
        .map(|w| MonotonicityViolation {
            from_count: w[0].cancel_count,
            to_count: w[1].cancel_count,
            from_rate: w[0].failure_rate,
            to_rate: w[1].failure_rate,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_ir::{Gate, Operation, QubitId, QubitRole};

    fn t_ladder(len: usize) -> Circuit {
        let mut c = Circuit::new("ladder");
        let qs = c.add_register(QubitRole::Memory, "m", 2);
        for i in 0..len {
            c.push_operation(Operation::t(qs[i % 2])).unwrap();
            c.push_operation(Operation::cx(qs[0], qs[1]).unwrap()).unwrap();
        }
        c
    }

    fn point(cancel_count: usize, failure_rate: f64) -> StressPoint {
        StressPoint {
            cancel_count,
            trials: 4,
            failures: (failure_rate * 4.0) as usize,
            phase_only_failures: 0,
            failure_rate,
        }
    }

    #[test]
    fn test_inject_removes_exactly_k() {
        let c = t_ladder(6);
        let stressed = StressInjector::inject(&c, 4, 7).unwrap();
        assert_eq!(stressed.t_sites().len(), 2);
        assert_eq!(stressed.depth(), c.depth());
        // CNOTs untouched.
        let cx = |c: &Circuit| c.operations().filter(|(_, op)| op.gate == Gate::CX).count();
        assert_eq!(cx(&stressed), cx(&c));
    }

    #[test]
    fn test_selection_is_prefix_closed() {
        let c = t_ladder(8);
        let all = StressInjector::select(&c, 8, 3).unwrap();
        for k in 0..=8 {
            assert_eq!(StressInjector::select(&c, k, 3).unwrap(), all[..k]);
        }
    }

    #[test]
    fn test_too_many_cancellations() {
        let c = t_ladder(3);
        let err = StressInjector::select(&c, 4, 0).unwrap_err();
        assert!(matches!(
            err,
            SimError::InsufficientTGates {
                requested: 4,
                available: 3
            }
        ));
        assert!(StressInjector::inject(&c, 3, 0).unwrap().t_sites().is_empty());
    }

    #[test]
    fn test_violations_found_between_neighbours() {
        let points = [point(0, 0.0), point(1, 0.75), point(2, 0.5), point(3, 1.0)];
        let v = find_violations(&points);
        assert_eq!(v.len(), 1);
        assert_eq!((v[0].from_count, v[0].to_count), (1, 2));
    }

    #[test]
    fn test_single_qubit_phase_sweep() {
        // T·T·Tdg·Tdg is the identity; removing any gate leaves a phase.
        let mut c = Circuit::new("phase");
        c.add_qubit(QubitRole::Memory, "m0");
        for gate in [Gate::T, Gate::T, Gate::Tdg, Gate::Tdg] {
            c.push_operation(Operation::new(gate, vec![QubitId(0)]).unwrap())
                .unwrap();
        }
        assert_eq!(StressInjector::inject(&c, 0, 1).unwrap().moments(), c.moments());
        assert_eq!(StressSweep::up_to(2, 3, 9).cancel_counts, vec![0, 1, 2]);
    }
}

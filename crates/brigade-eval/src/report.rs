//! Experiment and sweep reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brigade_ir::ResourceCounts;
use brigade_sim::{StressCurve, VerificationReport};
use brigade_synth::{PassGadgets, PeepholeStats};

use crate::config::{ExperimentConfiguration, VerdictMode};
use crate::reproducibility::ReproducibilityInfo;

/// Outcome of one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Built and verified.
    Pass,
    /// Built, verification found a counter-example.
    Fail,
    /// The builder rejected the configuration.
    ConstructionFailed,
    /// Built but not verified, by choice or because simulation was impossible.
    NotVerified,
}

impl Verdict {
    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
            Verdict::ConstructionFailed => "construction-failed",
            Verdict::NotVerified => "not-verified",
        }
    }
}

/// Everything recorded for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// The configuration.
    pub configuration: ExperimentConfiguration,
    /// The verdict.
    pub verdict: Verdict,
    /// Construction or simulation error message.
    pub error: Option<String>,
    /// Resource counts of the built circuit.
    pub resources: Option<ResourceCounts>,
    /// Logical gadgets per pass.
    pub gadgets: Option<PassGadgets>,
    /// Sibling groups that fell back to serial placement.
    pub serialized_groups: usize,
    /// Peephole rewrites, when the configuration asked for them.
    pub optimization: Option<PeepholeStats>,
    /// Whether the qubit count matches `n + 2^(n+1) + 1 + ancillas`.
    pub qubit_formula_holds: Option<bool>,
    /// Verification of the unmodified circuit.
    pub verification: Option<VerificationReport>,
    /// T-gate cancellation curve.
    pub stress: Option<StressCurve>,
    /// Wall-clock time for this configuration, in milliseconds.
    pub elapsed_ms: u64,
}

impl ExperimentResult {
    /// A result for a configuration the builder rejected.
    pub fn construction_failed(configuration: ExperimentConfiguration, error: String) -> Self {
        Self {
            configuration,
            verdict: Verdict::ConstructionFailed,
            error: Some(error),
            resources: None,
            gadgets: None,
            serialized_groups: 0,
            optimization: None,
            qubit_formula_holds: None,
            verification: None,
            stress: None,
            elapsed_ms: 0,
        }
    }
}

/// Verdict tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Configurations run.
    pub total: usize,
    /// Passing configurations.
    pub passed: usize,
    /// Failing configurations.
    pub failed: usize,
    /// Rejected configurations.
    pub construction_failed: usize,
    /// Unverified configurations.
    pub not_verified: usize,
    /// Stress monotonicity violations across all configurations.
    pub stress_violations: usize,
}

impl SweepSummary {
    /// Tally `results`.
    pub fn from_results(results: &[ExperimentResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for r in results {
            match r.verdict {
                Verdict::Pass => summary.passed += 1,
                Verdict::Fail => summary.failed += 1,
                Verdict::ConstructionFailed => summary.construction_failed += 1,
                Verdict::NotVerified => summary.not_verified += 1,
            }
            summary.stress_violations += r.stress.as_ref().map_or(0, |s| s.violations.len());
        }
        summary
    }
}

/// Complete sweep report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Schema version for forward compatibility.
    pub schema_version: String,
    /// When the sweep finished.
    pub timestamp: DateTime<Utc>,
    /// Sweep name.
    pub name: String,
    /// Verdict mode.
    pub mode: VerdictMode,
    /// One result per configuration, in sweep order.
    pub results: Vec<ExperimentResult>,
    /// Verdict tallies.
    pub summary: SweepSummary,
    /// Reproducibility information.
    pub reproducibility: ReproducibilityInfo,
}

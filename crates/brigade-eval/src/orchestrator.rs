//! Sweep execution.
//!
//! Configurations run one after another; each is built fresh, so a failure
//! in one never leaks state into the next. Verification itself is parallel.

use std::time::Instant;

use brigade_sim::{SimError, SimResult, StressCurve, StressSweep, Verifier, VerifierConfig};
use brigade_synth::{BuiltQram, Catalog, QramBuilder};
use tracing::{info, warn};

use crate::config::{ExperimentConfiguration, StressParameters, SweepConfig, VerdictMode};
use crate::error::EvalResult;
use crate::report::{ExperimentResult, SweepReport, SweepSummary, Verdict};
use crate::reproducibility::{ReproducibilityInfo, SCHEMA_VERSION};

/// Runs experiment configurations and sweeps.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    builder: QramBuilder,
    cli_args: Vec<String>,
}

impl Orchestrator {
    /// Orchestrator over `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            builder: QramBuilder::new(catalog),
            cli_args: Vec::new(),
        }
    }

    /// Record the command line in report reproducibility info.
    pub fn with_cli_args(mut self, cli_args: Vec<String>) -> Self {
        self.cli_args = cli_args;
        self
    }

    /// Run every configuration of `sweep`.
    pub fn run(&self, sweep: &SweepConfig) -> EvalResult<SweepReport> {
        self.run_with_progress(sweep, |_| {})
    }

    /// Run `sweep`, calling `on_result` after each configuration.
    pub fn run_with_progress(
        &self,
        sweep: &SweepConfig,
        mut on_result: impl FnMut(&ExperimentResult),
    ) -> EvalResult<SweepReport> {
        sweep.validate()?;
        let configurations = sweep.configurations();
        info!(
            sweep = %sweep.name,
            configurations = configurations.len(),
            mode = %sweep.mode,
            "starting sweep"
        );

        let mut results = Vec::with_capacity(configurations.len());
        for config in configurations {
            let result = self.run_one(&config, &sweep.verifier);
            on_result(&result);
            results.push(result);
        }

        let summary = SweepSummary::from_results(&results);
        info!(
            passed = summary.passed,
            failed = summary.failed,
            construction_failed = summary.construction_failed,
            "sweep finished"
        );
        Ok(SweepReport {
            schema_version: SCHEMA_VERSION.into(),
            timestamp: chrono::Utc::now(),
            name: sweep.name.clone(),
            mode: sweep.mode,
            results,
            summary,
            reproducibility: ReproducibilityInfo::capture(
                &self.cli_args,
                sweep.verifier.seed,
                sweep.stress.seed,
            ),
        })
    }

    /// Build, and depending on the mode verify and stress, one configuration.
    pub fn run_one(
        &self,
        config: &ExperimentConfiguration,
        verifier: &VerifierConfig,
    ) -> ExperimentResult {
        let start = Instant::now();
        let label = config.label();
        info!(config = %label, mode = %config.mode, "running configuration");

        let built = match self.builder.build(config.build_options()) {
            Ok(built) => built,
            Err(e) => {
                info!(config = %label, error = %e, "construction failed");
                return ExperimentResult::construction_failed(config.clone(), e.to_string());
            }
        };

        let mut result = ExperimentResult {
            configuration: config.clone(),
            verdict: Verdict::NotVerified,
            error: None,
            resources: Some(built.resources.clone()),
            gadgets: Some(built.gadgets),
            serialized_groups: built.serialized_groups,
            optimization: built.optimization,
            qubit_formula_holds: Some(built.qubit_formula_holds()),
            verification: None,
            stress: None,
            elapsed_ms: 0,
        };

        if config.mode != VerdictMode::BuildOnly {
            if let Err(e) = self.verify_into(&mut result, &built, config, verifier) {
                warn!(config = %label, error = %e, "simulation failed");
                result.verdict = Verdict::NotVerified;
                result.error = Some(e.to_string());
            }
        }

        result.elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            config = %label,
            verdict = result.verdict.name(),
            t_count = built.resources.t_count,
            t_depth = built.resources.t_depth,
            elapsed_ms = result.elapsed_ms,
            "configuration finished"
        );
        result
    }

    fn verify_into(
        &self,
        result: &mut ExperimentResult,
        built: &BuiltQram,
        config: &ExperimentConfiguration,
        verifier: &VerifierConfig,
    ) -> SimResult<()> {
        let report = Verifier::new(verifier.clone()).verify(&built.circuit)?;
        result.verdict = if report.passed() {
            Verdict::Pass
        } else {
            Verdict::Fail
        };
        result.verification = Some(report);

        if config.mode == VerdictMode::StressAndVerify {
            let params = config.stress.clone().unwrap_or_default();
            let total = built.resources.t_count;
            if params.max_cancel > total {
                let overdraw = SimError::InsufficientTGates {
                    requested: params.max_cancel,
                    available: total,
                };
                warn!(
                    config = %config.label(),
                    requested = params.max_cancel,
                    available = total,
                    "stress sweep truncated to the circuit's T count"
                );
                result.error = Some(overdraw.to_string());
            }
            result.stress = Some(stress_curve(built, &params, verifier)?);
        }
        Ok(())
    }
}

/// Stress curve up to `max_cancel`, or up to the T count when that is lower.
fn stress_curve(
    built: &BuiltQram,
    params: &StressParameters,
    verifier: &VerifierConfig,
) -> SimResult<StressCurve> {
    let max_cancel = params.max_cancel.min(built.resources.t_count);
    let verifier = Verifier::new(VerifierConfig {
        short_circuit: true,
        ..verifier.clone()
    });
    StressSweep::up_to(max_cancel, params.trials, params.seed).run(&built.circuit, &verifier)
}

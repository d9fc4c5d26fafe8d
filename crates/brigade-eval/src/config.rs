//! Experiment and sweep configuration.
//!
//! Sweeps are usually written as YAML:
//!
//! ```yaml
//! name: relative-phase-pairs
//! qubit_counts: [1, 2, 3]
//! query: [relative-phase-t-depth-4-cx-3]
//! mirror: [relative-phase-t-depth-4-cx-4, relative-phase-cx-4-t-depth-4]
//! strategies: [out-to-in, in-to-out]
//! parallel: [false, true]
//! mode: simulate-and-verify
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use brigade_sim::VerifierConfig;
use brigade_synth::{BuildOptions, DecompositionId, MirrorStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

/// What to do with each built circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictMode {
    /// Report resources only.
    BuildOnly,
    /// Verify the circuit against the ideal QRAM.
    #[default]
    SimulateAndVerify,
    /// Verify, then sweep T-gate cancellations.
    StressAndVerify,
}

impl VerdictMode {
    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            VerdictMode::BuildOnly => "build-only",
            VerdictMode::SimulateAndVerify => "simulate-and-verify",
            VerdictMode::StressAndVerify => "stress-and-verify",
        }
    }
}

impl fmt::Display for VerdictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VerdictMode {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        [
            VerdictMode::BuildOnly,
            VerdictMode::SimulateAndVerify,
            VerdictMode::StressAndVerify,
        ]
        .into_iter()
        .find(|m| m.name() == key)
        .ok_or_else(|| EvalError::Config(format!("unknown verdict mode '{s}'")))
    }
}

/// T-gate cancellation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressParameters {
    /// Largest cancel count, clamped to the circuit's T count.
    pub max_cancel: usize,
    /// Seeds per cancel count.
    pub trials: usize,
    /// Base seed.
    pub seed: u64,
}

impl Default for StressParameters {
    fn default() -> Self {
        Self {
            max_cancel: 4,
            trials: 8,
            seed: 42,
        }
    }
}

/// One point of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfiguration {
    /// Construction parameters.
    #[serde(flatten)]
    pub options: BuildOptions,
    /// Verdict mode.
    pub mode: VerdictMode,
    /// Stress settings, used in `stress-and-verify` mode.
    pub stress: Option<StressParameters>,
}

impl ExperimentConfiguration {
    /// Construction parameters for the builder.
    pub fn build_options(&self) -> &BuildOptions {
        &self.options
    }

    /// Short identifier such as `n2/zero-ancilla-t-depth-4/zero-ancilla-t-depth-4/out-to-in/serial`.
    pub fn label(&self) -> String {
        let o = &self.options;
        format!(
            "n{}/{}/{}/{}/{}{}",
            o.address_qubits,
            o.query,
            o.mirror,
            o.strategy,
            if o.parallel { "parallel" } else { "serial" },
            if o.optimize { "/optimized" } else { "" }
        )
    }
}

/// A Cartesian product of configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Sweep name, copied into the report.
    pub name: String,
    /// Address widths.
    pub qubit_counts: Vec<usize>,
    /// Query decompositions.
    pub query: Vec<DecompositionId>,
    /// Mirror decompositions.
    pub mirror: Vec<DecompositionId>,
    /// Mirror strategies.
    pub strategies: Vec<MirrorStrategy>,
    /// Placement modes.
    pub parallel: Vec<bool>,
    /// Data decomposition, fixed for the sweep.
    pub data: DecompositionId,
    /// Ancilla budget, fixed for the sweep.
    pub ancilla_budget: Option<usize>,
    /// Peephole optimization, fixed for the sweep.
    pub optimize: bool,
    /// Verdict mode.
    pub mode: VerdictMode,
    /// Verifier settings.
    pub verifier: VerifierConfig,
    /// Stress settings.
    pub stress: StressParameters,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            name: "sweep".into(),
            qubit_counts: vec![1, 2, 3],
            query: vec![DecompositionId::ZeroAncillaTDepth4],
            mirror: vec![DecompositionId::ZeroAncillaTDepth4],
            strategies: vec![MirrorStrategy::OutToIn],
            parallel: vec![false],
            data: DecompositionId::ZeroAncillaTDepth4,
            ancilla_budget: None,
            optimize: false,
            mode: VerdictMode::default(),
            verifier: VerifierConfig::default(),
            stress: StressParameters::default(),
        }
    }
}

impl SweepConfig {
    /// Parse a YAML sweep.
    pub fn from_yaml_str(yaml: &str) -> EvalResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML sweep file.
    pub fn from_yaml_file(path: &Path) -> EvalResult<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| EvalError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    /// Reject sweeps with an empty axis.
    pub fn validate(&self) -> EvalResult<()> {
        let axes = [
            ("qubit_counts", self.qubit_counts.is_empty()),
            ("query", self.query.is_empty()),
            ("mirror", self.mirror.is_empty()),
            ("strategies", self.strategies.is_empty()),
            ("parallel", self.parallel.is_empty()),
        ];
        if let Some((axis, _)) = axes.iter().find(|(_, empty)| *empty) {
            return Err(EvalError::Config(format!("sweep axis '{axis}' is empty")));
        }
        Ok(())
    }

    /// Number of distinct configurations in the product.
    pub fn len(&self) -> usize {
        distinct(&self.qubit_counts).len()
            * distinct(&self.query).len()
            * distinct(&self.mirror).len()
            * distinct(&self.strategies).len()
            * distinct(&self.parallel).len()
    }

    /// True when some axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every distinct configuration, qubit count varying slowest and
    /// parallel fastest.
    ///
    /// Repeated axis values are dropped, keeping the first occurrence.
    pub fn configurations(&self) -> Vec<ExperimentConfiguration> {
        let stress = (self.mode == VerdictMode::StressAndVerify).then(|| self.stress.clone());
        let qubit_counts = distinct(&self.qubit_counts);
        let queries = distinct(&self.query);
        let mirrors = distinct(&self.mirror);
        let strategies = distinct(&self.strategies);
        let parallel_flags = distinct(&self.parallel);

        let mut out = Vec::with_capacity(self.len());
        for &address_qubits in &qubit_counts {
            for &query in &queries {
                for &mirror in &mirrors {
                    for &strategy in &strategies {
                        for &parallel in &parallel_flags {
                            out.push(ExperimentConfiguration {
                                options: BuildOptions {
                                    address_qubits,
                                    query,
                                    mirror,
                                    data: self.data,
                                    strategy,
                                    parallel,
                                    ancilla_budget: self.ancilla_budget,
                                    optimize: self.optimize,
                                },
                                mode: self.mode,
                                stress: stress.clone(),
                            });
                        }
                    }
                }
            }
        }
        out
    }
}

fn distinct<T: Copy + PartialEq>(values: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for &v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

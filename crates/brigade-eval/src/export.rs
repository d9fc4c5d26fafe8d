//! Export Module: JSON and CSV output.

use serde::{Deserialize, Serialize};
use std::path::Path;

use brigade_sim::StressCurve;

use crate::error::{EvalError, EvalResult};
use crate::report::SweepReport;

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Export a sweep report to a JSON string.
pub fn to_json(report: &SweepReport, config: &ExportConfig) -> EvalResult<String> {
    if config.pretty {
        serde_json::to_string_pretty(report).map_err(EvalError::from)
    } else {
        serde_json::to_string(report).map_err(EvalError::from)
    }
}

/// Export a sweep report to a JSON file.
pub fn to_file(report: &SweepReport, path: &Path, config: &ExportConfig) -> EvalResult<()> {
    let json = to_json(report, config)?;
    write(path, &json)
}

const RESULT_COLUMNS: &[&str] = &[
    "n",
    "query",
    "mirror",
    "data",
    "strategy",
    "parallel",
    "optimize",
    "verdict",
    "qubits",
    "ancillas",
    "depth",
    "t_count",
    "t_depth",
    "cx_count",
    "gadgets",
    "serialized_groups",
    "removed_gates",
    "states_checked",
    "exact",
    "phase_only",
    "mismatches",
    "exact_pct",
    "error",
];

/// One row per configuration.
pub fn to_csv(report: &SweepReport) -> String {
    let mut out = RESULT_COLUMNS.join(",");
    out.push('\n');
    for r in &report.results {
        let o = &r.configuration.options;
        let mut row: Vec<String> = vec![
            o.address_qubits.to_string(),
            o.query.to_string(),
            o.mirror.to_string(),
            o.data.to_string(),
            o.strategy.to_string(),
            o.parallel.to_string(),
            o.optimize.to_string(),
            r.verdict.name().to_string(),
        ];
        match &r.resources {
            Some(res) => row.extend(
                [
                    res.qubits,
                    res.ancillas,
                    res.depth,
                    res.t_count,
                    res.t_depth,
                    res.cx_count,
                    res.gadgets,
                ]
                .map(|v| v.to_string()),
            ),
            None => row.extend(std::iter::repeat_n(String::new(), 7)),
        }
        row.push(r.serialized_groups.to_string());
        row.push(
            r.optimization
                .map(|s| (2 * s.cancelled_pairs + s.merged_pairs).to_string())
                .unwrap_or_default(),
        );
        match &r.verification {
            Some(v) => {
                row.extend(
                    [v.states_checked, v.exact, v.phase_only, v.mismatches].map(|c| c.to_string()),
                );
                row.push(format!("{:.2}", v.exact_percent()));
            }
            None => row.extend(std::iter::repeat_n(String::new(), 5)),
        }
        row.push(csv_field(r.error.as_deref().unwrap_or("")));
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Write the per-configuration CSV to a file.
pub fn csv_to_file(report: &SweepReport, path: &Path) -> EvalResult<()> {
    write(path, &to_csv(report))
}

/// Failure table of one stress curve.
pub fn stress_to_csv(curve: &StressCurve) -> String {
    let mut out = String::from("cancel_count,trials,failures,phase_only_failures,failure_rate\n");
    for p in &curve.points {
        out.push_str(&format!(
            "{},{},{},{},{:.4}\n",
            p.cancel_count, p.trials, p.failures, p.phase_only_failures, p.failure_rate
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write(path: &Path, contents: &str) -> EvalResult<()> {
    std::fs::write(path, contents)
        .map_err(|e| EvalError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

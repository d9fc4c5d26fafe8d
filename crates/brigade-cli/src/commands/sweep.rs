//! Sweep command implementation.
//!
//! `brigade sweep --config <sweep.yaml> [--export <report.json>] [--csv <report.csv>]`

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

use brigade_eval::export::{self, ExportConfig};
use brigade_eval::{Orchestrator, SweepConfig};

use super::run::verdict_style;

/// Execute the sweep command.
pub fn execute(config: &str, export_path: Option<&str>, csv: Option<&str>) -> anyhow::Result<()> {
    let sweep = SweepConfig::from_yaml_file(Path::new(config))?;
    let cli_args: Vec<String> = std::env::args().collect();
    let orchestrator = Orchestrator::default().with_cli_args(cli_args);

    let bar = ProgressBar::new(sweep.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    let report = orchestrator.run_with_progress(&sweep, |result| {
        bar.set_message(result.configuration.label());
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    if let Some(path) = export_path {
        export::to_file(&report, Path::new(path), &ExportConfig::default())?;
        info!(path, "wrote JSON report");
        eprintln!("{} Report written to {}", style("OK").green().bold(), path);
    }
    if let Some(path) = csv {
        export::csv_to_file(&report, Path::new(path))?;
        info!(path, "wrote CSV table");
        eprintln!("{} Table written to {}", style("OK").green().bold(), path);
    }

    eprintln!();
    eprintln!(
        "{} ({}, {})",
        style("Sweep Summary").bold().underlined(),
        report.name,
        report.mode
    );
    for result in &report.results {
        let (t_count, t_depth) = result
            .resources
            .as_ref()
            .map_or((0, 0), |r| (r.t_count, r.t_depth));
        eprintln!(
            "  {:<72} {:>5} T {:>4} T-depth  {}",
            result.configuration.label(),
            t_count,
            t_depth,
            verdict_style(result.verdict)
        );
    }
    let s = &report.summary;
    eprintln!();
    eprintln!(
        "  Total:       {} ({} pass, {} fail, {} rejected, {} unverified)",
        s.total, s.passed, s.failed, s.construction_failed, s.not_verified
    );
    if s.stress_violations > 0 {
        eprintln!(
            "  Stress:      {} monotonicity violations",
            style(s.stress_violations).yellow()
        );
    }
    eprintln!(
        "  Finished:    {}",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

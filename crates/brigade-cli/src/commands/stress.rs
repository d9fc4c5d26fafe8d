//! Stress command implementation.
//!
//! `brigade stress -n 2 [--max-cancel 4] [--trials 8] [--seed 42] [--csv <table.csv>]`

use console::style;
use std::path::Path;

use brigade_eval::export;
use brigade_sim::{StressSweep, Verifier, VerifierConfig};

use super::common::{ConfigArgs, print_resources};

/// Execute the stress command.
pub fn execute(
    args: &ConfigArgs,
    max_cancel: usize,
    trials: usize,
    seed: u64,
    csv: Option<&str>,
) -> anyhow::Result<()> {
    let built = args.build()?;
    print_resources(&built);

    let verifier = Verifier::new(VerifierConfig {
        short_circuit: true,
        ..VerifierConfig::default()
    });
    let baseline = verifier.verify(&built.circuit)?;
    if !baseline.passed() {
        eprintln!(
            "{} unmodified circuit already fails verification",
            style("warning:").yellow().bold()
        );
    }

    let curve = StressSweep::up_to(max_cancel, trials, seed).run(&built.circuit, &verifier)?;

    eprintln!();
    eprintln!("{}", style("Stress Curve").bold().underlined());
    eprintln!(
        "  {:>6} {:>8} {:>10} {:>12}",
        "cancel", "failures", "phase-only", "failure rate"
    );
    for p in &curve.points {
        eprintln!(
            "  {:>6} {:>8} {:>10} {:>11.1}%",
            p.cancel_count,
            format!("{}/{}", p.failures, p.trials),
            p.phase_only_failures,
            100.0 * p.failure_rate
        );
    }
    if curve.is_monotone() {
        eprintln!("  Monotone:    {}", style("yes").green());
    } else {
        for v in &curve.violations {
            eprintln!(
                "  {} failure rate fell from {:.1}% at k={} to {:.1}% at k={}",
                style("Violation:").yellow().bold(),
                100.0 * v.from_rate,
                v.from_count,
                100.0 * v.to_rate,
                v.to_count
            );
        }
    }

    if let Some(path) = csv {
        std::fs::write(Path::new(path), export::stress_to_csv(&curve))?;
        eprintln!("{} Table written to {}", style("OK").green().bold(), path);
    }
    Ok(())
}

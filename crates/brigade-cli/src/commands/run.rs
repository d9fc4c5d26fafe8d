//! Run command implementation.
//!
//! `brigade run -n 2 --query <scheme> --mirror <scheme> [--parallel] [--mode <mode>] [--export <file>]`

use console::style;
use std::path::Path;

use brigade_eval::{
    ExperimentConfiguration, ExperimentResult, Orchestrator, StressParameters, Verdict, VerdictMode,
};
use brigade_sim::VerifierConfig;

use super::common::ConfigArgs;

/// Execute the run command.
pub fn execute(args: &ConfigArgs, mode: VerdictMode, export: Option<&str>) -> anyhow::Result<()> {
    let config = ExperimentConfiguration {
        options: args.build_options(),
        mode,
        stress: (mode == VerdictMode::StressAndVerify).then(StressParameters::default),
    };

    let result = Orchestrator::default().run_one(&config, &VerifierConfig::default());
    let json = serde_json::to_string_pretty(&result)?;

    if let Some(path) = export {
        std::fs::write(Path::new(path), &json)?;
        eprintln!("{} Result written to {}", style("OK").green().bold(), path);
    } else {
        println!("{json}");
    }

    print_summary(&result);

    if result.verdict == Verdict::ConstructionFailed {
        anyhow::bail!(
            "{}",
            result.error.as_deref().unwrap_or("construction failed")
        );
    }
    Ok(())
}

fn print_summary(result: &ExperimentResult) {
    eprintln!();
    eprintln!("{}", style("Run Summary").bold().underlined());
    eprintln!("  Config:      {}", result.configuration.label());
    eprintln!("  Verdict:     {}", verdict_style(result.verdict));

    if let Some(r) = &result.resources {
        eprintln!(
            "  Resources:   {} qubits, depth {}, T-count {}, T-depth {}, CX {}",
            r.qubits, r.depth, r.t_count, r.t_depth, r.cx_count
        );
    }
    if let Some(v) = &result.verification {
        eprintln!(
            "  States:      {} checked ({:?}), {:.1}% exact, {:.1}% phase-only, {:.1}% mismatch",
            v.states_checked,
            v.regime,
            v.exact_percent(),
            v.phase_only_percent(),
            v.mismatch_percent()
        );
        let passed = v.superposition.iter().filter(|c| c.passed).count();
        eprintln!(
            "  Interfere:   {}/{} superposition checks",
            passed,
            v.superposition.len()
        );
        if let Some(ce) = &v.counter_example {
            eprintln!(
                "  Counter:     address {} bus {} memory {:#b} target {} ({:?})",
                ce.input.address,
                u8::from(ce.input.bus),
                ce.input.memory,
                u8::from(ce.input.target),
                ce.outcome
            );
            eprintln!("  Expected:    {}", ce.expected);
            for amp in &ce.observed {
                eprintln!("  Observed:    {} ({:+.3}{:+.3}i)", amp.state, amp.re, amp.im);
            }
        }
    }
    if let Some(s) = &result.stress {
        for p in &s.points {
            eprintln!(
                "  Stress:      k={:<3} {}/{} failed",
                p.cancel_count, p.failures, p.trials
            );
        }
    }
    if let Some(e) = &result.error {
        eprintln!("  Error:       {}", style(e).red());
    }
    eprintln!("  Elapsed:     {} ms", result.elapsed_ms);
}

/// Colored verdict label.
pub fn verdict_style(verdict: Verdict) -> console::StyledObject<&'static str> {
    match verdict {
        Verdict::Pass => style("PASS").green().bold(),
        Verdict::Fail => style("FAIL").red().bold(),
        Verdict::ConstructionFailed => style("CONSTRUCTION FAILED").red(),
        Verdict::NotVerified => style("NOT VERIFIED").yellow(),
    }
}

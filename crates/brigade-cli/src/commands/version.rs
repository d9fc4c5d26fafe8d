//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - bucket-brigade QRAM resource analysis",
        style("Brigade").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  brigade-ir     Moment-based Clifford+T circuit IR");
    println!("  brigade-synth  Decomposition catalog, tree builder and expander");
    println!("  brigade-sim    Sparse-state verifier and T-gate stress injection");
    println!("  brigade-eval   Experiment sweeps and report export");
    println!("  brigade-cli    Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}

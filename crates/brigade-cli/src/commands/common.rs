//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use brigade_synth::{BuildOptions, BuiltQram, DecompositionId, MirrorStrategy, QramBuilder};

/// Construction flags shared by single-configuration commands.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Number of address qubits
    #[arg(short = 'n', long, default_value = "2")]
    pub address_qubits: usize,

    /// Decomposition of the query Toffolis
    #[arg(short, long, default_value = "zero-ancilla-t-depth-4")]
    pub query: DecompositionId,

    /// Decomposition of the mirror Toffolis
    #[arg(long, default_value = "zero-ancilla-t-depth-4")]
    pub mirror: DecompositionId,

    /// Decomposition of the data (memory read) Toffolis
    #[arg(short, long, default_value = "zero-ancilla-t-depth-4")]
    pub data: DecompositionId,

    /// Mirror strategy (out-to-in, in-to-out)
    #[arg(short, long, default_value = "out-to-in")]
    pub strategy: MirrorStrategy,

    /// Pack sibling gadgets into shared moments
    #[arg(short, long)]
    pub parallel: bool,

    /// Largest number of ancilla qubits
    #[arg(long)]
    pub ancilla_budget: Option<usize>,

    /// Run the peephole optimizer on the expanded circuit
    #[arg(long)]
    pub optimize: bool,
}

impl ConfigArgs {
    /// Builder options for these flags.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            address_qubits: self.address_qubits,
            query: self.query,
            mirror: self.mirror,
            data: self.data,
            strategy: self.strategy,
            parallel: self.parallel,
            ancilla_budget: self.ancilla_budget,
            optimize: self.optimize,
        }
    }

    /// Build the circuit.
    pub fn build(&self) -> Result<BuiltQram> {
        QramBuilder::default()
            .build(&self.build_options())
            .with_context(|| format!("Failed to build {}", self.describe()))
    }

    /// One-line description.
    pub fn describe(&self) -> String {
        format!(
            "n={} query={} mirror={} data={} strategy={}{}{}",
            self.address_qubits,
            self.query,
            self.mirror,
            self.data,
            self.strategy,
            if self.parallel { " parallel" } else { "" },
            if self.optimize { " optimized" } else { "" }
        )
    }
}

/// Print the resource block of a built circuit to stderr.
pub fn print_resources(built: &BuiltQram) {
    let r = &built.resources;
    eprintln!("{}", style("Resources").bold().underlined());
    eprintln!(
        "  Qubits:      {} ({} ancillas){}",
        r.qubits,
        r.ancillas,
        if built.qubit_formula_holds() {
            String::new()
        } else {
            format!(" {}", style("formula mismatch").red())
        }
    );
    eprintln!("  Depth:       {} ({} with T)", r.depth, r.t_depth);
    eprintln!(
        "  Gates:       {} T, {} CX, {} H, {} S, {} CCX",
        r.t_count, r.cx_count, r.h_count, r.s_count, r.ccx_count
    );
    eprintln!(
        "  Gadgets:     {} query, {} data, {} mirror",
        built.gadgets.query, built.gadgets.data, built.gadgets.mirror
    );
    if built.serialized_groups > 0 {
        eprintln!(
            "  Fallbacks:   {} sibling groups serialized by the ancilla budget",
            style(built.serialized_groups).yellow()
        );
    }
    if let Some(opt) = &built.optimization {
        eprintln!(
            "  Peephole:    {} pairs cancelled, {} merged, {} moments dropped in {} rounds",
            opt.cancelled_pairs, opt.merged_pairs, opt.removed_moments, opt.rounds
        );
    }
}

//! Brigade Command-Line Interface
//!
//! Build bucket-brigade QRAM circuits from a choice of Toffoli
//! decompositions, verify them, stress them and sweep over configurations.
//!
//! ```text
//! brigade run -n 2 --query relative-phase-t-depth-4-cx-3 \
//!             --mirror relative-phase-t-depth-4-cx-4 --parallel
//! brigade sweep --config sweep.yaml --export report.json --csv report.csv
//! brigade stress -n 2 --max-cancel 8 --trials 16
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use brigade_eval::VerdictMode;
use commands::common::ConfigArgs;
use commands::{catalog, diagram, run, stress, sweep, trace, version};

/// Brigade - bucket-brigade QRAM resource analysis
#[derive(Parser)]
#[command(name = "brigade")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, and optionally verify, one configuration
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// Verdict mode (build-only, simulate-and-verify, stress-and-verify)
        #[arg(short, long, default_value = "simulate-and-verify")]
        mode: VerdictMode,

        /// Output file for the JSON result (stdout if omitted)
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Run every configuration of a YAML sweep
    Sweep {
        /// Sweep file (YAML)
        #[arg(short, long)]
        config: String,

        /// Output file for the JSON report
        #[arg(short, long)]
        export: Option<String>,

        /// Output file for the CSV table
        #[arg(long)]
        csv: Option<String>,
    },

    /// Remove random T gates and track the verification failure rate
    Stress {
        #[command(flatten)]
        config: ConfigArgs,

        /// Largest number of T gates to remove
        #[arg(long, default_value = "4")]
        max_cancel: usize,

        /// Seeds per cancel count
        #[arg(long, default_value = "8")]
        trials: usize,

        /// Base seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file for the failure table (CSV)
        #[arg(long)]
        csv: Option<String>,
    },

    /// Print the expanded circuit
    Diagram {
        #[command(flatten)]
        config: ConfigArgs,

        /// Plain ASCII instead of box-drawing characters
        #[arg(long)]
        ascii: bool,
    },

    /// Simulate one basis input moment by moment
    Trace {
        #[command(flatten)]
        config: ConfigArgs,

        /// Address value
        #[arg(long, default_value = "0")]
        address: u64,

        /// Memory word, bit x is cell m_x
        #[arg(long, default_value = "0")]
        memory: u64,

        /// Start with the bus in |0⟩
        #[arg(long)]
        no_bus: bool,

        /// Start with the target in |1⟩
        #[arg(long)]
        target: bool,

        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the registered Toffoli decompositions
    Catalog,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            config,
            mode,
            export,
        } => run::execute(&config, mode, export.as_deref()),

        Commands::Sweep {
            config,
            export,
            csv,
        } => sweep::execute(&config, export.as_deref(), csv.as_deref()),

        Commands::Stress {
            config,
            max_cancel,
            trials,
            seed,
            csv,
        } => stress::execute(&config, max_cancel, trials, seed, csv.as_deref()),

        Commands::Diagram { config, ascii } => diagram::execute(&config, ascii),

        Commands::Trace {
            config,
            address,
            memory,
            no_bus,
            target,
            json,
        } => trace::execute(&config, address, memory, !no_bus, target, json),

        Commands::Catalog => {
            catalog::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

//! CLI command parsing and sweep-file tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`), sweep files
//! read from disk, and error paths.

// The CLI is a binary crate, so clap parsing is validated on equivalent
// structs and command behavior through the underlying crates.

// ============================================================================
// Sweep files
// ============================================================================

mod sweep_files {
    use std::io::Write;

    use brigade_eval::{EvalError, Orchestrator, SweepConfig, Verdict, export};

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_run_sweep_file() {
        let file = write_yaml(
            "name: smoke\nqubit_counts: [1]\nparallel: [false, true]\nmode: simulate-and-verify\n",
        );
        let sweep = SweepConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(sweep.len(), 2);

        let report = Orchestrator::default().run(&sweep).unwrap();
        assert!(report.results.iter().all(|r| r.verdict == Verdict::Pass));

        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("report.csv");
        export::csv_to_file(&report, &csv).unwrap();
        let table = std::fs::read_to_string(&csv).unwrap();
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let err = SweepConfig::from_yaml_file(std::path::Path::new("/nonexistent/sweep.yaml"))
            .unwrap_err();
        assert!(matches!(err, EvalError::Io(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let file = write_yaml("qubit_counts: [1, 2\n");
        let err = SweepConfig::from_yaml_file(file.path()).unwrap_err();
        assert!(matches!(err, EvalError::Config(_)));
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use brigade_eval::VerdictMode;
    use brigade_synth::{DecompositionId, MirrorStrategy};
    use clap::{Args, Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "brigade")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Args, Debug, Clone)]
    struct TestConfigArgs {
        #[arg(short = 'n', long, default_value = "2")]
        address_qubits: usize,
        #[arg(short, long, default_value = "zero-ancilla-t-depth-4")]
        query: DecompositionId,
        #[arg(long, default_value = "zero-ancilla-t-depth-4")]
        mirror: DecompositionId,
        #[arg(short, long, default_value = "zero-ancilla-t-depth-4")]
        data: DecompositionId,
        #[arg(short, long, default_value = "out-to-in")]
        strategy: MirrorStrategy,
        #[arg(short, long)]
        parallel: bool,
        #[arg(long)]
        ancilla_budget: Option<usize>,
        #[arg(long)]
        optimize: bool,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Run {
            #[command(flatten)]
            config: TestConfigArgs,
            #[arg(short, long, default_value = "simulate-and-verify")]
            mode: VerdictMode,
            #[arg(short, long)]
            export: Option<String>,
        },
        Sweep {
            #[arg(short, long)]
            config: String,
            #[arg(short, long)]
            export: Option<String>,
            #[arg(long)]
            csv: Option<String>,
        },
        Stress {
            #[command(flatten)]
            config: TestConfigArgs,
            #[arg(long, default_value = "4")]
            max_cancel: usize,
            #[arg(long, default_value = "8")]
            trials: usize,
            #[arg(long, default_value = "42")]
            seed: u64,
            #[arg(long)]
            csv: Option<String>,
        },
        Diagram {
            #[command(flatten)]
            config: TestConfigArgs,
            #[arg(long)]
            ascii: bool,
        },
        Trace {
            #[command(flatten)]
            config: TestConfigArgs,
            #[arg(long, default_value = "0")]
            address: u64,
            #[arg(long, default_value = "0")]
            memory: u64,
            #[arg(long)]
            no_bus: bool,
            #[arg(long)]
            target: bool,
            #[arg(long)]
            json: bool,
        },
        Catalog,
        Version,
    }

    // --- Run command ---

    #[test]
    fn test_parse_run_defaults() {
        let cli = TestCli::try_parse_from(["brigade", "run"]).unwrap();
        match cli.command {
            TestCommands::Run {
                config,
                mode,
                export,
            } => {
                assert_eq!(config.address_qubits, 2);
                assert_eq!(config.query, DecompositionId::ZeroAncillaTDepth4);
                assert_eq!(config.strategy, MirrorStrategy::OutToIn);
                assert!(!config.parallel);
                assert!(config.ancilla_budget.is_none());
                assert!(!config.optimize);
                assert_eq!(mode, VerdictMode::SimulateAndVerify);
                assert!(export.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_scenario() {
        let cli = TestCli::try_parse_from([
            "brigade",
            "run",
            "-n",
            "2",
            "--query",
            "relative-phase-t-depth-4-cx-3",
            "--mirror",
            "RELATIVE_PHASE_T_DEPTH_4_CX_4",
            "--strategy",
            "out-to-in",
            "--parallel",
            "--ancilla-budget",
            "8",
            "-m",
            "stress-and-verify",
            "-e",
            "out.json",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Run {
                config,
                mode,
                export,
            } => {
                assert_eq!(config.query, DecompositionId::RelativePhaseTDepth4Cx3);
                assert_eq!(config.mirror, DecompositionId::RelativePhaseTDepth4Cx4);
                assert!(config.parallel);
                assert_eq!(config.ancilla_budget, Some(8));
                assert_eq!(mode, VerdictMode::StressAndVerify);
                assert_eq!(export.as_deref(), Some("out.json"));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_optimize() {
        let cli = TestCli::try_parse_from(["brigade", "run", "--optimize", "-p"]).unwrap();
        match cli.command {
            TestCommands::Run { config, .. } => {
                assert!(config.optimize);
                assert!(config.parallel);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_unknown_scheme() {
        let result = TestCli::try_parse_from(["brigade", "run", "--query", "no-such-scheme"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_run_unknown_strategy() {
        let result = TestCli::try_parse_from(["brigade", "run", "--strategy", "sideways"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_run_unknown_mode() {
        let result = TestCli::try_parse_from(["brigade", "run", "--mode", "guess"]);
        assert!(result.is_err());
    }

    // --- Sweep command ---

    #[test]
    fn test_parse_sweep() {
        let cli = TestCli::try_parse_from([
            "brigade", "sweep", "-c", "sweep.yaml", "-e", "r.json", "--csv", "r.csv",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Sweep {
                config,
                export,
                csv,
            } => {
                assert_eq!(config, "sweep.yaml");
                assert_eq!(export.as_deref(), Some("r.json"));
                assert_eq!(csv.as_deref(), Some("r.csv"));
            }
            _ => panic!("Expected Sweep command"),
        }
    }

    #[test]
    fn test_parse_sweep_missing_config() {
        let result = TestCli::try_parse_from(["brigade", "sweep"]);
        assert!(result.is_err());
    }

    // --- Stress command ---

    #[test]
    fn test_parse_stress_defaults() {
        let cli = TestCli::try_parse_from(["brigade", "stress", "-n", "1"]).unwrap();
        match cli.command {
            TestCommands::Stress {
                config,
                max_cancel,
                trials,
                seed,
                csv,
            } => {
                assert_eq!(config.address_qubits, 1);
                assert_eq!(max_cancel, 4);
                assert_eq!(trials, 8);
                assert_eq!(seed, 42);
                assert!(csv.is_none());
            }
            _ => panic!("Expected Stress command"),
        }
    }

    // --- Diagram and trace ---

    #[test]
    fn test_parse_diagram_ascii() {
        let cli = TestCli::try_parse_from(["brigade", "diagram", "-n", "1", "--ascii"]).unwrap();
        match cli.command {
            TestCommands::Diagram { config, ascii } => {
                assert_eq!(config.address_qubits, 1);
                assert!(ascii);
            }
            _ => panic!("Expected Diagram command"),
        }
    }

    #[test]
    fn test_parse_trace() {
        let cli = TestCli::try_parse_from([
            "brigade",
            "trace",
            "--address",
            "3",
            "--memory",
            "9",
            "--no-bus",
            "--json",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Trace {
                address,
                memory,
                no_bus,
                target,
                json,
                ..
            } => {
                assert_eq!((address, memory), (3, 9));
                assert!(no_bus);
                assert!(!target);
                assert!(json);
            }
            _ => panic!("Expected Trace command"),
        }
    }

    #[test]
    fn test_parse_catalog_and_version() {
        assert!(matches!(
            TestCli::try_parse_from(["brigade", "catalog"]).unwrap().command,
            TestCommands::Catalog
        ));
        assert!(matches!(
            TestCli::try_parse_from(["brigade", "version"]).unwrap().command,
            TestCommands::Version
        ));
    }

    // --- Verbose flag ---

    #[test]
    fn test_parse_verbose_flag() {
        let cli = TestCli::try_parse_from(["brigade", "-v", "version"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_verbose_vvv() {
        let cli = TestCli::try_parse_from(["brigade", "catalog", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    // --- Error cases ---

    #[test]
    fn test_no_subcommand() {
        let result = TestCli::try_parse_from(["brigade"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        let result = TestCli::try_parse_from(["brigade", "foobar"]);
        assert!(result.is_err());
    }
}

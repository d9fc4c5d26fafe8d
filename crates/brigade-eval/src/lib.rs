//! Brigade Evaluator: experiment sweeps over QRAM constructions
//!
//! This crate runs a grid of bucket-brigade QRAM configurations through
//! construction, verification and T-gate stress testing, and collects the
//! outcomes into a report that can be exported as JSON or CSV.
//!
//! # Architecture
//!
//! ```text
//! [SweepConfig] -> configurations() -> Orchestrator
//!                                          |
//!                         QramBuilder -> Verifier -> StressSweep
//!                                          |
//!                                          v
//!                                     SweepReport -> JSON / CSV
//! ```
//!
//! # Example
//!
//! ```rust
//! use brigade_eval::{Orchestrator, SweepConfig, Verdict};
//!
//! let sweep = SweepConfig {
//!     qubit_counts: vec![1, 2],
//!     ..SweepConfig::default()
//! };
//! let report = Orchestrator::default().run(&sweep).unwrap();
//!
//! assert_eq!(report.summary.total, 2);
//! assert!(report.results.iter().all(|r| r.verdict == Verdict::Pass));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod report;
pub mod reproducibility;

pub use config::{ExperimentConfiguration, StressParameters, SweepConfig, VerdictMode};
pub use error::{EvalError, EvalResult};
pub use export::ExportConfig;
pub use orchestrator::Orchestrator;
pub use report::{ExperimentResult, SweepReport, SweepSummary, Verdict};
pub use reproducibility::ReproducibilityInfo;

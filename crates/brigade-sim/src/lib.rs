//! `brigade-sim`: functional verification of bucket-brigade QRAM circuits.
//!
//! Circuits built from Clifford+T gates and Toffolis map basis states to basis
//! states up to phase, so a sparse state vector keyed by `u128` basis indices
//! simulates them exactly for up to 128 qubits.
//!
//! - [`Verifier`] checks the ideal QRAM relation over every classical input
//!   (or a fixed sample of memory patterns for wide addresses) and over
//!   address superpositions, which expose relative-phase errors.
//! - [`StressInjector`] removes seeded subsets of T gates and
//!   [`StressSweep`] tracks how the failure rate grows with the cancel count.
//! - [`trace`] records the state support after every moment.
//!
//! # Quick start
//!
//! ```rust
//! use brigade_sim::{Verifier, VerifierConfig};
//! use brigade_synth::{BuildOptions, QramBuilder};
//!
//! let built = QramBuilder::default().build(&BuildOptions::default()).unwrap();
//! let report = Verifier::new(VerifierConfig::default())
//!     .verify(&built.circuit)
//!     .unwrap();
//!
//! assert!(report.passed());
//! assert_eq!(report.states_checked, 4 * 2 * 16 * 2);
//! ```

pub mod error;
pub mod layout;
pub mod state;
pub mod stress;
pub mod trace;
pub mod verifier;

pub use error::{SimError, SimResult};
pub use layout::{BasisInput, QramLayout};
pub use state::{MAX_QUBITS, SparseState, bitstring};
pub use stress::{MonotonicityViolation, StressCurve, StressInjector, StressPoint, StressSweep};
pub use trace::{SimulationTrace, TraceStep, trace};
pub use verifier::{
    CounterExample, ObservedAmplitude, Regime, StateOutcome, SuperpositionCheck,
    SuperpositionKind, VerificationReport, Verifier, VerifierConfig,
};

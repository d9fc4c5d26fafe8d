//! Brigade Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures shared by every stage of
//! the bucket-brigade QRAM analysis stack: the tree builder emits into it, the
//! gate-level expander schedules into it, and the simulator executes it.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Moment`]s over role-tagged qubits.
//! Operations inside one moment act on pairwise disjoint qubits; this is
//! checked on every insertion and reported as [`IrError::MomentConflict`].
//! Every [`Operation`] carries a [`Provenance`] naming the logical Toffoli
//! gadget and decomposition scheme it came from, so resource reports and
//! fault-injection can be traced back to the tree.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] plus a [`QubitRole`] (address, bus, routing,
//!   memory, target, ancilla)
//! - **Gates**: [`Gate`], the Clifford+T primitives and the logical Toffoli
//! - **Moments**: [`Moment`], one time-step of disjoint operations
//! - **Circuit**: [`Circuit`], with serial and as-soon-as-possible appending
//! - **Resources**: [`ResourceCounts`], T-count, T-depth, CNOT count and depth
//! - **Diagrams**: [`render`] for terminal output
//!
//! # Example
//!
//! ```rust
//! use brigade_ir::{Circuit, Moment, Operation, QubitRole, ResourceCounts};
//!
//! let mut circuit = Circuit::new("demo");
//! let c = circuit.add_register(QubitRole::Address, "a", 2);
//! let t = circuit.add_qubit(QubitRole::Target, "target");
//!
//! circuit.push_operation(Operation::h(t)).unwrap();
//! circuit
//!     .push_moment(Moment::from_operations([Operation::t(c[0]), Operation::t(c[1])]).unwrap())
//!     .unwrap();
//!
//! let counts = ResourceCounts::of(&circuit);
//! assert_eq!(counts.t_count, 2);
//! assert_eq!(counts.t_depth, 1);
//! assert_eq!(counts.depth, 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CCX` | 3 | Toffoli, only left whole by the `no-decomp` scheme |

pub mod circuit;
pub mod diagram;
pub mod error;
pub mod gate;
pub mod moment;
pub mod operation;
pub mod qubit;
pub mod resources;

pub use circuit::{Circuit, OpSite};
pub use diagram::{DiagramStyle, render};
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use moment::{Moment, invert_moments};
pub use operation::{GadgetId, Operation, Phase, Provenance};
pub use qubit::{Qubit, QubitId, QubitRole};
pub use resources::ResourceCounts;

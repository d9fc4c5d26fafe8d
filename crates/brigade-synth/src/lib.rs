//! Brigade QRAM Synthesis
//!
//! This crate turns an address width and a choice of Toffoli decompositions
//! into a gate-level bucket-brigade QRAM circuit.
//!
//! # Pipeline
//!
//! 1. [`QramTree`] lays out address, bus, routing, memory and target qubits
//!    and emits the logical query and data passes.
//! 2. [`build_mirror`] derives the uncompute pass with a [`MirrorStrategy`].
//! 3. [`Expander`] replaces every logical Toffoli with the moments of its
//!    [`DecompositionScheme`] from the [`Catalog`], either appended serially or
//!    packed into the earliest free moment, drawing scratch qubits from an
//!    [`AncillaPool`].
//! 4. Optionally, [`Peephole`] cancels and merges neighbouring gates until
//!    nothing changes.
//!
//! [`QramBuilder`] runs the whole pipeline for one [`BuildOptions`].
//!
//! # Example
//!
//! ```rust
//! use brigade_synth::{BuildOptions, DecompositionId, MirrorStrategy, QramBuilder};
//!
//! let options = BuildOptions {
//!     address_qubits: 2,
//!     query: DecompositionId::RelativePhaseTDepth4Cx3,
//!     mirror: DecompositionId::RelativePhaseTDepth4Cx4,
//!     strategy: MirrorStrategy::OutToIn,
//!     parallel: true,
//!     ..BuildOptions::default()
//! };
//! let built = QramBuilder::default().build(&options).unwrap();
//!
//! assert_eq!(built.gadgets.query, 3);
//! assert_eq!(built.gadgets.mirror, 3);
//! assert!(built.qubit_formula_holds());
//! ```
//!
//! # Mirror strategies
//!
//! | Strategy | Mirror gadget | Valid pairs |
//! |----------|---------------|-------------|
//! | `out-to-in` | inverse of the mirror scheme | any, phases cancel when both schemes carry the same relative phase |
//! | `in-to-out` | mirror scheme run forward | mirror scheme must undo the query scheme; compute-only schemes rejected |

pub mod ancilla;
pub mod builder;
pub mod catalog;
pub mod error;
pub mod expander;
pub mod mirror;
pub mod optimize;
pub mod tree;

pub use ancilla::AncillaPool;
pub use builder::{
    BuildOptions, BuiltQram, MAX_ADDRESS_QUBITS, PassGadgets, QramBuilder, expected_qubits,
};
pub use catalog::{Catalog, DecompositionId, DecompositionScheme, ExitState, ResourceProfile};
pub use error::{SynthError, SynthResult};
pub use expander::Expander;
pub use mirror::{MirrorStrategy, build_mirror, validate_mirror};
pub use optimize::{Peephole, PeepholeStats};
pub use tree::{Gadget, GadgetIds, LogicalOp, LogicalPass, QramTree, SiblingGroup};

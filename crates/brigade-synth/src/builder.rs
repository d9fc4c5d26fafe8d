//! End-to-end QRAM construction.

use brigade_ir::{Circuit, ResourceCounts};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, DecompositionId};
use crate::error::{SynthError, SynthResult};
use crate::expander::Expander;
use crate::mirror::{MirrorStrategy, build_mirror, validate_mirror};
use crate::optimize::{Peephole, PeepholeStats};
use crate::tree::{GadgetIds, QramTree};

/// Everything that determines one expanded circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Number of address qubits `n`.
    pub address_qubits: usize,
    /// Scheme for the query pass gadgets.
    pub query: DecompositionId,
    /// Scheme for the mirror pass gadgets.
    pub mirror: DecompositionId,
    /// Scheme for the memory-read gadgets.
    pub data: DecompositionId,
    /// How the mirror pass is derived.
    pub strategy: MirrorStrategy,
    /// Pack moments as soon as their qubits are free.
    pub parallel: bool,
    /// Maximum number of pool ancillas (`None` for unbounded).
    pub ancilla_budget: Option<usize>,
    /// Run the peephole optimizer on the expanded circuit.
    pub optimize: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            address_qubits: 2,
            query: DecompositionId::ZeroAncillaTDepth4,
            mirror: DecompositionId::ZeroAncillaTDepth4,
            data: DecompositionId::ZeroAncillaTDepth4,
            strategy: MirrorStrategy::OutToIn,
            parallel: false,
            ancilla_budget: None,
            optimize: false,
        }
    }
}

/// Gadget counts per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassGadgets {
    /// Query pass gadgets, `2^n - 1`.
    pub query: usize,
    /// Data pass gadgets, `2^n`.
    pub data: usize,
    /// Mirror pass gadgets, `2^n - 1`.
    pub mirror: usize,
}

impl PassGadgets {
    /// Sum over all passes.
    pub fn total(&self) -> usize {
        self.query + self.data + self.mirror
    }
}

/// Result of one build.
#[derive(Debug, Clone)]
pub struct BuiltQram {
    /// The options used.
    pub options: BuildOptions,
    /// The expanded circuit.
    pub circuit: Circuit,
    /// Registers of the tree, `None` for `n = 0`.
    pub tree: Option<QramTree>,
    /// Resource counts of `circuit`.
    pub resources: ResourceCounts,
    /// Gadget counts per pass.
    pub gadgets: PassGadgets,
    /// Sibling groups serialized because the ancilla pool ran out.
    pub serialized_groups: usize,
    /// Peephole statistics when `optimize` was set.
    pub optimization: Option<PeepholeStats>,
}

impl BuiltQram {
    /// Whether the qubit count equals `n + 2^(n+1) + 1` plus pool ancillas.
    pub fn qubit_formula_holds(&self) -> bool {
        self.circuit.num_qubits()
            == expected_qubits(self.options.address_qubits, self.resources.ancillas)
    }
}

/// Qubit count of an `n`-level build with `ancillas` pool qubits.
pub fn expected_qubits(n: usize, ancillas: usize) -> usize {
    if n == 0 {
        return ancillas;
    }
    n + (1 << (n + 1)) + 1 + ancillas
}

/// Widest address register accepted by [`QramBuilder::build`].
///
/// A tree of this width already holds `2^17 + 17` qubits.
pub const MAX_ADDRESS_QUBITS: usize = 16;

/// Builds bucket-brigade QRAM circuits from a decomposition catalog.
#[derive(Debug, Clone)]
pub struct QramBuilder {
    catalog: Catalog,
}

impl Default for QramBuilder {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

impl QramBuilder {
    /// Builder drawing schemes from `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog in use.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build and expand a fresh circuit.
    ///
    /// Address width, scheme and strategy compatibility are checked before
    /// any qubit is allocated. `n = 0` yields an empty circuit.
    pub fn build(&self, options: &BuildOptions) -> SynthResult<BuiltQram> {
        if options.address_qubits > MAX_ADDRESS_QUBITS {
            return Err(SynthError::AddressWidthTooLarge {
                n: options.address_qubits,
                max: MAX_ADDRESS_QUBITS,
            });
        }
        let query_scheme = self.catalog.lookup(options.query)?;
        let mirror_scheme = self.catalog.lookup(options.mirror)?;
        let data_scheme = self.catalog.lookup(options.data)?;
        validate_mirror(mirror_scheme, options.strategy)?;

        let n = options.address_qubits;
        let mut circuit = Circuit::new(format!("bucket-brigade-n{n}"));
        if n == 0 {
            return Ok(BuiltQram {
                options: options.clone(),
                resources: ResourceCounts::of(&circuit),
                circuit,
                tree: None,
                gadgets: PassGadgets::default(),
                serialized_groups: 0,
                optimization: None,
            });
        }

        let tree = QramTree::allocate(&mut circuit, n);
        let mut ids = GadgetIds::new();
        let query = tree.query_pass(query_scheme, &mut ids)?;
        let data = tree.data_pass(data_scheme, &mut ids)?;
        let mirror = build_mirror(&query, mirror_scheme, options.strategy, &mut ids)?;

        let mut expander = Expander::new(&self.catalog, options.parallel, options.ancilla_budget);
        for pass in [&query, &data, &mirror] {
            expander.expand(&mut circuit, pass)?;
        }
        let serialized_groups = expander.serialized_groups();

        let (circuit, optimization) = if options.optimize {
            let (optimized, stats) = Peephole::new().run(&circuit)?;
            (optimized, Some(stats))
        } else {
            (circuit, None)
        };

        let resources = ResourceCounts::of(&circuit);
        debug!(
            n,
            qubits = resources.qubits,
            depth = resources.depth,
            t_count = resources.t_count,
            t_depth = resources.t_depth,
            serialized_groups,
            "built circuit"
        );

        Ok(BuiltQram {
            options: options.clone(),
            circuit,
            tree: Some(tree),
            resources,
            gadgets: PassGadgets {
                query: query.gadget_count(),
                data: data.gadget_count(),
                mirror: mirror.gadget_count(),
            },
            serialized_groups,
            optimization,
        })
    }
}

//! Bucket-brigade register layout recovered from qubit roles.

use brigade_ir::{Circuit, QubitRole};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::state::MAX_QUBITS;

/// One classical input of a QRAM query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasisInput {
    /// Address value, `a0` most significant.
    pub address: u64,
    /// Bus value.
    pub bus: bool,
    /// Memory word, bit `x` is cell `m_x`.
    pub memory: u64,
    /// Target value.
    pub target: bool,
}

impl BasisInput {
    /// Value of memory cell `x`.
    pub fn cell(&self, x: u64) -> bool {
        (self.memory >> x) & 1 == 1
    }
}

/// Bit positions of every register of a bucket-brigade circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QramLayout {
    /// Total qubits in the circuit.
    pub num_qubits: usize,
    /// Address bits, most significant first.
    pub address: Vec<usize>,
    /// Bus qubit.
    pub bus: Option<usize>,
    /// Routing qubits.
    pub routing: Vec<usize>,
    /// Memory cells by leaf index.
    pub memory: Vec<usize>,
    /// Target qubit.
    pub target: Option<usize>,
    /// Pool ancillas.
    pub ancillas: Vec<usize>,
}

impl QramLayout {
    /// Recover the layout from the roles of `circuit`'s qubits.
    pub fn from_circuit(circuit: &Circuit) -> SimResult<Self> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                qubits: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let positions = |role: QubitRole| -> Vec<usize> {
            circuit
                .qubits_with_role(role)
                .into_iter()
                .map(|q| q.index())
                .collect()
        };
        let address = positions(QubitRole::Address);
        let bus = positions(QubitRole::Bus);
        let routing = positions(QubitRole::Routing);
        let memory = positions(QubitRole::Memory);
        let target = positions(QubitRole::Target);
        let ancillas = positions(QubitRole::Ancilla);

        let n = address.len();
        if n == 0 && num_qubits == ancillas.len() {
            return Ok(Self {
                num_qubits,
                ancillas,
                ..Self::default()
            });
        }
        if n > 6 {
            return Err(SimError::LayoutMismatch(format!(
                "{n} address qubits exceed a 64-cell memory word"
            )));
        }
        let leaves = 1usize << n;
        let checks = [
            ("bus", bus.len(), 1),
            ("target", target.len(), 1),
            ("routing", routing.len(), leaves - 1),
            ("memory", memory.len(), leaves),
        ];
        for (name, got, expected) in checks {
            if got != expected {
                return Err(SimError::LayoutMismatch(format!(
                    "expected {expected} {name} qubits for {n} address bits, found {got}"
                )));
            }
        }

        Ok(Self {
            num_qubits,
            address,
            bus: bus.first().copied(),
            routing,
            memory,
            target: target.first().copied(),
            ancillas,
        })
    }

    /// Number of address bits.
    pub fn address_bits(&self) -> usize {
        self.address.len()
    }

    /// Number of addressable cells, zero for an empty layout.
    pub fn cells(&self) -> u64 {
        if self.memory.is_empty() {
            0
        } else {
            1 << self.address_bits()
        }
    }

    /// True when the circuit has no QRAM registers at all.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Basis index of `input`, with routing and ancillas in |0⟩.
    pub fn encode(&self, input: &BasisInput) -> u128 {
        let mut basis = 0u128;
        let n = self.address_bits();
        for (l, &q) in self.address.iter().enumerate() {
            if (input.address >> (n - 1 - l)) & 1 == 1 {
                basis |= 1 << q;
            }
        }
        if let (Some(bus), true) = (self.bus, input.bus) {
            basis |= 1 << bus;
        }
        for (x, &q) in self.memory.iter().enumerate() {
            if input.cell(x as u64) {
                basis |= 1 << q;
            }
        }
        if let (Some(target), true) = (self.target, input.target) {
            basis |= 1 << target;
        }
        basis
    }

    /// The ideal QRAM image: `target ^= bus AND m[address]`.
    pub fn ideal(&self, input: &BasisInput) -> BasisInput {
        BasisInput {
            target: input.target ^ (input.bus && input.cell(input.address)),
            ..*input
        }
    }
}

//! Sparse state vector.

use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::FRAC_PI_4;

use brigade_ir::{Circuit, Gate, Moment, Operation};
use num_complex::Complex64;
use rustc_hash::FxHashMap;

use crate::error::{SimError, SimResult};

/// Largest qubit count whose basis states fit a `u128`.
pub const MAX_QUBITS: usize = 128;

/// Amplitudes below this magnitude are dropped after interfering gates.
const PRUNE_EPS: f64 = 1e-12;

/// A state stored as a map from basis index to non-zero amplitude.
///
/// Bit `i` of a basis index is the value of qubit `QubitId(i)`.
#[derive(Debug, Clone)]
pub struct SparseState {
    num_qubits: usize,
    amplitudes: FxHashMap<u128, Complex64>,
}

impl SparseState {
    /// The computational basis state `basis`.
    pub fn basis(num_qubits: usize, basis: u128) -> SimResult<Self> {
        check_width(num_qubits)?;
        let mut amplitudes = FxHashMap::default();
        amplitudes.insert(basis, Complex64::new(1.0, 0.0));
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// A state from explicit `(basis, amplitude)` pairs; duplicates add up.
    pub fn from_amplitudes(
        num_qubits: usize,
        terms: impl IntoIterator<Item = (u128, Complex64)>,
    ) -> SimResult<Self> {
        check_width(num_qubits)?;
        let mut amplitudes: FxHashMap<u128, Complex64> = FxHashMap::default();
        for (basis, amp) in terms {
            *amplitudes.entry(basis).or_default() += amp;
        }
        let mut state = Self {
            num_qubits,
            amplitudes,
        };
        state.prune();
        Ok(state)
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of stored amplitudes.
    pub fn support(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude of `basis`.
    pub fn amplitude(&self, basis: u128) -> Complex64 {
        self.amplitudes.get(&basis).copied().unwrap_or_default()
    }

    /// Stored `(basis, amplitude)` pairs sorted by decreasing magnitude.
    pub fn dominant(&self, limit: usize) -> Vec<(u128, Complex64)> {
        let mut terms: Vec<_> = self.amplitudes.iter().map(|(b, a)| (*b, *a)).collect();
        terms.sort_by(|x, y| {
            y.1.norm_sqr()
                .total_cmp(&x.1.norm_sqr())
                .then(x.0.cmp(&y.0))
        });
        terms.truncate(limit);
        terms
    }

    /// Squared norm.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.values().map(Complex64::norm_sqr).sum()
    }

    /// `<self|other>`.
    pub fn inner(&self, other: &SparseState) -> Complex64 {
        let (small, large, conj_small) = if self.support() <= other.support() {
            (self, other, true)
        } else {
            (other, self, false)
        };
        small
            .amplitudes
            .iter()
            .map(|(b, a)| {
                let c = large.amplitude(*b);
                if conj_small { a.conj() * c } else { c.conj() * a }
            })
            .sum()
    }

    /// `|<self|other>|^2`.
    pub fn fidelity(&self, other: &SparseState) -> f64 {
        self.inner(other).norm_sqr()
    }

    /// If the state is a single basis state, its index and amplitude.
    pub fn as_basis_state(&self) -> Option<(u128, Complex64)> {
        if self.amplitudes.len() == 1 {
            self.amplitudes.iter().next().map(|(b, a)| (*b, *a))
        } else {
            None
        }
    }

    // =========================================================================
    // Gate application
    // =========================================================================

    /// Apply every operation of `circuit` in moment order.
    pub fn run(&mut self, circuit: &Circuit) {
        for moment in circuit.moments() {
            self.apply_moment(moment);
        }
    }

    /// Apply one moment.
    pub fn apply_moment(&mut self, moment: &Moment) {
        for op in moment.operations() {
            self.apply(op);
        }
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: &Operation) {
        let q = |i: usize| op.qubits[i].index();
        match op.gate {
            Gate::H => self.apply_h(q(0)),
            Gate::S => self.apply_phase(q(0), Complex64::new(0.0, 1.0)),
            Gate::Sdg => self.apply_phase(q(0), Complex64::new(0.0, -1.0)),
            Gate::T => self.apply_phase(q(0), Complex64::from_polar(1.0, FRAC_PI_4)),
            Gate::Tdg => self.apply_phase(q(0), Complex64::from_polar(1.0, -FRAC_PI_4)),
            Gate::CX => {
                let (c, t) = (bit(q(0)), bit(q(1)));
                self.permute(|b| if b & c != 0 { b ^ t } else { b });
            }
            Gate::CCX => {
                let controls = bit(q(0)) | bit(q(1));
                let t = bit(q(2));
                self.permute(|b| if b & controls == controls { b ^ t } else { b });
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = bit(qubit);
        let mut next: FxHashMap<u128, Complex64> = FxHashMap::default();
        next.reserve(self.amplitudes.len() * 2);
        for (b, a) in self.amplitudes.drain() {
            let a = a * FRAC_1_SQRT_2;
            let sign = if b & mask == 0 { 1.0 } else { -1.0 };
            *next.entry(b & !mask).or_default() += a;
            *next.entry(b | mask).or_default() += a * sign;
        }
        self.amplitudes = next;
        self.prune();
    }

    fn apply_phase(&mut self, qubit: usize, phase: Complex64) {
        let mask = bit(qubit);
        for (b, a) in &mut self.amplitudes {
            if b & mask != 0 {
                *a *= phase;
            }
        }
    }

    fn permute(&mut self, f: impl Fn(u128) -> u128) {
        let old = std::mem::take(&mut self.amplitudes);
        self.amplitudes = old.into_iter().map(|(b, a)| (f(b), a)).collect();
    }

    fn prune(&mut self) {
        self.amplitudes.retain(|_, a| a.norm() > PRUNE_EPS);
    }
}

#[inline]
fn bit(qubit: usize) -> u128 {
    1u128 << qubit
}

fn check_width(num_qubits: usize) -> SimResult<()> {
    if num_qubits > MAX_QUBITS {
        return Err(SimError::TooManyQubits {
            qubits: num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

/// Render `basis` as one character per qubit, qubit 0 first.
pub fn bitstring(basis: u128, num_qubits: usize) -> String {
    (0..num_qubits)
        .map(|i| if basis & bit(i) != 0 { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_ir::QubitId;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_hadamard_twice_is_identity() {
        let mut state = SparseState::basis(2, 0b10).unwrap();
        state.apply(&Operation::h(QubitId(1)));
        assert_eq!(state.support(), 2);
        assert!(approx_eq(state.amplitude(0b00), Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(state.amplitude(0b10), Complex64::new(-FRAC_1_SQRT_2, 0.0)));
        state.apply(&Operation::h(QubitId(1)));
        let (b, a) = state.as_basis_state().unwrap();
        assert_eq!(b, 0b10);
        assert!(approx_eq(a, Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_t_squared_is_s() {
        let mut a = SparseState::basis(1, 1).unwrap();
        a.apply(&Operation::t(QubitId(0)));
        a.apply(&Operation::t(QubitId(0)));
        assert!(approx_eq(a.amplitude(1), Complex64::new(0.0, 1.0)));
        a.apply(&Operation::new(Gate::Sdg, vec![QubitId(0)]).unwrap());
        assert!(approx_eq(a.amplitude(1), Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_toffoli_truth_table() {
        let ccx = Operation::ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        for input in 0u128..8 {
            let mut state = SparseState::basis(3, input).unwrap();
            state.apply(&ccx);
            let expected = if input & 0b011 == 0b011 { input ^ 0b100 } else { input };
            assert_eq!(state.as_basis_state().unwrap().0, expected);
        }
    }

    #[test]
    fn test_fidelity_ignores_global_phase() {
        let a = SparseState::from_amplitudes(
            2,
            [
                (0, Complex64::new(FRAC_1_SQRT_2, 0.0)),
                (3, Complex64::new(FRAC_1_SQRT_2, 0.0)),
            ],
        )
        .unwrap();
        let i = Complex64::new(0.0, 1.0);
        let b = SparseState::from_amplitudes(
            2,
            [(0, i * FRAC_1_SQRT_2), (3, i * FRAC_1_SQRT_2)],
        )
        .unwrap();
        assert!((a.fidelity(&b) - 1.0).abs() < 1e-12);
        assert!((a.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_width_limit() {
        assert!(SparseState::basis(128, 1u128 << 127).is_ok());
        assert!(matches!(
            SparseState::basis(129, 0),
            Err(SimError::TooManyQubits { qubits: 129, .. })
        ));
    }

    #[test]
    fn test_bitstring() {
        assert_eq!(bitstring(0b0110, 4), "0110");
        assert_eq!(bitstring(0b0001, 4), "1000");
    }
}

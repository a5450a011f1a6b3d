//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;

use qpick_ir::{Circuit, Instruction, InstructionKind, StandardGate};

/// Amplitudes of an `n`-qubit state, indexed with qubit `i` as bit `i`.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Callers bound `num_qubits` by [`crate::MAX_QUBITS`]; the state holds
    /// `2^num_qubits` amplitudes.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements are deferred: they are read out by [`Self::sample`]
    /// after every gate has been applied.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                for qubit in &instruction.qubits {
                    self.apply_gate(*gate, qubit.0 as usize);
                }
            }
            InstructionKind::Measure => {}
        }
    }

    fn apply_gate(&mut self, gate: StandardGate, qubit: usize) {
        match gate {
            StandardGate::X => self.apply_x(qubit),
            StandardGate::Z => self.apply_z(qubit),
            StandardGate::H => self.apply_h(qubit),
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    /// Probability of each basis state.
    #[cfg(test)]
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Draw one basis state.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the total just under 1.0.
        self.amplitudes.len() - 1
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }
}

/// Render a sampled basis state as the circuit's classical register.
///
/// Each measured qubit writes its bit into its target clbit. The string
/// lists the highest clbit first, so clbit 0 is the rightmost character.
/// A circuit without classical bits reports every qubit the same way.
pub fn register_bitstring(circuit: &Circuit, outcome: usize) -> String {
    let qubit_bit = |q: usize| (outcome >> q) & 1 == 1;

    if circuit.num_clbits() == 0 {
        return (0..circuit.num_qubits())
            .rev()
            .map(|q| if qubit_bit(q) { '1' } else { '0' })
            .collect();
    }

    let mut register = vec![false; circuit.num_clbits()];
    for inst in circuit.instructions().iter().filter(|i| i.is_measure()) {
        for (qubit, clbit) in inst.qubits.iter().zip(&inst.clbits) {
            if let Some(slot) = register.get_mut(clbit.0 as usize) {
                *slot = qubit_bit(qubit.0 as usize);
            }
        }
    }

    register
        .iter()
        .rev()
        .map(|&bit| if bit { '1' } else { '0' })
        .collect()
}

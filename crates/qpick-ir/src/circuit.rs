//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// Qubits and classical bits are numbered densely from zero. Instructions
/// are stored in program order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Z, qubit)
    }

    /// Apply a standard gate.
    pub fn gate(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, Some(gate.name()))?;
        self.instructions
            .push(Instruction::single_qubit_gate(gate, qubit));
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, None)?;
        self.check_clbit(clbit)?;
        self.instructions.push(Instruction::measure(qubit, clbit));
        Ok(self)
    }

    fn check_qubit(&self, qubit: QubitId, gate_name: Option<&str>) -> IrResult<()> {
        if qubit.0 < self.num_qubits {
            Ok(())
        } else {
            Err(IrError::QubitNotFound {
                qubit,
                gate_name: gate_name.map(str::to_string),
            })
        }
    }

    fn check_clbit(&self, clbit: ClbitId) -> IrResult<()> {
        if clbit.0 < self.num_clbits {
            Ok(())
        } else {
            Err(IrError::ClbitNotFound { clbit })
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a uniform superposition circuit over `width` qubits.
    ///
    /// Every qubit gets a Hadamard and is measured into the classical bit of
    /// the same index, so one shot yields `width` independent fair bits.
    pub fn superposition(width: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size(format!("superposition_{width}"), width, width);
        for i in 0..width {
            circuit.h(QubitId(i))?;
        }
        for i in 0..width {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_unknown_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        let err = circuit.h(QubitId(1)).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitNotFound { qubit: QubitId(1), gate_name: Some(ref g) } if g == "h"
        ));
    }

    #[test]
    fn test_unknown_clbit_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = circuit.measure(QubitId(0), ClbitId(0)).unwrap_err();
        assert!(matches!(err, IrError::ClbitNotFound { clbit: ClbitId(0) }));
    }

    #[test]
    fn test_superposition() {
        let circuit = Circuit::superposition(6).unwrap();
        assert_eq!(circuit.name(), "superposition_6");
        assert_eq!(circuit.num_qubits(), 6);
        assert_eq!(circuit.num_clbits(), 6);
        assert_eq!(circuit.instructions().len(), 12);
        assert!(
            circuit.instructions()[..6]
                .iter()
                .all(|inst| inst.as_gate() == Some(StandardGate::H))
        );
        // Qubit i is read into bit i
        for (i, inst) in circuit.instructions()[6..].iter().enumerate() {
            assert!(inst.is_measure());
            assert_eq!(inst.qubits, vec![QubitId(i as u32)]);
            assert_eq!(inst.clbits, vec![ClbitId(i as u32)]);
        }
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .measure(QubitId(1), ClbitId(0))
            .unwrap();

        assert_eq!(circuit.instructions().len(), 3);
        assert_eq!(circuit.instructions()[1].as_gate(), Some(StandardGate::X));
    }

    #[test]
    fn test_serde_roundtrip_preserves_instructions() {
        let circuit = Circuit::superposition(2).unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }
}

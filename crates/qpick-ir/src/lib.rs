//! qpick Circuit Representation
//!
//! A deliberately small circuit model: enough to describe the fixed-width
//! superposition circuits qpick sends to a backend, and to serialize them as
//! OpenQASM 3.0 for cloud providers.
//!
//! Instructions are kept in program order. Every operand is checked against
//! the circuit's declared qubits and classical bits when the instruction is
//! appended, so a [`Circuit`] is always well formed.
//!
//! # Example
//!
//! ```rust
//! use qpick_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("coin", 1, 1);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 1);
//! assert_eq!(circuit.instructions().len(), 2);
//!
//! let qasm = qpick_ir::qasm::emit(&circuit);
//! assert!(qasm.contains("h q[0];"));
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qasm;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};

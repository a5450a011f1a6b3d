//! qpick Local Statevector Simulator
//!
//! A small exact simulator for the single-qubit gates the selection circuits
//! use (`x`, `z`, `h`). It stands in for quantum hardware during
//! development and in tests, where a fixed seed makes every sample
//! reproducible.
//!
//! | Qubits | Memory  |
//! |--------|---------|
//! | 10     | ~16 KB  |
//! | 16     | ~1 MB   |
//! | 20     | ~16 MB  |
//! | 26     | ~1 GB   |
//!
//! Registers wider than [`MAX_QUBITS`] are rejected rather than allocated.
//!
//! # Example
//!
//! ```ignore
//! use qpick_adapter_sim::SimulatorBackend;
//! use qpick_hal::Backend;
//! use qpick_ir::Circuit;
//!
//! let backend = SimulatorBackend::with_seed(7);
//! let circuit = Circuit::superposition(6)?;
//! let job_id = backend.submit(&circuit, 1).await?;
//! let result = backend.wait(&job_id).await?;
//! println!("{:?}", result.counts.single_outcome());
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, MAX_QUBITS, SimulatorBackend};

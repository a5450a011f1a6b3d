//! qpick Hardware Abstraction Layer
//!
//! A unified interface over the backends qpick draws randomness from: the
//! local simulator and cloud quantum services.
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] to describe hardware size and gate support
//! - Environment-based credentials via [`env_secret`]
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Supported Backends
//!
//! | Backend | Crate | Authentication |
//! |---------|-------|----------------|
//! | Local Simulator | `qpick-adapter-sim` | None |
//! | IBM Quantum | `qpick-adapter-ibm` | `IBM_API_KEY` + `IBM_SERVICE_CRN`, or `IBM_QUANTUM_TOKEN` |
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qpick_hal::Backend;
//! use qpick_adapter_sim::SimulatorBackend;
//! use qpick_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = Circuit::superposition(3)?;
//!     let backend = SimulatorBackend::new();
//!
//!     let job_id = backend.submit(&circuit, 1).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     if let Some(bitstring) = result.counts.single_outcome() {
//!         println!("Sampled: {bitstring}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use auth::env_secret;
pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{JobId, JobStatus};
pub use result::{Counts, ExecutionResult};

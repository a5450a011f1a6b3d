//! IBM Quantum backend for qpick.
//!
//! Runs circuits on IBM Quantum hardware through the Qiskit Runtime Sampler
//! primitive. Two authentication modes are supported, both read from the
//! environment:
//!
//! - IBM Cloud: `IBM_API_KEY` and `IBM_SERVICE_CRN`. The key is exchanged for
//!   an IAM bearer token at connect time.
//! - Legacy: `IBM_QUANTUM_TOKEN`, sent as a bearer token to the legacy
//!   endpoint.
//!
//! ```ignore
//! use qpick_adapter_ibm::IbmBackend;
//!
//! // Least busy operational device with at least 6 qubits.
//! let backend = IbmBackend::connect_least_busy(6).await?;
//! println!("running on {}", backend.target());
//! ```

pub mod api;
mod backend;
mod credentials;
mod error;

pub use api::{BackendInfo, BackendStatus, IbmClient, pick_least_busy};
pub use backend::{DEFAULT_BACKEND, DEFAULT_OPTIMIZATION_LEVEL, IbmBackend};
pub use credentials::{API_KEY_VAR, IbmCredentials, LEGACY_TOKEN_VAR, SERVICE_CRN_VAR};
pub use error::{IbmError, IbmResult};

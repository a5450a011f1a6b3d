//! Random selection from a list using quantum measurement.
//!
//! For a collection of `n` items the selector asks a [`RandomnessOracle`]
//! for one `k`-bit string, where `k = max(1, ceil(log2 n))`, reads it as a
//! big-endian unsigned integer and reduces it modulo `n`.
//!
//! # Bias
//!
//! When `n` is not a power of two, `2^k` raw values do not divide evenly
//! among `n` indices and the first `2^k mod n` indices are favoured. With
//! three items, index 0 is chosen half the time. [`BiasProfile`] reports
//! the exact weights.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use qpick_select::{BackendOracle, RandomIndexSelector};
//! use qpick_adapter_sim::SimulatorBackend;
//!
//! let oracle = BackendOracle::new(Arc::new(SimulatorBackend::new()));
//! let selector = RandomIndexSelector::new(oracle);
//!
//! let selection = selector.select(&["red", "green", "blue"]).await?;
//! println!("{} ({} -> {})", selection.item, selection.sample, selection.index);
//! ```

pub mod catalog;
pub mod error;
pub mod oracle;
pub mod sample;
pub mod selector;
pub mod width;

pub use error::{SelectError, SelectResult};
pub use oracle::{BackendOracle, RandomnessOracle};
pub use sample::{RawSample, pick, reduce};
pub use selector::{RandomIndexSelector, Selection};
pub use width::{BiasProfile, BitWidth, selection_weights};

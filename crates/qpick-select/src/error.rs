//! Error types for selection.

use qpick_hal::HalError;
use thiserror::Error;

/// Why a selection failed.
///
/// The three kinds are kept apart so callers can tell a bad call from an
/// unreachable oracle from an oracle that answered with garbage.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The call itself was invalid (e.g. empty collection). No oracle request was made.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The oracle could not be reached: connectivity, credentials, no eligible
    /// backend, or a job that never produced a result.
    #[error("Randomness oracle unavailable: {0}")]
    OracleUnavailable(#[source] HalError),

    /// The oracle answered, but not with a bitstring of the requested width.
    #[error("Oracle protocol error: {0}")]
    ProtocolError(String),
}

impl SelectError {
    /// Shorthand for an empty or otherwise unusable collection.
    pub(crate) fn empty_collection() -> Self {
        SelectError::InvalidArgument("empty collection".into())
    }
}

impl From<HalError> for SelectError {
    fn from(e: HalError) -> Self {
        match e {
            HalError::Serialization(err) => {
                SelectError::ProtocolError(format!("undecodable oracle response: {err}"))
            }
            other => SelectError::OracleUnavailable(other),
        }
    }
}

/// Result type for selection.
pub type SelectResult<T> = Result<T, SelectError>;

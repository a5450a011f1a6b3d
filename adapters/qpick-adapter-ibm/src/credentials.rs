//! Credential discovery.

use std::fmt;

use qpick_hal::env_secret;

use crate::error::{IbmError, IbmResult};

/// IBM Cloud API key variable.
pub const API_KEY_VAR: &str = "IBM_API_KEY";
/// IBM Cloud service instance CRN variable.
pub const SERVICE_CRN_VAR: &str = "IBM_SERVICE_CRN";
/// Legacy IBM Quantum token variable.
pub const LEGACY_TOKEN_VAR: &str = "IBM_QUANTUM_TOKEN";

/// How to authenticate against IBM Quantum.
#[derive(Clone, PartialEq, Eq)]
pub enum IbmCredentials {
    /// IBM Cloud API key plus the service instance it belongs to.
    Cloud {
        /// API key, exchanged for an IAM token.
        api_key: String,
        /// Service-CRN header value.
        service_crn: String,
    },
    /// Bearer token for the legacy endpoint.
    Legacy {
        /// API token.
        token: String,
    },
}

impl IbmCredentials {
    /// Discover credentials from the process environment.
    ///
    /// `IBM_API_KEY` takes precedence and then requires `IBM_SERVICE_CRN`.
    /// Otherwise `IBM_QUANTUM_TOKEN` is used.
    pub fn from_env() -> IbmResult<Self> {
        Self::from_lookup(
            env_secret(API_KEY_VAR),
            env_secret(SERVICE_CRN_VAR),
            env_secret(LEGACY_TOKEN_VAR),
        )
    }

    fn from_lookup(
        api_key: Option<String>,
        service_crn: Option<String>,
        legacy_token: Option<String>,
    ) -> IbmResult<Self> {
        match (api_key, legacy_token) {
            (Some(api_key), _) => {
                let service_crn = service_crn.ok_or(IbmError::MissingServiceCrn)?;
                Ok(Self::Cloud {
                    api_key,
                    service_crn,
                })
            }
            (None, Some(token)) => Ok(Self::Legacy { token }),
            (None, None) => Err(IbmError::MissingToken),
        }
    }

    /// Whether any credentials are configured, without validating them.
    pub fn available() -> bool {
        env_secret(API_KEY_VAR).is_some() || env_secret(LEGACY_TOKEN_VAR).is_some()
    }
}

impl fmt::Debug for IbmCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloud { service_crn, .. } => f
                .debug_struct("Cloud")
                .field("api_key", &"[REDACTED]")
                .field("service_crn", service_crn)
                .finish(),
            Self::Legacy { .. } => f
                .debug_struct("Legacy")
                .field("token", &"[REDACTED]")
                .finish(),
        }
    }
}

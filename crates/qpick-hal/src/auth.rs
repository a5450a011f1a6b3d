//! Credentials read from the process environment.
//!
//! Secrets are injected at the process boundary and never compiled in.

/// Value of the environment variable `var`.
///
/// Unset, non-unicode and blank values all read as `None`, so an exported
/// but empty variable never reaches a provider as a credential.
pub fn env_secret(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

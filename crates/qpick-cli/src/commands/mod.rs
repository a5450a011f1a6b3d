//! CLI command implementations.

pub mod backends;
pub mod common;
pub mod pick;
pub mod version;
pub mod width;

//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qpick_adapter_sim::SimulatorBackend;
use qpick_hal::Backend;
use qpick_select::catalog::ANIMALS;

#[cfg(feature = "ibm")]
use qpick_adapter_ibm::IbmBackend;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Table,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Items from the command line, else from `file`, else the animal catalog.
///
/// File items are one per line, trimmed, with blank lines skipped. A file
/// with no items yields an empty list.
pub fn load_items(args: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args.to_vec());
    }

    if let Some(path) = file {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        return Ok(source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect());
    }

    Ok(ANIMALS.iter().map(|s| (*s).to_string()).collect())
}

/// Create the named backend.
///
/// `min_qubits` is used for least-busy discovery when no device is named.
pub async fn connect_backend(
    name: &str,
    device: Option<&str>,
    seed: Option<u64>,
    min_qubits: u32,
) -> Result<Arc<dyn Backend>> {
    match name.to_lowercase().as_str() {
        "simulator" | "sim" => {
            if let Some(device) = device {
                tracing::warn!("ignoring device {device:?}: the simulator has no devices");
            }
            let sim = seed.map_or_else(SimulatorBackend::new, SimulatorBackend::with_seed);
            Ok(Arc::new(sim))
        }
        #[cfg(feature = "ibm")]
        "ibm" => {
            if seed.is_some() {
                tracing::warn!("--seed only applies to the simulator");
            }
            let connected = match device {
                Some(device) => IbmBackend::connect(device).await,
                None => IbmBackend::connect_least_busy(min_qubits as usize).await,
            };
            match connected {
                Ok(b) => Ok(Arc::new(b)),
                Err(e) => {
                    let err = qpick_select::SelectError::from(qpick_hal::HalError::from(e));
                    Err(anyhow::Error::new(err).context("Failed to connect to IBM Quantum"))
                }
            }
        }
        #[cfg(not(feature = "ibm"))]
        "ibm" => {
            let _ = (device, seed, min_qubits);
            anyhow::bail!("IBM backend not available. Rebuild with --features ibm");
        }
        other => {
            anyhow::bail!("Unknown backend: '{other}'. Available: simulator, ibm");
        }
    }
}

/// Spinner on stderr while waiting for a backend.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Print a labelled value in the result block.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<20} {}", style(format!("{label}:")).dim(), value);
}

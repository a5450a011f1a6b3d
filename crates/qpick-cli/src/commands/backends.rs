//! Backends command implementation.

use anyhow::Result;
use console::style;

use qpick_adapter_sim::SimulatorBackend;
use qpick_hal::Backend;
use qpick_select::BitWidth;

#[cfg(feature = "ibm")]
use qpick_adapter_ibm::{IbmClient, IbmCredentials, pick_least_busy};

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    println!("{} Available backends:\n", style("qpick").cyan().bold());

    let sim = SimulatorBackend::new();
    let caps = sim.capabilities();
    let available = sim.availability().await?.is_available;

    println!(
        "  {} {} {}",
        if available {
            style("●").green()
        } else {
            style("○").red()
        },
        style("simulator").bold(),
        if caps.is_simulator { "(local)" } else { "" }
    );
    println!("    Qubits: {}", caps.num_qubits);
    println!("    Largest list: {}", largest_list(caps.num_qubits));
    println!("    Gates: {}", caps.gate_set.native.join(", "));
    println!();

    #[cfg(feature = "ibm")]
    list_ibm().await;

    #[cfg(not(feature = "ibm"))]
    {
        println!(
            "  {} {} (not compiled)",
            style("○").dim(),
            style("ibm").dim()
        );
        println!("    Rebuild with --features ibm to enable");
        println!();
    }

    Ok(())
}

/// Largest list a backend with `qubits` qubits can draw from in one sample.
fn largest_list(qubits: u32) -> String {
    match BitWidth::new(qubits) {
        Ok(width) => match usize::try_from(width.range()) {
            Ok(n) => n.to_string(),
            Err(_) => format!("{}", usize::MAX),
        },
        Err(_) => "-".to_string(),
    }
}

#[cfg(feature = "ibm")]
async fn list_ibm() {
    let credentials = match IbmCredentials::from_env() {
        Ok(c) => c,
        Err(_) => {
            println!(
                "  {} {} (not configured)",
                style("○").dim(),
                style("ibm").dim()
            );
            println!(
                "    Set {} and {} (or {}) to enable",
                qpick_adapter_ibm::API_KEY_VAR,
                qpick_adapter_ibm::SERVICE_CRN_VAR,
                qpick_adapter_ibm::LEGACY_TOKEN_VAR
            );
            println!();
            return;
        }
    };

    let devices = match IbmClient::from_credentials(&credentials).await {
        Ok(client) => client.list_backends().await,
        Err(e) => Err(e),
    };

    let devices = match devices {
        Ok(d) => d,
        Err(e) => {
            println!("  {} {} ({})", style("○").yellow(), style("ibm").bold(), e);
            println!();
            return;
        }
    };

    let least_busy = pick_least_busy(&devices, 1).map(|d| d.name.clone());

    println!("  {} {}", style("●").green(), style("ibm").bold());
    for device in devices.iter().filter(|d| !d.simulator) {
        let marker = if least_busy.as_deref() == Some(device.name.as_str()) {
            style(" (least busy)").green().to_string()
        } else {
            String::new()
        };
        let queue = device
            .status
            .pending_jobs
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        println!(
            "    {} {:<16} {:>4} qubits  queue {:>4}{}",
            if device.status.operational {
                style("●").green()
            } else {
                style("○").red()
            },
            device.name,
            device.num_qubits,
            queue,
            marker
        );
    }
    println!();
}

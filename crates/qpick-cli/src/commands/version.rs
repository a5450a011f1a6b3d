//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum-random selection from a list",
        style("qpick").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpick-ir      Circuit representation and OpenQASM 3 output");
    println!("  qpick-hal     Hardware abstraction layer");
    println!("  qpick-select  Bit sizing, sampling and reduction");
    println!("  qpick-cli     Command-line interface");
    println!();
    println!(
        "Backends: simulator{}",
        if cfg!(feature = "ibm") { ", ibm" } else { "" }
    );
    println!("License:  {}", style("Apache-2.0").dim());
}

//! Width command implementation.

use anyhow::Result;
use console::style;

use qpick_select::BiasProfile;

use super::common::{OutputFormat, print_field};

/// Execute the width command.
pub fn execute(len: usize, format: OutputFormat) -> Result<()> {
    let profile = BiasProfile::for_len(len)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{} {} items\n", style("→").cyan().bold(), len);
    print_field("Bits per sample", profile.width.bits());
    print_field("Raw outcomes", profile.width.range());
    print_field(
        "Uniform",
        if profile.is_uniform() {
            style("yes").green()
        } else {
            style("no").yellow()
        },
    );
    println!();

    // Indices come in at most two weight classes.
    let light = profile.len - profile.heavy;
    println!("  {:<16} {:>10} {:>12}", "indices", "raw values", "probability");
    if profile.heavy > 0 {
        print_row(0, profile.heavy, &profile);
    }
    if light > 0 {
        print_row(profile.heavy, profile.len, &profile);
    }

    if !profile.is_uniform() {
        println!(
            "\n  Most likely index is {:.2}x as likely as the least likely.",
            profile.max_ratio()
        );
    }

    Ok(())
}

fn print_row(start: usize, end: usize, profile: &BiasProfile) {
    let range = if end - start == 1 {
        start.to_string()
    } else {
        format!("{start}..={}", end - 1)
    };
    println!(
        "  {:<16} {:>10} {:>12.6}",
        range,
        profile.weight(start),
        profile.probability(start)
    );
}

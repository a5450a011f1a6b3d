//! qpick Command-Line Interface
//!
//! Picks one item from a list using bits measured on a quantum backend.
//!
//! ```text
//! $ qpick pick red green blue --seed 7
//! $ qpick pick -f names.txt -b ibm
//! $ qpick width 100
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::OutputFormat;
use commands::{backends, pick, version, width};

/// qpick - quantum-random selection from a list
#[derive(Parser)]
#[command(name = "qpick")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick one item at random
    Pick {
        /// Items to choose from (defaults to the built-in animal list)
        items: Vec<String>,

        /// Read items from a file, one per line
        #[arg(short, long, conflicts_with = "items")]
        file: Option<PathBuf>,

        /// Backend to draw bits from (simulator, ibm)
        #[arg(short, long, env = "QPICK_BACKEND", default_value = "simulator")]
        backend: String,

        /// Device to run on; the least busy device is used when omitted
        #[arg(long, env = "QPICK_DEVICE")]
        device: Option<String>,

        /// Seed for the simulator
        #[arg(long)]
        seed: Option<u64>,

        /// Give up waiting for the backend after this many seconds
        #[arg(long, default_value = "300")]
        timeout: u64,

        /// Output format (table, json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the bit width and selection bias for a list length
    Width {
        /// Number of items
        len: usize,

        /// Output format (table, json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Pick {
            items,
            file,
            backend,
            device,
            seed,
            timeout,
            format,
        } => {
            pick::execute(pick::PickOptions {
                items,
                file,
                backend,
                device,
                seed,
                timeout_secs: timeout,
                format,
            })
            .await
        }

        Commands::Width { len, format } => width::execute(len, format),

        Commands::Backends => backends::execute().await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

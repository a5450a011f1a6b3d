//! Pick command implementation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use console::style;
use serde::Serialize;

use qpick_select::{BackendOracle, BiasProfile, BitWidth, RandomIndexSelector, Selection};

use super::common::{OutputFormat, connect_backend, load_items, print_field, spinner};

/// Options for one pick.
pub struct PickOptions {
    pub items: Vec<String>,
    pub file: Option<PathBuf>,
    pub backend: String,
    pub device: Option<String>,
    pub seed: Option<u64>,
    pub timeout_secs: u64,
    pub format: OutputFormat,
}

/// What a pick reports.
#[derive(Debug, Serialize)]
struct PickRecord {
    item: String,
    binary: String,
    decimal: u64,
    index: usize,
    items: usize,
    backend: String,
}

impl From<Selection<String>> for PickRecord {
    fn from(s: Selection<String>) -> Self {
        Self {
            binary: s.sample.bits().to_string(),
            decimal: s.raw_index(),
            index: s.index,
            items: s.len,
            backend: s.oracle,
            item: s.item,
        }
    }
}

/// Execute the pick command.
pub async fn execute(opts: PickOptions) -> Result<()> {
    let items = load_items(&opts.items, opts.file.as_deref())?;

    // Reject an empty list before touching any backend.
    let width = BitWidth::for_len(items.len())?;

    if opts.format == OutputFormat::Table {
        println!(
            "{} Picking from {} items on {} ({})",
            style("→").cyan().bold(),
            items.len(),
            style(&opts.backend).yellow(),
            width
        );
    }

    let backend = connect_backend(
        &opts.backend,
        opts.device.as_deref(),
        opts.seed,
        width.bits(),
    )
    .await?;
    let oracle =
        BackendOracle::new(backend).with_timeout(Duration::from_secs(opts.timeout_secs));
    let selector = RandomIndexSelector::new(oracle);

    let progress = spinner(format!("Measuring {width} on {}...", selector.oracle().backend().name()));
    let selection = selector.select(&items).await;
    progress.finish_and_clear();

    let record = PickRecord::from(selection?.cloned());

    match opts.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Table => print_record(&record)?,
    }

    Ok(())
}

fn print_record(record: &PickRecord) -> Result<()> {
    let rule = "=".repeat(50);

    println!("{rule}");
    print_field("Binary measurement", style(&record.binary).cyan());
    print_field("Decimal value", record.decimal);
    print_field("Selected item", style(&record.item).green().bold());
    print_field("Index", format!("{} of {}", record.index, record.items));
    print_field("Quantum backend", style(&record.backend).yellow());
    println!("{rule}");

    let profile = BiasProfile::for_len(record.items)?;
    if !profile.is_uniform() {
        println!(
            "  {} {} items is not a power of two: the first {} are {:.2}x as likely as the rest",
            style("note:").dim(),
            record.items,
            profile.heavy,
            profile.max_ratio()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str], format: OutputFormat) -> PickOptions {
        PickOptions {
            items: items.iter().map(|s| s.to_string()).collect(),
            file: None,
            backend: "simulator".into(),
            device: None,
            seed: Some(5),
            timeout_secs: 10,
            format,
        }
    }

    #[tokio::test]
    async fn test_pick_on_simulator() {
        execute(opts(&["a", "b", "c"], OutputFormat::Json))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_file_fails_before_connecting() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut options = opts(&[], OutputFormat::Table);
        options.file = Some(file.path().to_path_buf());
        // An unknown backend would also fail; the empty list must be reported first.
        options.backend = "nonexistent".into();

        let err = execute(options).await.unwrap_err();
        assert!(err.to_string().contains("empty collection"));
    }

    #[test]
    fn test_record_from_selection() {
        let sample = qpick_select::RawSample::parse("101", BitWidth::new(3).unwrap()).unwrap();
        let selection = Selection {
            item: "f".to_string(),
            sample,
            index: 5,
            len: 6,
            oracle: "simulator".to_string(),
        };

        let record = PickRecord::from(selection);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["binary"], "101");
        assert_eq!(json["decimal"], 5);
        assert_eq!(json["item"], "f");
        assert_eq!(json["items"], 6);
        assert_eq!(json["backend"], "simulator");
    }
}

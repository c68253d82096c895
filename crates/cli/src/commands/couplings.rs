use std::fs;

use anyhow::{Context, Result};
use jarviz_core::model::MethodCoupling;
use jarviz_core::services::UsageCollector;
use tracing::info;

use crate::canonicalize_or_current;
use crate::commands::load_settings;

/// Feed recorded call-site edges through a collector and print the result.
///
/// `edges` is a JSON array of coupling records as a bytecode visitor emits
/// them, duplicates and all.
pub fn couplings_command(edges: &str, config: Option<&str>, json: bool) -> Result<()> {
    let settings = load_settings(config)?;
    let collector = UsageCollector::with_filter(&settings.coupling_filter)
        .context("Invalid coupling filter")?;

    let edges_path = canonicalize_or_current(edges)?;
    let raw = fs::read_to_string(&edges_path)
        .with_context(|| format!("Failed to read edges file: {}", edges_path.display()))?;
    let records: Vec<MethodCoupling> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse edges JSON: {}", edges_path.display()))?;

    let offered = records.len();
    let added = collector.collect_all(records);
    info!(offered, added, "couplings collected");

    let couplings = collector.method_couplings();
    if json {
        let serialized = serde_json::to_string_pretty(&couplings)
            .context("Failed to serialize couplings to JSON")?;
        println!("{}", serialized);
    } else {
        println!("Couplings ({}):", couplings.len());
        if couplings.is_empty() {
            println!("  (none)");
        }
        for coupling in couplings {
            println!("  - {}", coupling);
        }
    }

    Ok(())
}

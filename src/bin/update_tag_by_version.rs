use anyhow::Context;
use clap::Parser;
use tracing::info;

use sdk_catalog::config;
use sdk_catalog::fingerprint::{Swiftly, backfill};

/// Updates v1/tag-by-version.json from the build catalog
#[derive(Debug, Parser)]
#[command(name = "update-tag-by-version", version, about)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    Cli::parse();
    let _guard = sdk_catalog::log::init()?;

    let builds_dir = config::builds_dir();
    let table_path = config::tag_table_path();
    let manager = Swiftly::new(&config::toolchain_manager());

    let summary = backfill(&builds_dir, &table_path, &manager)
        .with_context(|| format!("Failed to update {}", table_path.display()))?;

    info!(
        "Recorded {} new tags ({} already known)",
        summary.recorded, summary.known
    );
    Ok(())
}

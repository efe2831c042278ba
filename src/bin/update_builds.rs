use anyhow::Context;
use clap::Parser;
use tracing::info;

use sdk_catalog::catalog::run_import;
use sdk_catalog::config;
use sdk_catalog::release::GitHubReleases;

/// Imports SwiftWasm releases into the build catalog (v1/builds/)
#[derive(Debug, Parser)]
#[command(name = "update-builds", version, about)]
struct Cli {
    /// The number of pages to retrieve
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = sdk_catalog::log::init()?;

    let repository = config::repository();
    let builds_dir = config::builds_dir();
    let source = GitHubReleases::new(&config::api_base_url(), &repository, config::github_token())
        .context("Failed to create GitHub client")?;

    info!("Importing {} page(s) of {} releases", cli.pages, repository);
    let summary = run_import(&source, cli.pages, &builds_dir)
        .await
        .with_context(|| format!("Failed to update {}", builds_dir.display()))?;

    info!(
        "Wrote {} entries ({} existing, {} without versions, {} unusable, {} without SDKs)",
        summary.written,
        summary.existing,
        summary.missing_versions,
        summary.invalid_versions,
        summary.empty
    );
    Ok(())
}

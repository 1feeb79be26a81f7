//! ccan-archiver main entry point
//!
//! Command-line interface for building the catalog archive.

use anyhow::Context;
use ccan_archiver::config::{load_config_with_hash, validate, Config};
use ccan_archiver::crawler::run_archive;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ccan-archiver: archive ccan.de and the Clonk-Center archive into one zip
///
/// Crawls both catalogs, downloads every linked file and stores it together
/// with its metadata, a README and a list of failed downloads.
#[derive(Parser, Debug)]
#[command(name = "ccan-archiver")]
#[command(version)]
#[command(about = "Archive ccan.de and the Clonk-Center archive", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults are used without one)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Path of the archive to write, overriding the configuration
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output) = cli.output {
        config.output.archive_path = output;
        validate(&config).context("invalid --output")?;
    }

    if cli.dry_run {
        print_plan(&config);
        return Ok(());
    }

    match run_archive(config).await {
        Ok(report) => {
            tracing::info!(
                "Finished downloading: {} items archived, {} failed",
                report.archived,
                report.failed
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Archiving failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ccan_archiver=info,warn"),
            1 => EnvFilter::new("ccan_archiver=debug,info"),
            2 => EnvFilter::new("ccan_archiver=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows the effective configuration
fn print_plan(config: &Config) {
    println!("=== ccan-archiver Dry Run ===\n");

    println!("HTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nListing crawl:");
    println!("  First page: {}", config.listing.url_template.replace("{page}", "0"));
    println!("  Link base: {}", config.listing.link_base);
    println!("  Retry delay: {}ms", config.listing.retry_delay_ms);
    println!(
        "  Abort after: {} consecutive failures",
        config.listing.max_consecutive_failures
    );

    println!("\nEnumerated crawl:");
    println!("  Detail pages: {}", config.enumerated.url_template);
    println!(
        "  IDs: {}..={} ({} pages)",
        config.enumerated.first_id,
        config.enumerated.last_id,
        config.enumerated.last_id - config.enumerated.first_id + 1
    );
    println!("  Delay between IDs: {}ms", config.enumerated.delay_ms);

    println!("\nOutput:");
    println!("  Archive: {}", config.output.archive_path);
    println!("  Channel capacity: {}", config.output.channel_capacity);

    println!("\n✓ Configuration is valid");
}

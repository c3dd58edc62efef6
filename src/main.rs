//! Thumbnail Resolver main entry point
//!
//! This is the command-line interface for the product thumbnail resolver.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use thumbnail_resolver::cache::{CacheStore, JsonCacheStore};
use thumbnail_resolver::catalog::product_urls;
use thumbnail_resolver::config::{load_config_or_default, validate, Config};
use thumbnail_resolver::output::{load_statistics, print_statistics, print_summary};
use thumbnail_resolver::resolver::{Coordinator, ResolveMode};
use tracing_subscriber::EnvFilter;

/// Thumbnail Resolver: preview images for the product catalog
///
/// Fetches every catalog page that has no cached thumbnail yet, extracts a
/// representative image URL, and writes the mapping to a JSON cache file.
#[derive(Parser, Debug)]
#[command(name = "thumbnail-resolver")]
#[command(version = "1.0.0")]
#[command(about = "Resolves preview images for catalog product pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Cache file to read and write (overrides the config file)
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// Re-fetch every URL, including cached ones
    #[arg(long)]
    refresh: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the configuration and which URLs would be fetched, then exit
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the cache file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(cache) = cli.cache {
        config.output.cache_path = cache;
        validate(&config).context("Invalid cache path")?;
    }
    match &cli.config {
        Some(path) => tracing::info!("Configuration loaded from: {}", path.display()),
        None => tracing::debug!("No config file given, using defaults"),
    }

    let mode = if cli.refresh {
        ResolveMode::Refresh
    } else {
        ResolveMode::from_env()
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config, mode);
    } else if cli.stats {
        handle_stats(&config);
    } else {
        handle_resolve(&config, mode).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("thumbnail_resolver=info,warn"),
            1 => EnvFilter::new("thumbnail_resolver=debug,info"),
            2 => EnvFilter::new("thumbnail_resolver=trace,debug"),
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

/// Handles the --dry-run mode: shows the configuration and the fetch plan
fn handle_dry_run(config: &Config, mode: ResolveMode) {
    println!("=== Thumbnail Resolver Dry Run ===\n");

    println!("Resolver Configuration:");
    println!("  Timeout: {}s", config.resolver.timeout_secs);
    println!("  Request delay: {}ms", config.resolver.request_delay_ms);
    println!("  Max redirects: {}", config.resolver.max_redirects);
    println!(
        "  Mode: {}",
        if mode.is_refresh() {
            "refresh"
        } else {
            "incremental"
        }
    );

    println!("\nRequest Headers:");
    println!("  User-Agent: {}", config.user_agent.user_agent);
    println!("  Accept: {}", config.user_agent.accept);
    println!("  Accept-Language: {}", config.user_agent.accept_language);

    println!("\nOutput:");
    println!("  Cache: {}", config.output.cache_path.display());

    let store = JsonCacheStore::new(&config.output.cache_path);
    let mapping = store.load();
    let urls = product_urls();

    println!("\nProducts ({}):", urls.len());
    let mut to_fetch = 0;
    for url in &urls {
        let cached = store.get(&mapping, url).is_some();
        if cached && !mode.is_refresh() {
            println!("  - [skip]  {}", url);
        } else {
            to_fetch += 1;
            println!("  - [fetch] {}", url);
        }
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would fetch {} of {} product pages",
        to_fetch,
        urls.len()
    );
}

/// Handles the --stats mode: shows statistics from the cache file
fn handle_stats(config: &Config) {
    println!("Cache: {}\n", config.output.cache_path.display());

    let mapping = JsonCacheStore::new(&config.output.cache_path).load();
    let urls = product_urls();

    let stats = load_statistics(&mapping, &urls);
    print_statistics(&stats, urls.len());
}

/// Handles the main resolve operation
async fn handle_resolve(config: &Config, mode: ResolveMode) -> anyhow::Result<()> {
    let urls = product_urls();

    let mut coordinator =
        Coordinator::from_config(config, mode).context("Failed to set up the resolver")?;

    let summary = match coordinator.run(&urls).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Resolver run failed: {}", e);
            return Err(e).context("Resolver run failed");
        }
    };

    print_summary(&summary, &config.output.cache_path);
    Ok(())
}

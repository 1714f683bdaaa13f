//! Hostbound main entry point
//!
//! Command-line interface for the bounded same-host link crawler.

use anyhow::Context;
use clap::Parser;
use hostbound::config::{load_config, validate, Config};
use hostbound::crawler::{build_http_client, Coordinator, HttpLinkExtractor};
use hostbound::output::print_report;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Hostbound: a bounded same-host link crawler
///
/// Starting from the seed URL, hostbound follows hyperlinks wave by wave
/// and lists every reachable page on the same host. Pages that fail with
/// transient network errors are retried a bounded number of times.
#[derive(Parser, Debug)]
#[command(name = "hostbound")]
#[command(version)]
#[command(about = "A bounded same-host link crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from (absolute http/https URL)
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of retry passes over transient failures (0 disables retries)
    #[arg(long, value_name = "N")]
    max_retries: Option<u32>,

    /// Maximum number of concurrent fetches per wave
    #[arg(long, value_name = "N")]
    workers: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and show what would run without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&cli.seed, &config);
        return Ok(());
    }

    handle_crawl(&cli.seed, config).await
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hostbound=info,warn"),
            1 => EnvFilter::new("hostbound=debug,info"),
            2 => EnvFilter::new("hostbound=trace,debug"),
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

/// Loads the configuration file (or defaults) and applies CLI overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_retries) = cli.max_retries {
        config.crawler.max_retries = max_retries;
    }
    if let Some(workers) = cli.workers {
        config.crawler.max_concurrent_fetches = workers;
    }

    // Overrides can push values out of range, so validate again.
    validate(&config).context("invalid configuration")?;

    Ok(config)
}

/// Handles --dry-run: shows the effective configuration without crawling
fn handle_dry_run(seed: &str, config: &Config) {
    println!("=== Hostbound Dry Run ===\n");

    println!("Seed URL: {}", seed);

    println!("\nCrawler:");
    println!("  Workers per wave: {}", config.crawler.max_concurrent_fetches);
    println!("  Retry passes:     {}", config.crawler.max_retries);
    println!("  Request timeout:  {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout:  {}s", config.crawler.connect_timeout_secs);
    println!("  User agent:       {}", config.crawler.user_agent);

    println!("\nDenied extensions ({}):", config.filter.denied_extensions.len());
    for ext in &config.filter.denied_extensions {
        println!("  - .{}", ext);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(seed: &str, config: Config) -> anyhow::Result<()> {
    let client = build_http_client(&config.crawler).context("failed to build HTTP client")?;
    let extractor = HttpLinkExtractor::new(client);
    let coordinator = Coordinator::new(config, extractor);

    // Ctrl-c stops dispatching new work; in-flight fetches drain normally.
    let shutdown = coordinator.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, finishing current wave");
            shutdown.store(true, Ordering::Relaxed);
        }
    });

    match coordinator.run(seed).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

//! Mention-Sweep main entry point
//!
//! Command-line interface for the forum mention scraper.

use clap::Parser;
use mention_sweep::config::{load_config, Config};
use mention_sweep::crawler::run_sweep;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mention-Sweep: a forum mention scraper
///
/// Crawls a forum search-results listing page by page, pulls each listed
/// thread's post text, and writes one CSV row per thread.
#[derive(Parser, Debug)]
#[command(name = "mention-sweep")]
#[command(version = "1.0.0")]
#[command(about = "A forum mention scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or fall back to the built-in deployment defaults
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let summary = run_sweep(config).await?;
    println!(
        "Scraping complete ({}): {} pages, {} records.",
        summary.reason, summary.pages, summary.records
    );

    if summary.reason.is_failure() {
        anyhow::bail!("run aborted: {}", summary.reason);
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
            0 => EnvFilter::new("mention_sweep=info,warn"),
            1 => EnvFilter::new("mention_sweep=debug,info"),
            2 => EnvFilter::new("mention_sweep=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Mention-Sweep Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed URL: {}", config.crawl.seed_url);
    println!("  Max pages: {}", config.crawl.max_pages);
    println!("  Max concurrent fetches: {}", config.crawl.max_concurrent_fetches);
    println!("  Retry limit (HTTP 429): {}", config.crawl.retry_limit);
    println!("  Backoff base: {}ms", config.crawl.backoff_base_ms);

    println!("\nOutput:");
    println!("  CSV file: {}", config.output.csv_path);

    println!("\nUser agents ({}):", config.identity.user_agents.len());
    for agent in &config.identity.user_agents {
        println!("  - {}", agent);
    }

    println!("\n✓ Configuration is valid");
}

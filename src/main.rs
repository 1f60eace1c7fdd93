//! Inkshelf main entry point
//!
//! This is the command-line interface for the Inkshelf book catalogue scraper.

use clap::Parser;
use inkshelf::analysis::{self, Renderer, TextRenderer};
use inkshelf::config::{self, load_config, Config};
use inkshelf::output::{self, print_report};
use inkshelf::run_scrape;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inkshelf: a book catalogue scraper
///
/// Inkshelf walks the category index of a bookstore site, paginates through
/// every listing, and persists the collected records as CSV/JSON alongside
/// aggregate statistics.
#[derive(Parser, Debug)]
#[command(name = "inkshelf")]
#[command(version)]
#[command(about = "A book catalogue scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the target site
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Directory that receives the output files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Stop paginating a category once this many books were collected
    #[arg(long, value_name = "N")]
    max_books: Option<usize>,

    /// Minimum time between consecutive requests in milliseconds
    #[arg(long, value_name = "MS")]
    rate_limit_ms: Option<u64>,

    /// Retry attempts per request after the first failure
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Analyze previously scraped data without fetching anything
    #[arg(long)]
    analyze_only: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match build_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.analyze_only {
        handle_analyze_only(&config)?;
    } else {
        handle_scrape(config).await?;
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
            0 => EnvFilter::new("inkshelf=info,warn"),
            1 => EnvFilter::new("inkshelf=debug,info"),
            2 => EnvFilter::new("inkshelf=trace,debug"),
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

/// Builds the effective configuration: file (or defaults), then CLI overrides
fn build_config(cli: &Cli) -> Result<Config, inkshelf::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.scraper.base_url = base_url.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.output.data_dir = data_dir.clone();
    }
    if let Some(max_books) = cli.max_books {
        config.scraper.max_books_per_category = Some(max_books);
    }
    if let Some(rate_limit_ms) = cli.rate_limit_ms {
        config.scraper.rate_limit_ms = rate_limit_ms;
    }
    if let Some(retries) = cli.retries {
        config.scraper.retry_count = retries;
    }
    if let Some(timeout) = cli.timeout {
        config.scraper.request_timeout_secs = timeout;
    }

    // Overrides can invalidate a config that was valid on disk
    config::validate(&config)?;
    Ok(config)
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    match run_scrape(config).await {
        Ok(report) => {
            print_report(&report);
            // Partial data is still a successful run
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --analyze-only mode: re-analyzes previously persisted records
fn handle_analyze_only(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = &config.output.data_dir;
    tracing::info!("Analyzing existing data in {}", data_dir.display());

    let books = output::load_books(data_dir)?;
    let analysis = analysis::analyze(&books);
    output::save_analysis(&analysis, data_dir)?;
    TextRenderer.render(&analysis);

    println!("Analyzed {} books from {}", books.len(), data_dir.display());
    Ok(())
}

//! Paper-Trail main entry point
//!
//! This is the command-line interface for the Paper-Trail listing crawler.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use paper_trail::config::{load_config_with_hash, Config, OutputMode};
use paper_trail::crawler::{ArxivCrawler, ScirateCrawler, Source};
use paper_trail::output::{print_statistics, sink_for, write_crawl_result, CrawlStats};
use paper_trail::CrawlResult;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Paper-Trail: a polite crawler for preprint listings
///
/// Paper-Trail walks the daily listings of arXiv and SciRate over a date
/// range and collects per-paper metadata, one bucket per listing day.
#[derive(Parser, Debug)]
#[command(name = "paper-trail")]
#[command(version)]
#[command(about = "A polite crawler for preprint listings", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Crawl only this source, even if both are configured
    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Arxiv,
    Scirate,
}

impl SourceArg {
    fn includes(selected: Option<SourceArg>, source: Source) -> bool {
        match selected {
            None => true,
            Some(SourceArg::Arxiv) => source == Source::Arxiv,
            Some(SourceArg::Scirate) => source == Source::Scirate,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config, cli.source);
        return Ok(());
    }

    let mut crawled = 0;

    if let Some(arxiv) = config.arxiv.clone() {
        if SourceArg::includes(cli.source, Source::Arxiv) {
            let label = format!("{}-{}", arxiv.start, arxiv.end);
            let mut crawler = ArxivCrawler::with_http(arxiv, &config.crawler, &config.user_agent)?;
            let result = crawler
                .run(sink_for(&config.output, Source::Arxiv)?)
                .await
                .context("arXiv crawl failed")?;
            finish_source(&config, Source::Arxiv, &label, &result, crawler.stats())?;
            crawled += 1;
        }
    }

    if let Some(scirate) = config.scirate.clone() {
        if SourceArg::includes(cli.source, Source::Scirate) {
            let label = format!("{}-{}", scirate.start, scirate.end);
            let mut crawler =
                ScirateCrawler::with_http(scirate, &config.crawler, &config.user_agent)?;
            let result = crawler
                .run(sink_for(&config.output, Source::Scirate)?)
                .await
                .context("SciRate crawl failed")?;
            finish_source(&config, Source::Scirate, &label, &result, crawler.stats())?;
            crawled += 1;
        }
    }

    if crawled == 0 {
        tracing::warn!("No configured source matched the --source filter");
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
            0 => EnvFilter::new("paper_trail=info,warn"),
            1 => EnvFilter::new("paper_trail=debug,info"),
            2 => EnvFilter::new("paper_trail=trace,debug"),
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

/// Prints statistics and, in accumulate mode, dumps the result next to the per-day files
fn finish_source(
    config: &Config,
    source: Source,
    label: &str,
    result: &CrawlResult,
    stats: &CrawlStats,
) -> Result<()> {
    print_statistics(source, stats);

    if config.output.mode == OutputMode::Accumulate {
        if let Some(directory) = &config.output.directory {
            let directory = Path::new(directory);
            std::fs::create_dir_all(directory)
                .with_context(|| format!("failed to create {}", directory.display()))?;

            let path = directory.join(format!("{}-{}.json", source.as_str(), label));
            write_crawl_result(&path, result)?;
            println!("✓ {} days written to: {}", result.len(), path.display());
        }
    }

    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, selected: Option<SourceArg>) {
    println!("=== Paper-Trail Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Delay between requests: {}ms", config.crawler.delay_ms);
    println!("  Max item workers: {}", config.crawler.max_item_workers);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Mode: {:?}", config.output.mode);
    println!(
        "  Directory: {}",
        config.output.directory.as_deref().unwrap_or("(none)")
    );

    if let Some(arxiv) = &config.arxiv {
        if SourceArg::includes(selected, Source::Arxiv) {
            println!("\narXiv:");
            println!("  Archive: {}", arxiv.archive);
            println!("  Dates: {} to {}", arxiv.start, arxiv.end);
            println!("  Listing variant: {}", arxiv.variant.as_query_value());
            println!("  Extended fields: {}", arxiv.include_extended_fields);
            println!("  Parallel item fetch: {}", arxiv.parallel_item_fetch);
            println!("  Base URL: {}", arxiv.base_url);
        }
    }

    if let Some(scirate) = &config.scirate {
        if SourceArg::includes(selected, Source::Scirate) {
            println!("\nSciRate:");
            println!("  Archive: {}", scirate.archive);
            println!("  Dates: {} to {}", scirate.start, scirate.end);
            println!("  Base URL: {}", scirate.base_url);
        }
    }

    println!("\n✓ Configuration is valid");
}

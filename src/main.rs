// src/main.rs
// =============================================================================
// This is the entry point of the deepcrawl CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Install the log subscriber (the only place logging is configured)
// 3. Build and validate the crawl configuration
// 4. Wire the reqwest fetcher and the results file into the crawler and run it
// 5. Print the summary and exit (0 = success, 1 = fatal error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use deepcrawl::{CrawlSummary, Crawler, FileSink, PageFetcher, ReqwestFetcher};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, !cli.no_color);

    let exit_code = match run(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{e:#}");
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so a --json summary on stdout stays machine-readable
fn init_tracing(default_filter: &str, ansi: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let started = Instant::now();

    let settings = cli
        .crawl_config()
        .context("failed to load configuration")?
        .validate()
        .context("invalid configuration")?;

    info!(seeds = settings.seeds.len(), "initializing a crawl");

    let http = ReqwestFetcher::new(settings.timeout, &settings.user_agent)
        .context("failed to build HTTP client")?;
    let sink = FileSink::open(&settings.output)
        .await
        .context("failed to open results file")?;

    let mut crawler = Crawler::new(
        PageFetcher::new(http, settings.check_status),
        sink,
        settings.limits,
    );

    // In-flight fetches are abandoned on Ctrl-C; only complete rounds were
    // written to the results file
    let summary = tokio::select! {
        result = crawler.run(settings.seeds) => result.context("crawl aborted")?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted"),
    };

    info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        "program completed"
    );

    print_summary(&summary, cli.json)
}

fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    let termination = match summary.termination {
        deepcrawl::Termination::DepthReached => "depth reached",
        deepcrawl::Termination::BudgetExhausted => "budget exhausted",
    };

    println!("📊 Summary:");
    println!("   {:<22} {}", "Rounds:", summary.rounds);
    println!("   {:<22} {}", "Processed URLs:", summary.processed);
    println!("   {:<22} {}", "Failed pages:", summary.failed_pages);
    println!("   {:<22} {}", "Found links:", summary.found_links);
    println!("   {:<22} {}", "Distinct links:", summary.distinct_found_links);
    println!("   {:<22} {}", "Stopped because:", termination);
    println!("   {:<22} {:.3}s", "Elapsed:", summary.elapsed_ms as f64 / 1000.0);
    println!("   {:<22} {}", "Results written to:", summary.output);

    Ok(())
}

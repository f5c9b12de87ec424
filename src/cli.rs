// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the Cli struct below IS the argument list, and
// clap generates the parsing, --help and --version for us.
//
// Every crawl setting is optional here. A flag that is given overrides the
// value from the --config file, which itself overrides the built-in default
// (see config.rs).
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use deepcrawl::{ConfigError, CrawlConfig};

#[derive(Parser, Debug)]
#[command(
    name = "deepcrawl",
    version,
    about = "Breadth-first, depth-bounded web crawler",
    long_about = "deepcrawl starts from a set of seed URLs and crawls level by level: every page of \
                  one depth is fetched (concurrently, up to --concurrency at once) before the next \
                  depth starts. Visited pages and discovered links are appended to a JSON Lines file."
)]
pub struct Cli {
    /// Seed URLs to start crawling from (e.g., https://example.com)
    ///
    /// Positional arguments, zero or more. If none are given, the seeds
    /// must come from the --config file.
    pub seeds: Vec<String>,

    /// Number of breadth-first rounds to crawl [default: 2]
    ///
    /// Depth 0 = fetch nothing
    /// Depth 1 = just the seed pages
    /// Depth 2 = seed pages + every page they link to
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Stop after this many pages were fetched [default: unbounded]
    #[arg(long)]
    pub max_processed: Option<usize>,

    /// Maximum number of pages fetched at the same time [default: 5]
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// File the crawl results are appended to [default: crawl_results.jsonl]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Extract links from non-2xx responses instead of treating them as failures
    #[arg(long)]
    pub ignore_status: bool,

    /// JSON configuration file (camelCase keys, e.g. {"seeds": [...], "maxDepth": 3})
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the final summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log filter when RUST_LOG is not set (e.g. "debug", "deepcrawl=trace")
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    // Builds the crawl configuration: defaults, then the config file, then flags
    pub fn crawl_config(&self) -> Result<CrawlConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_json_file(path)?,
            None => CrawlConfig::default(),
        };

        if !self.seeds.is_empty() {
            config.seeds = self.seeds.clone();
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(max_processed) = self.max_processed {
            config.max_processed = Some(max_processed);
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if self.ignore_status {
            config.check_status = false;
        }

        Ok(config)
    }
}

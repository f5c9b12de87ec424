// src/lib.rs
// =============================================================================
// deepcrawl: a depth-bounded, level-synchronized breadth-first web crawler.
//
// The crawl engine lives in the library so it can be driven with any HTTP
// capability and result sink; the binary (main.rs) wires in reqwest and a
// JSON Lines file.
//
// Modules:
// - config: defaults, JSON config files, validation
// - crawl: the crawl controller, frontier and concurrency limiter
// - fetch: fetching a page and extracting its links
// - links: the ordered link set
// - sink: the append-only result record
// =============================================================================

pub mod config;
pub mod crawl;
pub mod fetch;
pub mod links;
pub mod sink;

pub use config::{ConfigError, CrawlConfig, CrawlSettings};
pub use crawl::{CrawlError, CrawlLimits, CrawlSummary, Crawler, Termination};
pub use fetch::{HttpFetch, PageFetcher, ReqwestFetcher};
pub use links::LinkSet;
pub use sink::{FileSink, ResultSink, SinkRecord};

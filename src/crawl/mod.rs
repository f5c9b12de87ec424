// src/crawl/mod.rs
// =============================================================================
// This module runs the crawl itself.
//
// Features:
// - Level-synchronized breadth-first crawling from a set of seed URLs
// - Configurable depth limit and optional cap on pages fetched
// - Bounded concurrency inside each round
//
// Submodules:
// - controller: the round loop and its termination rules
// - frontier: the single-slot queue holding the next round's batch
// - limiter: the permit pool bounding concurrent fetches
// =============================================================================

mod controller;
mod frontier;
mod limiter;

pub use controller::{CrawlError, CrawlLimits, CrawlState, CrawlSummary, Crawler, Termination};
pub use frontier::{Frontier, FrontierBatch, FrontierError};
pub use limiter::{ConcurrencyLimiter, Permit};

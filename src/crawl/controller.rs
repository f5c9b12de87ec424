// src/crawl/controller.rs
// =============================================================================
// The crawl controller: a level-synchronized breadth-first crawl.
//
// How it works:
// 1. Put the seed URLs into the frontier as the first batch
// 2. Take the batch, write a depth marker to the sink
// 3. Fetch every URL of the batch concurrently (bounded by the limiter)
// 4. Wait for ALL of them, then write the processed batch and the links found
// 5. The links found become the next batch; repeat until the depth runs out
//
// Round N+1 never starts before round N fully drains, so pages are visited in
// true breadth-first order.
//
// Budget: with max_processed set, only as many URLs as the budget still allows
// are fetched. Checking happens in batch order before the round fans out, so
// the processed count can never go over the limit. URLs past the limit are
// dropped for good and the crawl stops without enqueuing another batch.
//
// There is no global visited set: a page rediscovered in a later round is
// fetched again. The depth bound is what keeps cycles finite.
// =============================================================================

use futures::future::join_all;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::frontier::{Frontier, FrontierBatch, FrontierError};
use super::limiter::ConcurrencyLimiter;
use crate::fetch::{FetchFailure, HttpFetch, PageFetcher};
use crate::links::LinkSet;
use crate::sink::{ResultSink, SinkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Number of breadth-first rounds
    pub max_depth: usize,
    /// Cap on pages fetched across the whole crawl, None = unbounded
    pub max_processed: Option<usize>,
    /// Fetches allowed in flight at once
    pub concurrency: NonZeroUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Seeded,
    RoundInProgress,
    RoundComplete,
    BudgetExhausted,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    DepthReached,
    BudgetExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub rounds: usize,
    pub processed: usize,
    pub failed_pages: usize,
    /// Links found per page, summed over all pages (repeats across pages count)
    pub found_links: usize,
    pub distinct_found_links: usize,
    pub termination: Termination,
    pub output: String,
    pub elapsed_ms: u64,
}

// Only sink failures end a crawl early; page failures never get this far
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Frontier(#[from] FrontierError),
}

pub struct Crawler<H, S> {
    fetcher: PageFetcher<H>,
    sink: S,
    limiter: ConcurrencyLimiter,
    limits: CrawlLimits,
    frontier: Frontier,
    state: CrawlState,
}

impl<H: HttpFetch, S: ResultSink> Crawler<H, S> {
    pub fn new(fetcher: PageFetcher<H>, sink: S, limits: CrawlLimits) -> Self {
        Self {
            fetcher,
            sink,
            limiter: ConcurrencyLimiter::new(limits.concurrency),
            limits,
            frontier: Frontier::new(),
            state: CrawlState::Idle,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Crawls from `seeds`, used as given (no de-duplication)
    pub async fn run(&mut self, seeds: Vec<Url>) -> Result<CrawlSummary, CrawlError> {
        let started = Instant::now();

        let mut depth_remaining = self.limits.max_depth;
        let mut rounds = 0;
        let mut processed = 0;
        let mut failed_pages = 0;
        let mut found_links = 0;
        let mut all_found = LinkSet::new();
        let mut termination = Termination::DepthReached;

        self.frontier.put(FrontierBatch {
            depth_remaining,
            urls: seeds,
        })?;
        self.transition(CrawlState::Seeded);

        info!(
            depth = self.limits.max_depth,
            concurrency = self.limiter.capacity(),
            "diving into the first depth"
        );

        while depth_remaining > 0 {
            let batch = self.frontier.take()?;
            self.transition(CrawlState::RoundInProgress);
            self.sink.write_depth_marker(batch.depth_remaining).await?;

            let allowed = match self.limits.max_processed {
                Some(max) => max.saturating_sub(processed).min(batch.urls.len()),
                None => batch.urls.len(),
            };
            let (to_fetch, skipped) = batch.urls.split_at(allowed);

            let outcomes = self.fetch_round(to_fetch).await;
            processed += to_fetch.len();

            let mut round_links = LinkSet::new();
            for outcome in outcomes {
                match outcome {
                    Ok(links) => {
                        found_links += links.len();
                        round_links.merge(&links);
                    }
                    Err(_) => failed_pages += 1,
                }
            }
            all_found.merge(&round_links);

            self.sink
                .write_processed_batch(to_fetch, batch.depth_remaining)
                .await?;
            self.sink.write_found_links(&round_links).await?;

            depth_remaining -= 1;
            rounds += 1;
            info!(
                remaining_depth = depth_remaining,
                processed,
                found_links,
                "transition to the next depth"
            );

            let budget_spent = self
                .limits
                .max_processed
                .is_some_and(|max| processed >= max);
            let more_work = depth_remaining > 0 && !round_links.is_empty();

            if !skipped.is_empty() || (budget_spent && more_work) {
                debug!(skipped = skipped.len(), "processing budget exhausted");
                self.transition(CrawlState::BudgetExhausted);
                termination = Termination::BudgetExhausted;
                break;
            }

            self.transition(CrawlState::RoundComplete);
            if depth_remaining > 0 {
                self.frontier.put(FrontierBatch {
                    depth_remaining,
                    urls: round_links.into_vec(),
                })?;
            }
        }

        // With max_depth = 0 the seed batch is never taken
        if !self.frontier.is_empty() {
            self.frontier.take()?;
        }
        self.transition(CrawlState::Done);

        let summary = CrawlSummary {
            rounds,
            processed,
            failed_pages,
            found_links,
            distinct_found_links: all_found.len(),
            termination,
            output: self.sink.destination(),
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        match termination {
            Termination::DepthReached => info!(
                depth = self.limits.max_depth,
                "required depth reached"
            ),
            Termination::BudgetExhausted => info!(
                max_processed = self.limits.max_processed,
                "processing budget reached"
            ),
        }
        info!(
            processed = summary.processed,
            found_links = summary.found_links,
            distinct = summary.distinct_found_links,
            "crawl finished"
        );

        Ok(summary)
    }

    // Fans the batch out through the limiter and joins every fetch
    //
    // Results come back in batch order whatever order the fetches finish in.
    async fn fetch_round(&self, urls: &[Url]) -> Vec<Result<LinkSet, FetchFailure>> {
        let fetches = urls
            .iter()
            .map(|url| self.limiter.run(self.fetcher.fetch_and_extract(url)));

        let outcomes = join_all(fetches).await;

        debug_assert_eq!(self.limiter.in_use(), 0);
        outcomes
    }

    fn transition(&mut self, next: CrawlState) {
        debug!(from = ?self.state, to = ?next, "crawl state");
        self.state = next;
    }
}

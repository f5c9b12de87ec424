// src/fetch/page.rs
// =============================================================================
// Page fetch-and-extract: one URL in, the set of absolute links on it out.
//
// How it works:
// 1. GET the page through the HTTP capability
// 2. Optionally reject non-2xx responses
// 3. Pull every anchor href out of the body
// 4. Resolve each href against the page URL, dropping the ones that fail
// 5. Collect the results into a LinkSet (duplicates collapse)
//
// A failed page is reported as an explicit FetchFailure. It is logged here,
// once, and the controller carries on with an empty link set for that page.
// Nothing is retried.
// =============================================================================

use thiserror::Error;
use tracing::{debug, error, warn};
use url::Url;

use super::html::extract_anchor_hrefs;
use super::http::{HttpFetch, TransportError};
use super::resolve::{resolve, ResolveError};
use crate::links::LinkSet;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

pub struct PageFetcher<H> {
    http: H,
    check_status: bool,
}

impl<H: HttpFetch> PageFetcher<H> {
    // check_status: treat non-2xx responses as transport failures
    pub fn new(http: H, check_status: bool) -> Self {
        Self { http, check_status }
    }

    pub async fn fetch_and_extract(&self, url: &Url) -> Result<LinkSet, FetchFailure> {
        let outcome = self.fetch_body(url).await.map(|body| extract_links(url, &body));

        match &outcome {
            Ok(links) => debug!(url = %url, links = links.len(), "found links"),
            Err(FetchFailure::Transport(TransportError::Other(detail))) => {
                error!(url = %url, detail = %detail, "unexpected failure while fetching page")
            }
            Err(failure) => warn!(url = %url, error = %failure, "transport error"),
        }

        outcome
    }

    async fn fetch_body(&self, url: &Url) -> Result<String, FetchFailure> {
        let response = self.http.get(url).await?;

        if self.check_status && !(200..300).contains(&response.status) {
            return Err(FetchFailure::Status(response.status));
        }

        Ok(response.body)
    }
}

// Resolves every anchor of `body` against `page_url`
//
// Unresolvable hrefs are logged and skipped; one bad href never costs the
// rest of the page.
pub fn extract_links(page_url: &Url, body: &str) -> LinkSet {
    let mut links = LinkSet::new();

    for href in extract_anchor_hrefs(body) {
        match resolve(page_url, &href) {
            Ok(url) => {
                links.insert(url);
            }
            Err(err @ ResolveError::UnsupportedScheme { .. }) => {
                debug!(page = %page_url, error = %err, "skipping link")
            }
            Err(err) => warn!(page = %page_url, error = %err, "error parsing link"),
        }
    }

    links
}

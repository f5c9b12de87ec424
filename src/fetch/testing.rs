// src/fetch/testing.rs
// =============================================================================
// An in-memory web for tests.
//
// FakeWeb implements HttpFetch from a fixed table of pages and records how it
// was used: every requested URL, and the highest number of requests that were
// in flight at the same time.
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

use super::http::{HttpFetch, HttpResponse, TransportError};

#[derive(Debug, Default)]
pub struct FakeWeb {
    pages: HashMap<String, Result<HttpResponse, TransportError>>,
    latency: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl FakeWeb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.status(url, 200, html)
    }

    pub fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        let response = HttpResponse {
            status,
            body: body.to_string(),
        };
        self.pages.insert(key(url), Ok(response));
        self
    }

    pub fn fail(mut self, url: &str, error: TransportError) -> Self {
        self.pages.insert(key(url), Err(error));
        self
    }

    // Every request sleeps this long, so concurrent requests overlap
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

// Keys go through the URL parser so "https://a.test" matches "https://a.test/"
fn key(url: &str) -> String {
    Url::parse(url).unwrap().to_string()
}

impl HttpFetch for FakeWeb {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        self.requests.lock().unwrap().push(url.to_string());

        if self.latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Connect(format!("no route to {url}"))))
    }
}

// src/fetch/http.rs
// =============================================================================
// The HTTP side of page fetching.
//
// Key functionality:
// - HttpFetch: the narrow "GET a URL, give me status + body" capability the
//   crawler depends on. Tests swap in their own implementation.
// - ReqwestFetcher: the real implementation on top of a shared reqwest Client
// - Classifies reqwest failures (timeout, redirect loop, connect, other)
//
// Status codes are NOT judged here. Whether a 404 counts as a failure is a
// crawl setting and is decided by the page fetcher (page.rs).
// =============================================================================

use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Redirect hops followed before a request is considered failed
const MAX_REDIRECTS: usize = 10;

/// What came back from a successful round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Transport-level failures: the request never produced a usable response
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}

/// The HTTP fetch capability consumed by the crawler
pub trait HttpFetch: Send + Sync {
    fn get(&self, url: &Url) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: HttpFetch> HttpFetch for Arc<T> {
    fn get(&self, url: &Url) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).get(url)
    }
}

// HTTP client shared by every fetch of a crawl
//
// Client is cheap to clone (reference counted internally) and keeps a
// connection pool, so one instance serves all concurrent requests.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(categorize_error)?;

        Ok(HttpResponse { status, body })
    }
}

// Categorizes the different reqwest failure modes:
// - Network timeout
// - Redirect loops
// - DNS / connection refused
// - everything else (body decoding, TLS, protocol errors)
fn categorize_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_redirect() {
        TransportError::TooManyRedirects
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}

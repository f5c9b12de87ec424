// src/fetch/mod.rs
// =============================================================================
// This module turns one URL into the set of links found on that page.
//
// Submodules:
// - http: the HTTP capability (trait + reqwest implementation)
// - html: pulls raw anchor hrefs out of an HTML body
// - resolve: turns a raw href into an absolute URL
// - page: ties the three together (fetch-and-extract)
// =============================================================================

mod html;
mod http;
mod page;
mod resolve;

#[cfg(test)]
pub mod testing;

pub use http::{HttpFetch, HttpResponse, ReqwestFetcher, TransportError};
pub use page::{extract_links, FetchFailure, PageFetcher};
pub use resolve::{resolve, ResolveError};

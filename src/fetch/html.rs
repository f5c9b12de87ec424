// src/fetch/html.rs
// =============================================================================
// This module pulls anchor hrefs out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (built on html5ever, so broken markup still parses)
// - Supports CSS selectors for finding elements
//
// The hrefs come back raw, in document order, exactly as written in the page.
// Turning them into absolute URLs is the job of resolve.rs.
// =============================================================================

use scraper::{Html, Selector};
use std::sync::LazyLock;

// "a[href]" means "all <a> tags that have an href attribute", so anchors
// without an href never show up here
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("constant selector is valid"));

// Extracts the href of every anchor in the document
//
// Parameters:
//   body: the HTML content to parse (borrowed as &str)
//
// Returns: Vec<String> of raw href values, possibly empty
//
// Example:
//   body = "<a href='/docs'>Docs</a><a>no href</a>"
//   result = ["/docs"]
pub fn extract_anchor_hrefs(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

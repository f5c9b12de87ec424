// src/fetch/resolve.rs
// =============================================================================
// Link resolution: turns the raw href of an anchor into an absolute URL.
//
// Resolution follows the standard base-relative joining rules of the `url`
// crate (the same algorithm browsers use). On top of that we refuse:
// - hrefs with a broken percent escape in the path ("%%%", "/x%zz"), which
//   the URL parser would otherwise pass through untouched. A stray '%' in the
//   query or fragment is left alone, browsers send those as written
// - targets whose scheme we cannot fetch (mailto:, javascript:, tel:, ...)
//
// Fragments are kept as-is. Two links are equal only when their resolved
// strings are byte-equal, so no further normalization happens here.
// =============================================================================

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid percent-encoding in {0:?}")]
    InvalidPercentEncoding(String),

    #[error("cannot resolve {href:?}: {source}")]
    Malformed {
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme {scheme:?} in {url}")]
    UnsupportedScheme { scheme: String, url: String },
}

// Resolves `href` against the page it was found on
//
// Examples (base = "https://example.com/page"):
//   "/docs"              -> https://example.com/docs
//   "https://other.com"  -> https://other.com/
//   "#top"               -> https://example.com/page#top
//   "%%%"                -> Err(InvalidPercentEncoding)
//   "mailto:a@b.c"       -> Err(UnsupportedScheme)
pub fn resolve(base: &Url, href: &str) -> Result<Url, ResolveError> {
    let href = href.trim();

    if !has_valid_percent_escapes(href) {
        return Err(ResolveError::InvalidPercentEncoding(href.to_string()));
    }

    let url = base.join(href).map_err(|source| ResolveError::Malformed {
        href: href.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ResolveError::UnsupportedScheme {
            scheme: other.to_string(),
            url: url.to_string(),
        }),
    }
}

// Every '%' before the query or fragment must introduce exactly two hex digits
fn has_valid_percent_escapes(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

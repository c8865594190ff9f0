// src/fetch/mod.rs
// =============================================================================
// This module defines the fetching boundary of the crawler.
//
// The crawler itself never talks to the network. It only knows the
// Fetcher trait: "give me a URL, I give you back the page content and
// the links found on it, or an error". That keeps the crawl logic
// testable (we can feed it a canned site) and keeps HTTP details in
// one place.
//
// Submodules:
// - http: The real fetcher backed by reqwest + scraper
// - fixture: An in-memory fetcher over a canned page map
//
// Rust concepts:
// - Traits: The interface our two fetchers both implement
// - async-trait: Allows async fn inside a trait
// - thiserror: Derives Display/Error for our error enum
// =============================================================================

mod fixture;
mod http;

// Re-export public items from submodules
// This lets users write `fetch::HttpFetcher` instead of
// `fetch::http::HttpFetcher`
pub use fixture::FixtureFetcher;
pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

// What a fetcher returns for one URL.
//
// Lives only inside the crawl task that requested it: the content is
// currently just carried for display, and the links drive the fan-out,
// in the order they appeared on the page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Page content (for the fixture fetcher, a short title)
    pub content: String,
    /// Outgoing links, in document order
    pub links: Vec<String>,
}

// The one error type of the system: "this URL could not be retrieved".
//
// Produced only by fetchers. The crawler reports it and moves on; it
// never aborts sibling or parent work because one page failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The fixture fetcher has no page under this URL
    #[error("not found: {0}")]
    NotFound(String),

    /// The URL could not be parsed at all
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server answered with a non-success status code
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The request itself failed (timeout, DNS, connection, TLS, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

// The capability the crawler consumes.
//
// Implementations must be safe to call from many tasks at once; the
// crawler clones nothing but an Arc<dyn Fetcher> and hits it from every
// task it spawns. Send + Sync are part of the contract for exactly that
// reason.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches one URL, returning its content and outgoing links.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

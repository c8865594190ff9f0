// src/fetch/fixture.rs
// =============================================================================
// This module implements the Fetcher trait over a canned, in-memory
// site: a map from URL to (content, links).
//
// Why have a fake fetcher?
// - The `demo` subcommand can show off the crawler without touching
//   the network
// - The crawl tests need a graph with known shape (cycles, dead links,
//   diamonds) and a way to count how often each page was fetched
//
// The per-URL hit counter is the important diagnostic: it is how we
// prove that a page is fetched at most once no matter how many crawl
// tasks discover it.
//
// Rust concepts:
// - Builder pattern: page() consumes and returns self for chaining
// - HashMap: The canned site itself
// - Mutex: The hit counters are written from many tasks at once
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{FetchError, FetchedPage, Fetcher};

// One canned page: its content and outgoing links
#[derive(Debug, Clone)]
struct FixturePage {
    content: String,
    links: Vec<String>,
}

// A Fetcher that serves pages from memory and counts every fetch call.
//
// Unknown URLs return FetchError::NotFound, which is how the tests
// (and the demo) exercise the crawler's failure isolation.
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, FixturePage>,
    // How many times each URL was fetched, including misses
    hits: Mutex<HashMap<String, usize>>,
}

impl FixtureFetcher {
    /// Creates an empty fixture with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    // Registers a page. Consumes and returns self so fixtures read as
    // one chained expression:
    //
    //   FixtureFetcher::new()
    //       .page("https://site.test/a", "Page A", &["https://site.test/b"])
    //       .page("https://site.test/b", "Page B", &[])
    pub fn page(mut self, url: &str, content: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FixturePage {
                content: content.to_string(),
                links: links.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    // A small canned site for the demo subcommand.
    //
    // The graph is deliberately messy: every page links back to the
    // root, and the blog is linked from two places but never
    // registered, so its fetch fails the same way a dead link would.
    pub fn sample_site() -> Self {
        Self::new()
            .page(
                "https://example.com/",
                "Example Domain",
                &["https://example.com/docs/", "https://example.com/blog/"],
            )
            .page(
                "https://example.com/docs/",
                "Documentation",
                &[
                    "https://example.com/",
                    "https://example.com/blog/",
                    "https://example.com/docs/install/",
                    "https://example.com/docs/guide/",
                ],
            )
            .page(
                "https://example.com/docs/install/",
                "Installation",
                &["https://example.com/", "https://example.com/docs/"],
            )
            .page(
                "https://example.com/docs/guide/",
                "User Guide",
                &["https://example.com/", "https://example.com/docs/"],
            )
    }

    /// How many times `url` has been fetched so far.
    pub fn hits(&self, url: &str) -> usize {
        self.hits
            .lock()
            .expect("fixture hit counter lock poisoned")
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of fetch calls across all URLs.
    pub fn total_fetches(&self) -> usize {
        self.hits
            .lock()
            .expect("fixture hit counter lock poisoned")
            .values()
            .sum()
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        // Count the call before looking the page up, so misses are
        // counted too
        {
            let mut hits = self.hits.lock().expect("fixture hit counter lock poisoned");
            *hits.entry(url.to_string()).or_insert(0) += 1;
        }

        match self.pages.get(url) {
            Some(page) => Ok(FetchedPage {
                content: page.content.clone(),
                links: page.links.clone(),
            }),
            None => Err(FetchError::NotFound(url.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_page_is_served() {
        let fetcher = FixtureFetcher::new().page("https://site.test/", "Home", &["https://site.test/a"]);

        let page = fetcher.fetch("https://site.test/").await.unwrap();
        assert_eq!(page.content, "Home");
        assert_eq!(page.links, vec!["https://site.test/a".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_page_is_not_found() {
        let fetcher = FixtureFetcher::new();

        let err = fetcher.fetch("https://site.test/missing").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
        // The miss still counts as a fetch call
        assert_eq!(fetcher.hits("https://site.test/missing"), 1);
    }

    #[tokio::test]
    async fn test_hits_accumulate_per_url() {
        let fetcher = FixtureFetcher::new().page("https://site.test/", "Home", &[]);

        fetcher.fetch("https://site.test/").await.unwrap();
        fetcher.fetch("https://site.test/").await.unwrap();

        assert_eq!(fetcher.hits("https://site.test/"), 2);
        assert_eq!(fetcher.total_fetches(), 2);
    }

    #[test]
    fn test_sample_site_has_a_dead_link() {
        let fetcher = FixtureFetcher::sample_site();

        // The blog is linked from the root but never registered
        assert!(fetcher.pages.contains_key("https://example.com/"));
        assert!(!fetcher.pages.contains_key("https://example.com/blog/"));
    }
}

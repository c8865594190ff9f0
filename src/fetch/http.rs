// src/fetch/http.rs
// =============================================================================
// This module implements the Fetcher trait over real HTTP.
//
// How it works:
// 1. GET the page with a shared reqwest client (10 second timeout)
// 2. Non-success status codes become FetchError
// 3. Parse the body with scraper and collect every <a href>
// 4. Resolve relative hrefs against the page URL
// 5. Keep only http/https links (and, if scoped, only the start domain)
//
// Scoping:
// - A crawler pointed at example.com should not wander off to every
//   site example.com links to
// - scoped_to() remembers the start domain and drops links that lead
//   anywhere else
//
// Rust concepts:
// - Trait implementation: This is one of two Fetcher impls
// - CSS selectors: scraper finds elements the way querySelector does
// - Url::join: Resolves relative links like a browser would
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::{FetchError, FetchedPage, Fetcher};

// A Fetcher backed by real HTTP requests.
//
// One instance is shared by every crawl task; reqwest's Client is
// internally reference-counted and pools connections, so sharing it is
// both safe and cheaper than building one per request.
pub struct HttpFetcher {
    client: Client,
    // When set, links leading to any other domain are dropped
    scope: Option<String>,
}

impl HttpFetcher {
    // Creates a fetcher that only returns links on the same domain as
    // `start_url`.
    //
    // Example:
    //   scoped_to("https://example.com/docs") keeps example.com links
    //   and drops everything else
    pub fn scoped_to(start_url: &str) -> Result<Self, FetchError> {
        let parsed = Url::parse(start_url).map_err(|e| FetchError::InvalidUrl {
            url: start_url.to_string(),
            reason: e.to_string(),
        })?;

        let domain = parsed.domain().ok_or_else(|| FetchError::InvalidUrl {
            url: start_url.to_string(),
            reason: "URL has no domain".to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(10)) // 10 second timeout per request
            .build()?;

        Ok(Self {
            client,
            scope: Some(domain.to_string()),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let links = extract_links(&html, url, self.scope.as_deref());

        Ok(FetchedPage {
            content: html,
            links,
        })
    }
}

// Extracts crawlable links from HTML, in document order.
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL of the current page (for resolving relative links)
//   scope: if Some, only links on this domain are kept
//
// Returns: Vec of absolute http/https URLs
fn extract_links(html: &str, page_url: &str, scope: Option<&str>) -> Vec<String> {
    let mut links = Vec::new();

    // Parse the HTML
    let document = Html::parse_document(html);

    // Select all <a> tags with href
    // The selector is a constant and known to be valid, so unwrap is OK
    let selector = Selector::parse("a[href]").unwrap();

    // Parse the page URL once for resolving relative links
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return links,
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            // Try to resolve to an absolute URL
            let absolute_url = match resolve_link(&base, href) {
                Some(url) => url,
                None => continue,
            };

            // Keep only links the crawler can actually follow
            if let Ok(parsed) = Url::parse(&absolute_url) {
                let is_http = parsed.scheme() == "http" || parsed.scheme() == "https";
                let in_scope = match scope {
                    Some(domain) => parsed.domain() == Some(domain),
                    None => true,
                };

                if is_http && in_scope {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    // Skip anchors and special protocols
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // Try to resolve the URL
    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_link() {
        let base = Url::parse("https://example.com/page").unwrap();
        let result = resolve_link(&base, "https://other.com");
        assert_eq!(result, Some("https://other.com/".to_string()));
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://example.com/page").unwrap();
        let result = resolve_link(&base, "/docs");
        assert_eq!(result, Some("https://example.com/docs".to_string()));
    }

    #[test]
    fn test_skip_anchor() {
        let base = Url::parse("https://example.com/page").unwrap();
        let result = resolve_link(&base, "#section");
        assert_eq!(result, None);
    }

    #[test]
    fn test_skip_mailto() {
        let base = Url::parse("https://example.com/page").unwrap();
        let result = resolve_link(&base, "mailto:test@example.com");
        assert_eq!(result, None);
    }

    #[test]
    fn test_extract_links_in_document_order() {
        let html = r#"
            <a href="/first">First</a>
            <a href="/second">Second</a>
            <a href="/third">Third</a>
        "#;
        let links = extract_links(html, "https://example.com/", None);
        assert_eq!(
            links,
            vec![
                "https://example.com/first".to_string(),
                "https://example.com/second".to_string(),
                "https://example.com/third".to_string(),
            ]
        );
    }

    #[test]
    fn test_scope_drops_external_links() {
        let html = r#"
            <a href="/local">Local</a>
            <a href="https://other.com/page">External</a>
        "#;
        let links = extract_links(html, "https://example.com/", Some("example.com"));
        assert_eq!(links, vec!["https://example.com/local".to_string()]);
    }

    #[test]
    fn test_unscoped_keeps_external_links() {
        let html = r#"<a href="https://other.com/page">External</a>"#;
        let links = extract_links(html, "https://example.com/", None);
        assert_eq!(links, vec!["https://other.com/page".to_string()]);
    }

    #[test]
    fn test_scoped_to_rejects_bad_url() {
        assert!(HttpFetcher::scoped_to("not a url").is_err());
    }
}

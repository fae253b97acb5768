use crate::canonical::{CanonicalUrl, canonicalize};
use crate::config::{ConfigError, CrawlConfig};
use crate::fetcher::{FetchError, Fetcher};
use crate::filter::ScopeFilter;
use crate::frontier::{Frontier, FrontierItem};
use crate::parsers::PageParser;
use crate::results::PageRecord;
use std::collections::HashSet;
use std::time::Duration;

/// Summary of a finished crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Records in the order their pages were crawled
    pub pages: Vec<PageRecord>,
    /// URLs that were claimed for fetching
    pub visited: usize,
    /// Items dropped because the fetch or the parse failed
    pub failed: usize,
    /// Items still queued when the crawl stopped
    pub pending: usize,
}

/// Breadth-first crawler over a `Fetcher` and a `PageParser`
///
/// A crawler is single-use: `crawl` consumes it.
pub struct WebCrawler<F, P> {
    frontier: Frontier,
    scope: ScopeFilter,
    fetcher: F,
    parser: P,
    max_pages: usize,
    delay: Duration,
}

impl<F: Fetcher, P: PageParser> WebCrawler<F, P> {
    /// Build a crawler with its frontier seeded from `config.start_urls`
    ///
    /// Seeds that are not absolute http(s) URLs are skipped with a warning.
    /// With no valid seed the crawl completes immediately with no records.
    pub fn new(config: &CrawlConfig, fetcher: F, parser: P) -> Result<Self, ConfigError> {
        let mut frontier = Frontier::new(config.max_depth);
        let mut seed_domains = HashSet::new();

        for raw in &config.start_urls {
            match CanonicalUrl::parse(raw) {
                Some(url) => {
                    if let Some(host) = url.host() {
                        seed_domains.insert(host.to_string());
                    }
                    frontier.push(url, 0);
                }
                None => ::log::warn!("Invalid start URL skipped: {}", raw),
            }
        }

        let scope = ScopeFilter::from_config(config, seed_domains)?;
        Ok(Self::with_frontier(config, frontier, scope, fetcher, parser))
    }

    /// Build a crawler around an already prepared frontier and scope
    pub fn with_frontier(
        config: &CrawlConfig,
        frontier: Frontier,
        scope: ScopeFilter,
        fetcher: F,
        parser: P,
    ) -> Self {
        Self {
            frontier,
            scope,
            fetcher,
            parser,
            max_pages: config.max_pages,
            delay: config.delay(),
        }
    }

    /// Run the crawl until the frontier is exhausted or `max_pages` is hit
    ///
    /// A failed fetch or parse only drops the current item.
    pub async fn crawl(mut self) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::default();

        ::log::info!(
            "Starting crawl with {} queued URL(s), maxDepth={}, maxPages={}",
            self.frontier.len(),
            self.frontier.max_depth(),
            self.max_pages
        );

        while outcome.pages.len() < self.max_pages {
            let Some(FrontierItem { url, depth }) = self.frontier.pop() else {
                break;
            };

            if !self.frontier.mark_visited(&url) {
                ::log::trace!("Skipping already visited: {}", url);
                continue;
            }

            ::log::info!("Crawling [depth={}] {}", depth, url);

            let Some(page) = self.visit(&url).await else {
                outcome.failed += 1;
                continue;
            };

            ::log::info!(
                "Parsed: \"{}\" ({} links on page)",
                if page.title.is_empty() { "Untitled" } else { page.title.as_str() },
                page.links.len()
            );
            let links = page.links.clone();
            outcome.pages.push(page);

            if outcome.pages.len() >= self.max_pages {
                ::log::info!("Reached maxPages limit, stopping crawl.");
                break;
            }

            let queued = self.enqueue_links(&links, &url, depth);
            ::log::debug!("Queued {} new link(s) from {}", queued, url);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        outcome.visited = self.frontier.visited_count();
        outcome.pending = self.frontier.len();

        ::log::info!(
            "Crawl complete. Visited {} page(s), collected {} record(s).",
            outcome.visited,
            outcome.pages.len()
        );
        outcome
    }

    /// Fetch and parse one URL, logging and swallowing any failure
    async fn visit(&self, url: &CanonicalUrl) -> Option<PageRecord> {
        let fetched = match self.fetcher.fetch(url.as_url()).await {
            Ok(fetched) => fetched,
            Err(FetchError::NotHtml { content_type }) => {
                ::log::debug!(
                    "Skipping non-HTML content at {} (content-type: {})",
                    url,
                    content_type
                );
                return None;
            }
            Err(e) => {
                ::log::warn!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        match self.parser.parse(url.as_str(), &fetched.body) {
            Ok(page) => Some(page),
            Err(e) => {
                ::log::error!("Failed to parse page {}: {}", url, e);
                None
            }
        }
    }

    /// Resolve, filter and queue the raw links found on `page_url`
    fn enqueue_links(&mut self, links: &[String], page_url: &CanonicalUrl, depth: usize) -> usize {
        let next_depth = depth + 1;
        if next_depth > self.frontier.max_depth() {
            return 0;
        }

        let mut queued = 0;
        for link in links {
            let Some(resolved) = canonicalize(link, page_url.as_url()) else {
                continue;
            };
            if !self.scope.should_crawl(&resolved) {
                ::log::trace!("Out of scope: {}", resolved);
                continue;
            }
            if self.frontier.push(resolved, next_depth) {
                queued += 1;
            }
        }
        queued
    }
}

pub mod canonical;
pub mod config;
pub mod crawlers;
pub mod fetcher;
pub mod filter;
pub mod frontier;
pub mod parsers;
pub mod results;
pub mod sink;

// Re-export commonly used types for convenience
pub use canonical::{CanonicalUrl, canonicalize};
pub use config::{ConfigError, CrawlConfig, LogLevel};
pub use crawlers::{CrawlOutcome, WebCrawler};
pub use fetcher::{FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use filter::{ScopeFilter, in_scope};
pub use frontier::{Frontier, FrontierItem};
pub use parsers::{HtmlParser, PageParser, ParseError};
pub use results::{Metadata, MetadataKey, MetadataValue, PageRecord};
pub use sink::{JsonFileSink, Sink, SinkError};

use thiserror::Error;

/// Failures that prevent a crawl from starting
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] FetchError),
}

/// Crawl over HTTP with the bundled HTML parser
pub async fn crawl(config: &CrawlConfig) -> Result<CrawlOutcome, Error> {
    let fetcher = HttpFetcher::from_config(config)?;
    let crawler = WebCrawler::new(config, fetcher, HtmlParser)?;
    Ok(crawler.crawl().await)
}

pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::results::PageRecord;
use thiserror::Error;

pub use html::HtmlParser;

/// Reasons a fetched document produced no record
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Capability to turn a fetched HTML document into a page record
///
/// Parsing is pure: no network I/O and no access to crawl state. The
/// returned record's `links` are the raw `href` strings, unresolved,
/// de-duplicated and in first-seen order.
pub trait PageParser: Send + Sync {
    fn parse(&self, page_url: &str, html: &str) -> Result<PageRecord, ParseError>;
}

pub mod web;

pub use web::{CrawlOutcome, WebCrawler};

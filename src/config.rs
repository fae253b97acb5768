use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading a crawl configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration must include at least one start URL in 'startUrls'")]
    NoStartUrls,

    #[error("invalid exclude pattern '{pattern}': {source}")]
    ExcludePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Log verbosity accepted in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a config value; only the lowercase level names are accepted
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_filter(self) -> ::log::LevelFilter {
        match self {
            LogLevel::Debug => ::log::LevelFilter::Debug,
            LogLevel::Info => ::log::LevelFilter::Info,
            LogLevel::Warn => ::log::LevelFilter::Warn,
            LogLevel::Error => ::log::LevelFilter::Error,
        }
    }
}

/// Configuration for a single crawl run
///
/// Every optional field has its default resolved at deserialization time,
/// so the engine never sees a missing value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlConfig {
    /// Seed URLs the crawl starts from (depth 0)
    pub start_urls: Vec<String>,

    /// Deepest BFS level that may be queued
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Upper bound on the number of page records produced
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Only follow links whose host is one of the seed hosts
    #[serde(default = "default_same_domain_only")]
    pub same_domain_only: bool,

    /// Exact hostnames that may be crawled (empty means no allow-list)
    #[serde(default)]
    pub allowed_domains: Vec<String>,

    /// Pause between successive requests, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Regex patterns for URLs that are never crawled
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Where the binary writes the collected records
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Unknown values fall back to `info` with a warning
    #[serde(default = "default_log_level", deserialize_with = "lenient_log_level")]
    pub log_level: LogLevel,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_depth() -> usize {
    2
}

fn default_max_pages() -> usize {
    50
}

fn default_same_domain_only() -> bool {
    true
}

fn default_delay_ms() -> u64 {
    500
}

fn default_output_file() -> PathBuf {
    PathBuf::from("data/sample-output.json")
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn lenient_log_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LogLevel, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(LogLevel::parse(&raw).unwrap_or_else(|| {
        ::log::warn!("Invalid log level '{}' ignored, keeping 'info'", raw);
        default_log_level()
    }))
}

fn default_user_agent() -> String {
    concat!("page-harvest/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl CrawlConfig {
    /// Create a new configuration with default values
    pub fn new<I, S>(start_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start_urls: start_urls.into_iter().map(Into::into).collect(),
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            same_domain_only: default_same_domain_only(),
            allowed_domains: Vec::new(),
            delay_ms: default_delay_ms(),
            exclude_patterns: Vec::new(),
            output_file: default_output_file(),
            log_level: default_log_level(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_urls.is_empty() {
            return Err(ConfigError::NoStartUrls);
        }
        for pattern in &self.exclude_patterns {
            regex::Regex::new(pattern).map_err(|source| ConfigError::ExcludePattern {
                pattern: pattern.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

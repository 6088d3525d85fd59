//! Dinemap: a hierarchical restaurant-directory scraper
//!
//! This crate implements a bounded-depth, three-level crawl: seed "region"
//! listing pages are walked for city-group listings, each group is walked for
//! entity URLs, and each entity's detail page is fetched and exported as one
//! CSV row. Audit trails of the URLs visited at each level are written
//! alongside the export.

pub mod config;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod scrape;

use thiserror::Error;

/// Main error type for dinemap operations
#[derive(Debug, Error)]
pub enum DinemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Host not allowed: {url}")]
    HostNotAllowed { url: String },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Run deadline exceeded")]
    DeadlineExceeded,

    #[error("Run interrupted")]
    Interrupted,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for dinemap operations
pub type Result<T> = std::result::Result<T, DinemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{Pipeline, RunSummary};
pub use scrape::{DepthCap, DepthPolicy, EntityRecord, SiteProfile};

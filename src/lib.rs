//! Paper-Trail: a polite, date-bounded crawler for preprint listings
//!
//! This crate walks the daily listing pages of a preprint index (arXiv) and
//! of a companion ranking site (SciRate), extracting per-paper metadata and
//! grouping it into one bucket per listing day.

pub mod config;
pub mod crawler;
pub mod date;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Paper-Trail operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Unexpected page structure at {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
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

    #[error("Invalid date in config: {0}")]
    InvalidDate(String),
}

/// Errors raised when a page does not have the markup the extractors expect
///
/// Every variant is fatal for the run; no field is ever defaulted.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("invalid pattern: {0}")]
    Pattern(String),

    #[error("missing {what}")]
    Missing { what: &'static str },

    #[error("malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },
}

/// Result type alias for Paper-Trail operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ArxivCrawler, ScirateCrawler};
pub use date::{CalendarDate, DateKey};
pub use output::{CrawlResult, DayBucket, PaperRecord};
pub use state::CrawlPhase;

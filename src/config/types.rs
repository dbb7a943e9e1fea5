use crate::date::CalendarDate;
use crate::url::{ListingVariant, ARXIV_BASE_URL, SCIRATE_BASE_URL};
use serde::Deserialize;

/// Main configuration structure for Paper-Trail
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub arxiv: Option<ArxivConfig>,
    #[serde(default)]
    pub scirate: Option<ScirateConfig>,
}

/// Request pacing and worker limits shared by every source
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Minimum time between any two requests (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Maximum number of item pages fetched concurrently
    #[serde(rename = "max-item-workers", default = "default_item_workers")]
    pub max_item_workers: u32,

    /// Per-request timeout handed to the HTTP client (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// How finished day buckets leave the crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Keep every bucket and return them together
    #[default]
    Accumulate,
    /// Write each bucket to its own file as soon as it is complete
    Stream,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,

    /// Directory for per-day files (stream) or the combined dump (accumulate)
    #[serde(default)]
    pub directory: Option<String>,
}

/// Preprint listing crawl settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArxivConfig {
    pub start: CalendarDate,
    pub end: CalendarDate,
    pub archive: String,

    #[serde(default)]
    pub variant: ListingVariant,

    /// Fetch each paper's abstract page for abstract, versions, size, etc.
    #[serde(default)]
    pub include_extended_fields: bool,

    /// Fetch abstract pages on a bounded worker pool
    #[serde(default)]
    pub parallel_item_fetch: bool,

    #[serde(default = "default_arxiv_base")]
    pub base_url: String,
}

/// Ranking listing crawl settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScirateConfig {
    pub start: CalendarDate,
    pub end: CalendarDate,
    pub archive: String,

    #[serde(default = "default_scirate_base")]
    pub base_url: String,
}

fn default_item_workers() -> u32 {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_arxiv_base() -> String {
    ARXIV_BASE_URL.to_string()
}

fn default_scirate_base() -> String {
    SCIRATE_BASE_URL.to_string()
}

//! Sink trait and output errors
//!
//! A sink receives each day bucket once the crawl has finished collecting
//! papers for that day.

use crate::output::records::{CrawlResult, DayBucket};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for completed day buckets
pub trait DaySink: Send {
    /// Receives one completed day; called at most once per date
    fn accept(&mut self, bucket: DayBucket) -> OutputResult<()>;

    /// Hands back the buckets kept in memory, if any
    fn take_result(&mut self) -> CrawlResult;
}

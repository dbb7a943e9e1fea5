//! Output module for crawl results
//!
//! This module handles:
//! - The record types produced by the extractors
//! - Grouping page fragments into one bucket per day
//! - Accumulating buckets in memory or streaming them to JSON files
//! - Recording crawl statistics

mod json;
mod memory;
mod merge;
mod records;
pub mod stats;
mod traits;

pub use json::{write_crawl_result, JsonDaySink};
pub use memory::MemorySink;
pub use merge::DayMerger;
pub use records::{CrawlResult, DayBucket, PaperDetails, PaperRecord};
pub use stats::{print_statistics, CrawlStats};
pub use traits::{DaySink, OutputError, OutputResult};

use crate::config::{OutputConfig, OutputMode};
use crate::crawler::Source;

/// Builds the sink selected by the output configuration
pub fn sink_for(output: &OutputConfig, source: Source) -> OutputResult<Box<dyn DaySink>> {
    match (output.mode, output.directory.as_deref()) {
        (OutputMode::Stream, Some(directory)) => {
            Ok(Box::new(JsonDaySink::new(directory, source)?))
        }
        // Validation rejects stream mode without a directory
        _ => Ok(Box::new(MemorySink::new())),
    }
}

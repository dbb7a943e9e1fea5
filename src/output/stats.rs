//! Per-run crawl statistics

use crate::crawler::Source;

/// Counters collected while a source is crawled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Listing pages fetched
    pub pages_fetched: u64,

    /// Day buckets completed
    pub days: u64,

    /// Papers kept
    pub papers: u64,

    /// Entries dropped as replaced or cross-listed
    pub skipped_entries: u64,

    /// Abstract pages fetched for extended fields
    pub detail_fetches: u64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requests sent to the site
    pub fn total_requests(&self) -> u64 {
        self.pages_fetched + self.detail_fetches
    }
}

/// Prints crawl statistics to stdout
pub fn print_statistics(source: Source, stats: &CrawlStats) {
    println!("=== {} Crawl Statistics ===\n", source.display_name());
    println!("Listing pages fetched: {}", stats.pages_fetched);
    println!("Abstract pages fetched: {}", stats.detail_fetches);
    println!("Days collected: {}", stats.days);
    println!("Papers kept: {}", stats.papers);
    println!("Entries skipped (replaced/cross-list): {}", stats.skipped_entries);
    println!();
}

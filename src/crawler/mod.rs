//! Crawler module for the listing sources
//!
//! This module contains the core crawling logic, including:
//! - Paced HTTP fetching
//! - Listing-page extraction for each source
//! - Optional abstract-page lookups
//! - The date-bounded crawl loops

pub mod arxiv;
mod coordinator;
mod details;
mod fetcher;
mod html;
mod pacer;
pub mod scirate;

#[cfg(test)]
pub(crate) mod fixtures;

pub use coordinator::{ArxivCrawler, ScirateCrawler};
pub use details::{parse_abstract_page, AbstractPageDetails, DetailSource};
pub use fetcher::{build_http_client, HttpFetcher, PacedFetcher, PageFetcher};
pub use pacer::Pacer;

use std::fmt;

/// Which listing site a crawl reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The preprint catch-up listing
    Arxiv,
    /// The ranking site
    Scirate,
}

impl Source {
    /// Identifier used in file names and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arxiv => "arxiv",
            Self::Scirate => "scirate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Arxiv => "arXiv",
            Self::Scirate => "SciRate",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

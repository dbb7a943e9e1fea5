//! Record types produced by the extractors

use crate::date::DateKey;
use serde::{Deserialize, Serialize};

/// Fields read from a paper's abstract page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDetails {
    /// Abstract text with line breaks removed
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub num_versions: usize,
    /// Weekday of the latest submission, or `"none"` if it could not be read
    pub submit_weekday: String,
    /// `HH:MM:SS` of the latest submission, or `"none"`
    pub submit_time: String,
    /// Size of the latest submission as printed (e.g. `"812kb"`)
    pub size: String,
    pub paper_link: String,
}

/// One paper as listed on a given day
///
/// `position` is the entry's index among all entries listed for that day,
/// counting the replaced and cross-listed entries that were dropped. On the
/// ranking site it is the paper's rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub position: usize,

    #[serde(flatten)]
    pub details: Option<PaperDetails>,

    /// Endorsement ("scite") count on the ranking site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scite_count: Option<u32>,
}

impl PaperRecord {
    pub fn new(title: String, authors: Vec<String>, position: usize) -> Self {
        Self {
            title,
            authors,
            position,
            details: None,
            scite_count: None,
        }
    }
}

/// All papers listed for one day, in listing order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: DateKey,
    pub papers: Vec<PaperRecord>,
}

impl DayBucket {
    pub fn new(date: DateKey, papers: Vec<PaperRecord>) -> Self {
        Self { date, papers }
    }
}

/// Day buckets in the order their dates were encountered
pub type CrawlResult = Vec<DayBucket>;

//! Abstract-page fields for the preprint listing
//!
//! When extended fields are enabled, every kept entry costs one extra
//! request to its abstract page. The lookup sits behind `DetailSource` so the
//! controller does not care whether it talks to the network or to a stub.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::html::{require, selector, text_of};
use crate::output::PaperDetails;
use crate::{CrawlError, ExtractError, ExtractResult};
use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use std::sync::Arc;

/// Written in place of weekday and time when the submission line has no date
const UNKNOWN: &str = "none";

const SUBMISSION_DATE: &str = r"\w{3}, \d+ \w{3} 20\d{2} \d{2}:\d{2}:\d{2}";
const WEEKDAY: &str = r"(Mon|Tue|Wed|Thu|Fri|Sat|Sun)";
const TIME_OF_DAY: &str = r"\d{2}:\d{2}:\d{2}";
const SIZE: &str = r"[0-9]+[a-z]b";

/// Capability for looking up a paper's extended fields
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn fetch_details(&self, abstract_url: &str) -> Result<PaperDetails, CrawlError>;
}

/// Reads extended fields from the paper's abstract page
pub struct AbstractPageDetails {
    fetcher: Arc<dyn PageFetcher>,
}

impl AbstractPageDetails {
    /// `fetcher` should be the crawl's paced fetcher
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl DetailSource for AbstractPageDetails {
    async fn fetch_details(&self, abstract_url: &str) -> Result<PaperDetails, CrawlError> {
        let body = self.fetcher.fetch(abstract_url).await?;
        parse_abstract_page(&body, abstract_url).map_err(|source| CrawlError::Extract {
            url: abstract_url.to_string(),
            source,
        })
    }
}

/// Extracts abstract, version count and latest-submission facts
pub fn parse_abstract_page(html: &str, paper_link: &str) -> ExtractResult<PaperDetails> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let abstract_text: String = text_of(require(root, &selector("blockquote")?, "abstract")?)
        .split('\n')
        .collect();

    let num_versions = root.select(&selector("b")?).count();

    let history = text_of(require(
        root,
        &selector("div.submission-history")?,
        "submission history",
    )?);
    let lines: Vec<&str> = history.split('\n').collect();
    let latest = lines
        .len()
        .checked_sub(2)
        .map(|index| lines[index])
        .ok_or_else(|| ExtractError::Malformed {
            what: "submission history",
            detail: "fewer than two lines".to_string(),
        })?;

    let (submit_weekday, submit_time) = match pattern(SUBMISSION_DATE)?.find(latest) {
        Some(stamp) => (
            first_match(WEEKDAY, stamp.as_str())?.unwrap_or_else(|| UNKNOWN.to_string()),
            first_match(TIME_OF_DAY, stamp.as_str())?.unwrap_or_else(|| UNKNOWN.to_string()),
        ),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };

    let size = first_match(SIZE, latest)?.ok_or_else(|| ExtractError::Malformed {
        what: "submission size",
        detail: format!("no size in {:?}", latest.trim()),
    })?;

    Ok(PaperDetails {
        abstract_text,
        num_versions,
        submit_weekday,
        submit_time,
        size,
        paper_link: paper_link.to_string(),
    })
}

fn pattern(re: &str) -> ExtractResult<Regex> {
    Regex::new(re).map_err(|e| ExtractError::Pattern(e.to_string()))
}

fn first_match(re: &str, haystack: &str) -> ExtractResult<Option<String>> {
    Ok(pattern(re)?
        .find(haystack)
        .map(|found| found.as_str().to_string()))
}

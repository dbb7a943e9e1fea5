//! Extractor for the ranking site's single-day listing
//!
//! Each page lists the papers of one day as `li.paper` items in rank order,
//! with a "next day" button in the page's navigation table. The page itself
//! does not carry its date; the crawl takes it from the requested URL.

use crate::crawler::html::{require, selector, text_of};
use crate::output::PaperRecord;
use crate::url::resolve_link;
use crate::{ExtractError, ExtractResult};
use scraper::Html;
use url::Url;

/// Papers on one ranking page plus the link to the following day
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SciratePage {
    pub papers: Vec<PaperRecord>,
    pub next_day: Option<String>,
}

/// Extracts ranked papers and the next-day link from a listing page
pub fn extract_listing(html: &str, page_url: &Url) -> ExtractResult<SciratePage> {
    let document = Html::parse_document(html);
    let paper_selector = selector("li.paper.tex2jax")?;
    let title_selector = selector("div.title")?;
    let authors_selector = selector("div.authors")?;
    let count_selector = selector("button.btn.btn-default.count")?;

    let mut papers = Vec::new();
    for (rank, item) in document.select(&paper_selector).enumerate() {
        let title = text_of(require(item, &title_selector, "paper title")?)
            .trim()
            .to_string();
        let authors = parse_authors(&text_of(require(item, &authors_selector, "paper authors")?));
        let scite_count = parse_count(&text_of(require(item, &count_selector, "scite count")?))?;

        let mut record = PaperRecord::new(title, authors, rank);
        record.scite_count = Some(scite_count);
        papers.push(record);
    }

    let next_day = find_next_day(&document, page_url)?;
    Ok(SciratePage { papers, next_day })
}

/// Splits a comma-separated author line
pub fn parse_authors(text: &str) -> Vec<String> {
    text.split(", ")
        .map(|author| author.trim().to_string())
        .collect()
}

fn parse_count(text: &str) -> ExtractResult<u32> {
    text.trim().parse().map_err(|_| ExtractError::Malformed {
        what: "scite count",
        detail: format!("{:?} is not a number", text.trim()),
    })
}

fn find_next_day(document: &Html, page_url: &Url) -> ExtractResult<Option<String>> {
    let next_selector = selector("td.btn-default.half.top.right a[href]")?;

    Ok(document
        .select(&next_selector)
        .next()
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| resolve_link(href, page_url)))
}

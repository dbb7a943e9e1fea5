//! Extractor for the preprint catch-up listing
//!
//! A listing page holds one `<h2>` header per day, each followed by a `<dl>`
//! of `<dt>` (identifier/meta) and `<dd>` (title/authors) pairs. The last
//! `<li>` on the page links to the next page of the listing.

use crate::crawler::html::{require, selector, text_of};
use crate::date::DateKey;
use crate::url::resolve_link;
use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Html};
use url::Url;

/// How a listing entry relates to the day it appears under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A new submission
    Normal,
    /// A new version of an older paper
    Replaced,
    /// A paper primarily filed under another archive
    CrossListed,
}

impl EntryKind {
    /// Classifies an entry from its meta text
    ///
    /// Only explicit markers exclude an entry; empty or unfamiliar text is
    /// treated as a normal submission.
    pub fn classify(meta_text: &str) -> Self {
        let lowered = meta_text.to_lowercase();
        if lowered.contains("replaced") {
            Self::Replaced
        } else if lowered.contains("cross-list") {
            Self::CrossListed
        } else {
            Self::Normal
        }
    }
}

/// A kept entry, before any abstract-page fields are added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArxivEntry {
    pub title: String,
    pub authors: Vec<String>,
    /// Index among all entries under the day, skipped ones included
    pub position: usize,
    /// Absolute link to the abstract page, when the entry has one
    pub abstract_url: Option<String>,
}

/// Entries listed under one day header on one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArxivDay {
    pub date: DateKey,
    pub entries: Vec<ArxivEntry>,
    /// Replaced and cross-listed entries dropped from this day
    pub skipped: usize,
}

/// Everything a listing page contributes to the crawl
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArxivPage {
    pub days: Vec<ArxivDay>,
    /// Next page to fetch; `None` ends the crawl
    pub next_page: Option<String>,
}

/// Extracts the days on a listing page up to and including `end`
///
/// A page without day headers ends the crawl. A header dated after `end`
/// stops extraction at that header and ends the crawl, whatever pagination
/// the page offers.
pub fn extract_listing(html: &str, page_url: &Url, end: &DateKey) -> ExtractResult<ArxivPage> {
    let document = Html::parse_document(html);
    let header_selector = selector("h2")?;
    let anchor_selector = selector("a[name]")?;

    let headers: Vec<ElementRef<'_>> = document.select(&header_selector).collect();
    if headers.is_empty() {
        return Ok(ArxivPage::default());
    }

    let mut days = Vec::with_capacity(headers.len());
    for header in headers {
        let date = require(header, &anchor_selector, "date anchor in day header")?
            .value()
            .attr("name")
            .map(DateKey::from_raw)
            .ok_or(ExtractError::Missing {
                what: "date anchor name",
            })?;

        if &date > end {
            tracing::debug!("Reached {} past end boundary {}", date, end);
            return Ok(ArxivPage {
                days,
                next_page: None,
            });
        }

        let block = header
            .next_siblings()
            .find_map(ElementRef::wrap)
            .ok_or(ExtractError::Missing {
                what: "entry list after day header",
            })?;

        let (entries, skipped) = extract_entries(block, page_url)?;
        days.push(ArxivDay {
            date,
            entries,
            skipped,
        });
    }

    let next_page = find_next_page(&document, page_url)?;
    Ok(ArxivPage { days, next_page })
}

/// Classifies and extracts every entry in a day's `<dl>` block
///
/// Returns the kept entries and the number skipped.
fn extract_entries(block: ElementRef<'_>, page_url: &Url) -> ExtractResult<(Vec<ArxivEntry>, usize)> {
    let meta_selector = selector("dt")?;
    let content_selector = selector("dd")?;
    let identifier_selector = selector("span.list-identifier")?;
    let abstract_selector = selector(r#"a[title="Abstract"]"#)?;
    let title_selector = selector("div.list-title")?;
    let authors_selector = selector("div.list-authors")?;

    let metas = block.select(&meta_selector);
    let contents = block.select(&content_selector);

    let mut entries = Vec::new();
    let mut skipped = 0;

    for (position, (meta, content)) in metas.zip(contents).enumerate() {
        let identifier = meta.select(&identifier_selector).next();
        let meta_text = text_of(identifier.unwrap_or(meta));

        let kind = EntryKind::classify(&meta_text);
        if kind != EntryKind::Normal {
            tracing::trace!("Skipping {:?} entry at position {}", kind, position);
            skipped += 1;
            continue;
        }

        let title = parse_title(&text_of(require(content, &title_selector, "title block")?))?;
        let authors = parse_authors(&text_of(require(
            content,
            &authors_selector,
            "author block",
        )?));

        let abstract_url = meta
            .select(&abstract_selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .and_then(|href| resolve_link(href, page_url));

        entries.push(ArxivEntry {
            title,
            authors,
            position,
            abstract_url,
        });
    }

    Ok((entries, skipped))
}

/// Takes the text after the `Title: ` marker, up to the first line break
pub fn parse_title(text: &str) -> ExtractResult<String> {
    let (_, rest) = text.split_once("Title: ").ok_or_else(|| ExtractError::Malformed {
        what: "title block",
        detail: format!("no 'Title: ' marker in {:?}", text.trim()),
    })?;

    Ok(rest.split('\n').next().unwrap_or_default().trim().to_string())
}

/// Splits an author block into names
///
/// The block's text is split into lines; the first two (leading break and
/// the "Authors:" descriptor) and the last (trailing break) are dropped, and
/// each remaining line is cut at its first comma.
pub fn parse_authors(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 3 {
        return Vec::new();
    }

    lines[2..lines.len() - 1]
        .iter()
        .map(|line| line.split(',').next().unwrap_or_default().trim().to_string())
        .collect()
}

/// Follows the link in the last list item on the page, if there is one
fn find_next_page(document: &Html, page_url: &Url) -> ExtractResult<Option<String>> {
    let item_selector = selector("li")?;
    let link_selector = selector("a[href]")?;

    let next_page = document
        .select(&item_selector)
        .last()
        .and_then(|item| item.select(&link_selector).next())
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| resolve_link(href, page_url));

    if next_page.is_none() {
        tracing::warn!("No pagination link on {}, treating it as the last page", page_url);
    }

    Ok(next_page)
}

//! Crawl controllers - the date-bounded listing loops
//!
//! Each source has one controller that drives
//! `Start -> Fetching -> Extracting -> Deciding -> {Fetching | Done | Failed}`:
//! - Building the start URL from the configured start date
//! - Fetching one listing page at a time through the shared pacer
//! - Extracting day fragments and merging them into day buckets
//! - Deciding whether another page is needed from the end date and the
//!   page's continuation link
//!
//! The first error ends the run. Buckets already handed to a streaming sink
//! stay where they were written.

use crate::config::{ArxivConfig, CrawlerConfig, ScirateConfig, UserAgentConfig};
use crate::crawler::arxiv::{self, ArxivEntry};
use crate::crawler::details::{AbstractPageDetails, DetailSource};
use crate::crawler::fetcher::{build_http_client, HttpFetcher, PacedFetcher, PageFetcher};
use crate::crawler::pacer::Pacer;
use crate::crawler::scirate;
use crate::date::DateKey;
use crate::output::{CrawlResult, CrawlStats, DayMerger, DaySink, PaperDetails, PaperRecord};
use crate::state::{CrawlPhase, PhaseTracker};
use crate::url::{arxiv_listing_url, listing_date_from_url, scirate_listing_url};
use crate::{CrawlError, ExtractError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Wraps `fetcher` in the pacer every request of one crawl goes through
fn paced(fetcher: Arc<dyn PageFetcher>, crawler: &CrawlerConfig) -> Arc<dyn PageFetcher> {
    let pacer = Arc::new(Pacer::from_millis(crawler.delay_ms));
    Arc::new(PacedFetcher::new(fetcher, pacer))
}

fn http_fetcher(user_agent: &UserAgentConfig, crawler: &CrawlerConfig) -> Result<Arc<dyn PageFetcher>> {
    let client = build_http_client(user_agent, crawler.request_timeout_secs)?;
    Ok(Arc::new(HttpFetcher::new(client)))
}

/// Crawler for the preprint catch-up listing
pub struct ArxivCrawler {
    config: ArxivConfig,
    fetcher: Arc<dyn PageFetcher>,
    details: Arc<dyn DetailSource>,
    max_item_workers: usize,
    phase: PhaseTracker,
    stats: CrawlStats,
}

impl ArxivCrawler {
    /// Creates a crawler whose requests, abstract pages included, share one pacer
    pub fn new(config: ArxivConfig, crawler: &CrawlerConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let fetcher = paced(fetcher, crawler);
        let details: Arc<dyn DetailSource> = Arc::new(AbstractPageDetails::new(fetcher.clone()));

        Self {
            config,
            fetcher,
            details,
            max_item_workers: crawler.max_item_workers.max(1) as usize,
            phase: PhaseTracker::new(),
            stats: CrawlStats::new(),
        }
    }

    /// Creates a crawler that talks to the live site
    pub fn with_http(
        config: ArxivConfig,
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self> {
        Ok(Self::new(config, crawler, http_fetcher(user_agent, crawler)?))
    }

    /// Replaces the abstract-page lookup
    pub fn with_detail_source(mut self, details: Arc<dyn DetailSource>) -> Self {
        self.details = details;
        self
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase.current()
    }

    /// Counters from the most recent run
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Crawls from the start date through the end date into `sink`
    pub async fn run(&mut self, sink: Box<dyn DaySink>) -> Result<CrawlResult> {
        self.phase = PhaseTracker::new();
        self.stats = CrawlStats::new();

        let outcome = self.crawl(sink).await;
        if let Err(e) = &outcome {
            tracing::error!("arXiv crawl failed in phase {}: {}", self.phase.current(), e);
            if !self.phase.current().is_terminal() {
                self.phase.advance(CrawlPhase::Failed)?;
            }
        }
        outcome
    }

    async fn crawl(&mut self, sink: Box<dyn DaySink>) -> Result<CrawlResult> {
        let end = self.config.end.key();
        let mut merger = DayMerger::new(sink);
        let mut next = Some(arxiv_listing_url(
            &self.config.base_url,
            &self.config.start,
            &self.config.archive,
            self.config.variant,
        ));

        tracing::info!(
            "Crawling arXiv {} from {} to {}",
            self.config.archive,
            self.config.start,
            self.config.end
        );

        while let Some(url) = next.take() {
            self.phase.advance(CrawlPhase::Fetching)?;
            let body = self.fetcher.fetch(&url).await?;
            self.stats.pages_fetched += 1;

            self.phase.advance(CrawlPhase::Extracting)?;
            let page_url = Url::parse(&url)?;
            let page = arxiv::extract_listing(&body, &page_url, &end).map_err(|source| {
                CrawlError::Extract {
                    url: url.clone(),
                    source,
                }
            })?;

            for day in page.days {
                self.stats.skipped_entries += day.skipped as u64;
                let papers = self.complete_entries(&url, day.entries).await?;
                self.stats.papers += papers.len() as u64;
                merger.push(day.date, papers)?;
            }

            self.phase.advance(CrawlPhase::Deciding)?;
            next = page.next_page;
        }

        let result = merger.finish()?;
        self.stats.days = merger.days_emitted() as u64;
        self.phase.advance(CrawlPhase::Done)?;

        tracing::info!(
            "arXiv crawl finished: {} days, {} papers, {} requests",
            self.stats.days,
            self.stats.papers,
            self.stats.total_requests()
        );
        Ok(result)
    }

    /// Turns kept entries into records, adding abstract-page fields if enabled
    async fn complete_entries(
        &mut self,
        page_url: &str,
        entries: Vec<ArxivEntry>,
    ) -> Result<Vec<PaperRecord>> {
        if !self.config.include_extended_fields {
            return Ok(entries
                .into_iter()
                .map(|entry| PaperRecord::new(entry.title, entry.authors, entry.position))
                .collect());
        }

        let links = entries
            .iter()
            .map(|entry| {
                entry.abstract_url.clone().ok_or_else(|| CrawlError::Extract {
                    url: page_url.to_string(),
                    source: ExtractError::Missing {
                        what: "abstract link",
                    },
                })
            })
            .collect::<Result<Vec<String>>>()?;

        let details = if self.config.parallel_item_fetch {
            fetch_details_parallel(self.details.clone(), &links, self.max_item_workers).await?
        } else {
            let mut details = Vec::with_capacity(links.len());
            for link in &links {
                details.push(self.details.fetch_details(link).await?);
            }
            details
        };
        self.stats.detail_fetches += links.len() as u64;

        Ok(entries
            .into_iter()
            .zip(details)
            .map(|(entry, details)| {
                let mut record = PaperRecord::new(entry.title, entry.authors, entry.position);
                record.details = Some(details);
                record
            })
            .collect())
    }
}

/// Fetches abstract pages on at most `workers` tasks, keeping input order
///
/// Pacing still applies: every task's requests go through the crawl's pacer.
async fn fetch_details_parallel(
    details: Arc<dyn DetailSource>,
    links: &[String],
    workers: usize,
) -> Result<Vec<PaperDetails>> {
    let permits = Arc::new(Semaphore::new(workers));
    let mut tasks = JoinSet::new();

    for (index, link) in links.iter().cloned().enumerate() {
        let details = details.clone();
        let permits = permits.clone();
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();
            details
                .fetch_details(&link)
                .await
                .map(|found| (index, found))
        });
    }

    let mut slots: Vec<Option<PaperDetails>> = vec![None; links.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, found) = joined??;
        slots[index] = Some(found);
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Crawler for the ranking site's day-by-day listing
pub struct ScirateCrawler {
    config: ScirateConfig,
    fetcher: Arc<dyn PageFetcher>,
    phase: PhaseTracker,
    stats: CrawlStats,
}

impl ScirateCrawler {
    pub fn new(config: ScirateConfig, crawler: &CrawlerConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config,
            fetcher: paced(fetcher, crawler),
            phase: PhaseTracker::new(),
            stats: CrawlStats::new(),
        }
    }

    /// Creates a crawler that talks to the live site
    pub fn with_http(
        config: ScirateConfig,
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self> {
        Ok(Self::new(config, crawler, http_fetcher(user_agent, crawler)?))
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase.current()
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Crawls day pages until the next day falls after the end date
    pub async fn run(&mut self, sink: Box<dyn DaySink>) -> Result<CrawlResult> {
        self.phase = PhaseTracker::new();
        self.stats = CrawlStats::new();

        let outcome = self.crawl(sink).await;
        if let Err(e) = &outcome {
            tracing::error!("SciRate crawl failed in phase {}: {}", self.phase.current(), e);
            if !self.phase.current().is_terminal() {
                self.phase.advance(CrawlPhase::Failed)?;
            }
        }
        outcome
    }

    async fn crawl(&mut self, sink: Box<dyn DaySink>) -> Result<CrawlResult> {
        let end = self.config.end.key();
        let mut merger = DayMerger::new(sink);
        let mut next = Some(scirate_listing_url(
            &self.config.base_url,
            &self.config.start,
            &self.config.archive,
        ));

        tracing::info!(
            "Crawling SciRate {} from {} to {}",
            self.config.archive,
            self.config.start,
            self.config.end
        );

        while let Some(url) = next.take() {
            let date = listing_day(&url)?;
            if date > end {
                tracing::debug!("Next day {} is past {}, stopping", date, end);
                break;
            }

            self.phase.advance(CrawlPhase::Fetching)?;
            let body = self.fetcher.fetch(&url).await?;
            self.stats.pages_fetched += 1;

            self.phase.advance(CrawlPhase::Extracting)?;
            let page_url = Url::parse(&url)?;
            let page = scirate::extract_listing(&body, &page_url).map_err(|source| {
                CrawlError::Extract {
                    url: url.clone(),
                    source,
                }
            })?;

            if page.papers.is_empty() {
                tracing::debug!("No papers listed for {}, moving on", date);
            } else {
                self.stats.papers += page.papers.len() as u64;
                merger.push(date, page.papers)?;
            }

            self.phase.advance(CrawlPhase::Deciding)?;
            next = page.next_day;
            if next.is_none() {
                tracing::warn!("No next-day link on {}, treating it as the last page", url);
            }
        }

        let result = merger.finish()?;
        self.stats.days = merger.days_emitted() as u64;
        self.phase.advance(CrawlPhase::Done)?;

        tracing::info!(
            "SciRate crawl finished: {} days, {} papers, {} requests",
            self.stats.days,
            self.stats.papers,
            self.stats.total_requests()
        );
        Ok(result)
    }
}

/// Day a ranking-site URL lists, taken from its `date` query parameter
fn listing_day(url: &str) -> Result<DateKey> {
    listing_date_from_url(url)
        .map(|date| date.key())
        .ok_or_else(|| CrawlError::Extract {
            url: url.to_string(),
            source: ExtractError::Malformed {
                what: "listing url",
                detail: "no date query parameter".to_string(),
            },
        })
}

//! Crawl phase definitions for the listing loop
//!
//! A crawl moves `Start -> Fetching -> Extracting -> Deciding` and then either
//! loops back to `Fetching` or ends in `Done`. Any active phase may fall into
//! `Failed` on an unrecovered error. A crawl whose range is empty goes
//! straight from `Start` to `Done`.
use crate::CrawlError;
use std::fmt;

/// Represents the current phase of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Start URL built, nothing fetched yet
    Start,

    /// Waiting on the pacer or the fetcher
    Fetching,

    /// Turning a fetched page into day fragments
    Extracting,

    /// Choosing whether another page is needed
    Deciding,

    /// All pages within the date range consumed
    Done,

    /// Aborted on the first unrecovered error
    Failed,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the crawl may move from this phase to `next`
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;

        match (self, next) {
            (Start, Fetching) | (Start, Done) => true,
            (Fetching, Extracting) => true,
            (Extracting, Deciding) => true,
            (Deciding, Fetching) | (Deciding, Done) => true,
            (Start | Fetching | Extracting | Deciding, Failed) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Deciding => "deciding",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the current phase and rejects transitions the machine does not allow
#[derive(Debug)]
pub struct PhaseTracker {
    current: CrawlPhase,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            current: CrawlPhase::Start,
        }
    }

    pub fn current(&self) -> CrawlPhase {
        self.current
    }

    /// Moves to `next`, or reports the invalid transition
    pub fn advance(&mut self, next: CrawlPhase) -> Result<(), CrawlError> {
        if !self.current.can_transition_to(next) {
            return Err(CrawlError::InvalidTransition {
                from: self.current,
                to: next,
            });
        }
        tracing::trace!("Crawl phase {} -> {}", self.current, next);
        self.current = next;
        Ok(())
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the phases a single source crawl moves through
//! - `PhaseTracker`: enforces the allowed transitions between phases

mod phase;

pub use phase::{CrawlPhase, PhaseTracker};

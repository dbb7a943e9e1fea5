//! URL handling module for Paper-Trail
//!
//! This module builds the first listing URL for each source, resolves the
//! relative pagination links found on listing pages, and recovers the
//! listing day from a ranking-site URL.

mod listing;
mod resolve;

pub use listing::{arxiv_listing_url, scirate_listing_url, ListingVariant};
pub use resolve::{listing_date_from_url, resolve_link};

/// Default origin of the preprint index
pub const ARXIV_BASE_URL: &str = "https://arxiv.org";

/// Default origin of the ranking site
pub const SCIRATE_BASE_URL: &str = "https://scirate.com";

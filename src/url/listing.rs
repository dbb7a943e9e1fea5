use crate::date::CalendarDate;
use serde::Deserialize;
use std::fmt;

/// Number of entries requested per preprint listing page
const ARXIV_PAGE_SIZE: u32 = 50;

/// Which flavour of the preprint catch-up listing to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingVariant {
    /// Listing pages include abstracts inline
    With,
    /// Titles and authors only
    #[default]
    Without,
}

impl ListingVariant {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::With => "with",
            Self::Without => "without",
        }
    }
}

impl fmt::Display for ListingVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// Builds the catch-up listing URL for the preprint index
///
/// The archive is inserted as given; callers are expected to pass an
/// identifier such as `quant-ph`.
///
/// # Example
///
/// ```
/// use paper_trail::date::CalendarDate;
/// use paper_trail::url::{arxiv_listing_url, ListingVariant};
///
/// let url = arxiv_listing_url(
///     "https://arxiv.org",
///     &CalendarDate::new(2018, 3, 1),
///     "quant-ph",
///     ListingVariant::Without,
/// );
/// assert_eq!(
///     url,
///     "https://arxiv.org/catchup?smonth=03&sday=01&group=grp_&archive=quant-ph&num=50&method=without&syear=2018"
/// );
/// ```
pub fn arxiv_listing_url(
    base: &str,
    date: &CalendarDate,
    archive: &str,
    variant: ListingVariant,
) -> String {
    format!(
        "{}/catchup?smonth={:02}&sday={:02}&group=grp_&archive={}&num={}&method={}&syear={}",
        base.trim_end_matches('/'),
        date.month,
        date.day,
        archive,
        ARXIV_PAGE_SIZE,
        variant.as_query_value(),
        date.year
    )
}

/// Builds the single-day listing URL for the ranking site
///
/// # Example
///
/// ```
/// use paper_trail::date::CalendarDate;
/// use paper_trail::url::scirate_listing_url;
///
/// let url = scirate_listing_url("https://scirate.com", &CalendarDate::new(2018, 4, 9), "quant-ph");
/// assert_eq!(url, "https://scirate.com/arxiv/quant-ph?date=2018-04-09&range=1");
/// ```
pub fn scirate_listing_url(base: &str, date: &CalendarDate, archive: &str) -> String {
    format!(
        "{}/arxiv/{}?date={}&range=1",
        base.trim_end_matches('/'),
        archive,
        date.iso()
    )
}

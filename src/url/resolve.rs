use crate::date::CalendarDate;
use url::Url;

/// Resolves a link href found on a listing page to an absolute URL
///
/// Returns None if the link cannot be followed:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, data: links
/// - hrefs that do not resolve to HTTP(S)
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Reads the listing day from the `date=YYYY-MM-DD` query parameter
///
/// Ranking-site pages do not state their own date in a reliable place, so
/// the crawl takes it from the URL it requested.
pub fn listing_date_from_url(url: &str) -> Option<CalendarDate> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "date")
        .and_then(|(_, value)| CalendarDate::parse_iso(&value))
}

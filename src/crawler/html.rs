//! Small helpers over `scraper` shared by the extractors

use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Selector};

/// Parses a CSS selector, reporting failures as extraction errors
pub(crate) fn selector(css: &str) -> ExtractResult<Selector> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css.to_string()))
}

/// Concatenated text of an element and all its descendants
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// First descendant matching `selector`, or a `Missing` error naming `what`
pub(crate) fn require<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    what: &'static str,
) -> ExtractResult<ElementRef<'a>> {
    scope
        .select(selector)
        .next()
        .ok_or(ExtractError::Missing { what })
}

//! Pure listing-page parsing
//!
//! Turns one listing page's HTML into leaf URLs, an optional next-page URL,
//! and the page's branch key. No network access; the walker composes these
//! results across pages.

use crate::scrape::selectors::ListingSelectors;
use crate::{DinemapError, Result};
use scraper::{Html, Selector};
use url::Url;

/// One parsed listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute leaf URLs in document order
    pub leaf_urls: Vec<String>,

    /// Absolute URL of the next listing page, if the page links one
    pub next_page: Option<String>,

    /// The page's branch key text (empty if the level has no branch key)
    pub branch_key: String,
}

/// Parses a listing page's HTML
///
/// Leaf and next-page hrefs are resolved against `base_url`, so relative site
/// links come out absolute. A next-page link that resolves to nothing is
/// treated as absent.
///
/// # Arguments
///
/// * `html` - The page body
/// * `selectors` - The selector set for this hierarchy level
/// * `base_url` - Base URL for relative link resolution
///
/// # Returns
///
/// * `Ok(ListingPage)` - The parsed page
/// * `Err(DinemapError)` - A selector in the set failed to parse
pub fn parse_listing(
    html: &str,
    selectors: &ListingSelectors,
    base_url: &Url,
) -> Result<ListingPage> {
    let document = Html::parse_document(html);

    let leaf_selector = parse_selector(&selectors.leaf_links)?;
    let next_selector = parse_selector(&selectors.next_page)?;

    let mut leaf_urls = Vec::new();
    for element in document.select(&leaf_selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute) = resolve_href(href, base_url) {
                leaf_urls.push(absolute);
            }
        }
    }

    let next_page = document
        .select(&next_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| resolve_href(href, base_url));

    let branch_key = match &selectors.branch_key {
        Some(branch_selector) => {
            let branch_selector = parse_selector(branch_selector)?;
            document
                .select(&branch_selector)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
                .unwrap_or_default()
        }
        None => String::new(),
    };

    Ok(ListingPage {
        leaf_urls,
        next_page,
        branch_key,
    })
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| DinemapError::Selector(format!("'{}': {}", selector, e)))
}

/// Resolves an href to an absolute HTTP(S) URL
///
/// Returns None for empty hrefs, unresolvable ones, and non-HTTP schemes.
fn resolve_href(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

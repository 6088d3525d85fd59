//! Entity detail record extraction
//!
//! Maps a fetched detail page into an [`EntityRecord`]. Extraction is
//! best-effort per field: a selector that matches nothing yields an empty
//! string, never an error. The one hard failure mode is the encoded website
//! blob, which is logged and leaves only that field empty.

use crate::scrape::listing::parse_selector;
use crate::scrape::selectors::DetailSelectors;
use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use scraper::{Html, Selector};
use serde::Serialize;

/// One extracted entity, exported as one CSV row
///
/// `source_url` is the fetch key and always present; every other field
/// defaults to empty when the page lacks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub name: String,
    pub address: String,
    pub website: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "url")]
    pub source_url: String,
}

impl EntityRecord {
    /// A record carrying only its source URL, all extracted fields empty
    pub fn empty(source_url: &str) -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            website: String::new(),
            email: String::new(),
            phone: String::new(),
            source_url: source_url.to_string(),
        }
    }
}

/// Extracts an entity record from a detail page
///
/// # Arguments
///
/// * `html` - The detail page body
/// * `source_url` - The URL the page was fetched from
/// * `selectors` - The detail field selector set
///
/// # Returns
///
/// * `Ok(EntityRecord)` - The extracted record (fields empty where absent)
/// * `Err(DinemapError)` - A selector in the set failed to parse
pub fn extract_record(
    html: &str,
    source_url: &str,
    selectors: &DetailSelectors,
) -> Result<EntityRecord> {
    let document = Html::parse_document(html);

    let mut record = EntityRecord::empty(source_url);
    record.name = select_text(&document, &parse_selector(&selectors.name)?);
    record.address = select_text(&document, &parse_selector(&selectors.address)?);
    record.phone = select_text(&document, &parse_selector(&selectors.phone)?);

    let website_selector = parse_selector(&selectors.website)?;
    if let Some(encoded) = document
        .select(&website_selector)
        .next()
        .and_then(|element| element.value().attr("data-encoded-url"))
    {
        match decode_encoded_website(encoded) {
            Some(website) => record.website = website,
            None => {
                tracing::warn!("Malformed encoded website value on {}", source_url);
            }
        }
    }

    let email_selector = parse_selector(&selectors.email)?;
    if let Some(href) = document
        .select(&email_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
    {
        record.email = clean_mailto(href);
    }

    Ok(record)
}

fn select_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Decodes the site's obfuscated website attribute
///
/// The attribute holds a base64-encoded blob whose `_`-delimited second field
/// is the destination URL. Returns None when the blob fails to decode or has
/// no second field.
pub fn decode_encoded_website(encoded: &str) -> Option<String> {
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let mut fields = decoded.split(|b| *b == b'_');
    let destination = fields.nth(1)?;
    let destination = std::str::from_utf8(destination).ok()?;

    if destination.is_empty() {
        None
    } else {
        Some(destination.to_string())
    }
}

/// Strips the `mailto:` prefix and any trailing `?subject=...` fragment
fn clean_mailto(href: &str) -> String {
    let email = href.strip_prefix("mailto:").unwrap_or(href);
    match email.split_once('?') {
        Some((address, _)) => address.to_string(),
        None => email.to_string(),
    }
}

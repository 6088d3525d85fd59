//! Traversal and extraction: the crawl's core
//!
//! This module contains the recursive listing walker, the per-branch depth
//! policy that bounds it, the pure listing-page parser, and the detail-record
//! extractor. All parsing is pure and testable against HTML fixtures; only
//! the walker touches the fetch adapter.

mod depth;
mod listing;
mod record;
mod selectors;
mod walker;

pub use depth::{DepthCap, DepthPolicy};
pub use listing::{parse_listing, ListingPage};
pub use record::{decode_encoded_website, extract_record, EntityRecord};
pub use selectors::{DetailSelectors, ListingSelectors, SiteProfile};
pub use walker::{walk_listing, walk_region, RegionWalk, WalkOutcome};

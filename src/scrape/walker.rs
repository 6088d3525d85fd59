//! Recursive listing walker
//!
//! Walks one paginated listing branch depth-first: fetch a page, collect its
//! leaf URLs, and if a next-page link exists ask the depth policy whether to
//! follow it. Page results concatenate in page order (page N's leaves before
//! page N+1's). Fetch or parse failure of a page contributes zero leaves and
//! never aborts the parent walk.

use crate::fetch::Fetcher;
use crate::scrape::depth::DepthPolicy;
use crate::scrape::listing::parse_listing;
use crate::scrape::selectors::{ListingSelectors, SiteProfile};
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Result of walking one listing branch
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Leaf URLs from every visited page, depth-first by page number
    pub leaf_urls: Vec<String>,

    /// The deepest next-page URL seen (diagnostic; present when the walk
    /// stopped at a cap with more pages available)
    pub last_next_page: Option<String>,

    /// Branch key of the first visited page
    pub branch_key: String,
}

/// Result of walking a region's group listing
#[derive(Debug, Clone, Default)]
pub struct RegionWalk {
    /// Group URLs discovered across the region's listing pages
    pub group_urls: Vec<String>,

    /// URL of the region's second listing page, if the first page linked one
    pub second_page: Option<String>,
}

/// Walks a paginated listing starting at `url`
///
/// Recursive: each continuation page is one deeper call, which keeps the
/// stop-at-cap decision local to the single next-page branch. The policy's
/// counter for the page's branch key is incremented once per followed link,
/// before the recursive call.
pub fn walk_listing<'a>(
    fetcher: &'a Fetcher,
    url: String,
    selectors: &'a ListingSelectors,
    base_url: &'a Url,
    policy: &'a DepthPolicy,
) -> Pin<Box<dyn Future<Output = WalkOutcome> + Send + 'a>> {
    Box::pin(async move {
        let body = match fetcher.fetch_page(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Skipping listing page {}: {}", url, e);
                return WalkOutcome::default();
            }
        };

        let page = match parse_listing(&body, selectors, base_url) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to parse listing page {}: {}", url, e);
                return WalkOutcome::default();
            }
        };

        let mut outcome = WalkOutcome {
            leaf_urls: page.leaf_urls,
            last_next_page: page.next_page.clone(),
            branch_key: page.branch_key,
        };

        if let Some(next_page) = page.next_page {
            if policy.should_continue(&outcome.branch_key) {
                policy.increment(&outcome.branch_key);
                let deeper =
                    walk_listing(fetcher, next_page, selectors, base_url, policy).await;
                outcome.leaf_urls.extend(deeper.leaf_urls);
                if deeper.last_next_page.is_some() {
                    outcome.last_next_page = deeper.last_next_page;
                }
            } else {
                tracing::debug!(
                    "Depth cap reached for branch '{}', not visiting {}",
                    outcome.branch_key,
                    next_page
                );
            }
        }

        outcome
    })
}

/// Walks a region's group listing, starting from its structurally distinct
/// first page
///
/// The first page uses its own selector set and separately reports the URL
/// of page two; pages two onward are a normal [`walk_listing`] with the
/// following-pages selectors. Group discovery shares one run-wide counter
/// (the empty branch key), so the groups cap spans the whole region walk.
pub async fn walk_region(
    fetcher: &Fetcher,
    seed_url: &str,
    profile: &SiteProfile,
    policy: &DepthPolicy,
) -> RegionWalk {
    let body = match fetcher.fetch_page(seed_url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Skipping region {}: {}", seed_url, e);
            return RegionWalk::default();
        }
    };

    let first_page = match parse_listing(&body, &profile.region_first_page, &profile.base_url) {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Failed to parse region page {}: {}", seed_url, e);
            return RegionWalk::default();
        }
    };

    let mut walk = RegionWalk {
        group_urls: first_page.leaf_urls,
        second_page: first_page.next_page,
    };

    if let Some(second_page) = walk.second_page.clone() {
        if policy.should_continue("") {
            policy.increment("");
            let rest = walk_listing(
                fetcher,
                second_page,
                &profile.region_following_pages,
                &profile.base_url,
                policy,
            )
            .await;
            walk.group_urls.extend(rest.leaf_urls);
        }
    }

    walk
}

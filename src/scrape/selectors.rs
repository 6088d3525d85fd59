//! Per-level CSS selector sets for the target site
//!
//! Selector strings are site markup, not crawl logic: they are kept here as
//! data so tests can substitute a profile matching their own fixtures.

use url::Url;

/// Selectors for one paginated listing level
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    /// Matches the anchor elements whose hrefs are this level's leaf URLs
    pub leaf_links: String,

    /// Matches the anchor element linking to the next listing page
    pub next_page: String,

    /// Matches the element whose text is the branch key for depth accounting
    /// (None at levels that share a single run-wide counter)
    pub branch_key: Option<String>,
}

/// Selectors for the entity detail page fields
#[derive(Debug, Clone)]
pub struct DetailSelectors {
    pub name: String,
    pub address: String,
    /// Element carrying the base64-encoded website URL in `data-encoded-url`
    pub website: String,
    /// Anchor element whose href is a `mailto:` link
    pub email: String,
    pub phone: String,
}

/// Everything site-specific in one place: the base URL that relative links
/// resolve against, plus the selector sets for each hierarchy level.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub base_url: Url,

    /// A region's first listing page (structurally different from later ones)
    pub region_first_page: ListingSelectors,

    /// A region's second and subsequent listing pages
    pub region_following_pages: ListingSelectors,

    /// A group's entity listing pages (branch-keyed by the page heading)
    pub group_listing: ListingSelectors,

    pub detail: DetailSelectors,
}

impl SiteProfile {
    /// The default profile for the restaurant directory site
    pub fn restaurant_directory(base_url: Url) -> Self {
        Self {
            base_url,
            region_first_page: ListingSelectors {
                leaf_links: "#BROAD_GRID .geo_name a".to_string(),
                next_page: r#".pageNumbers a[data-page-number="2"]"#.to_string(),
                branch_key: None,
            },
            region_following_pages: ListingSelectors {
                leaf_links: ".geoList li a".to_string(),
                next_page: ".deckTools.btm .pgLinks a.sprite-pageNext".to_string(),
                branch_key: None,
            },
            group_listing: ListingSelectors {
                leaf_links: r#".YtrWs[data-test-target="restaurants-list"] .YHnoF.Gi.o:not([data-test="SL_list_item"]) .RfBGI a"#
                    .to_string(),
                next_page: ".pagination .nav.next".to_string(),
                branch_key: Some("#HEADING".to_string()),
            },
            detail: DetailSelectors {
                name: ".acKDw h1.HjBfq".to_string(),
                address: ".xLvvm:nth-of-type(3) .kDZhm:nth-of-type(1) span:nth-of-type(2) a .yEWoV"
                    .to_string(),
                website: ".xLvvm:nth-of-type(3) .f .f .YnKZo[data-encoded-url]".to_string(),
                email: ".xLvvm:nth-of-type(3) .f .f .IdiaP:nth-of-type(2) a".to_string(),
                phone: ".xLvvm:nth-of-type(3) .f:nth-of-type(4)".to_string(),
            },
        }
    }
}

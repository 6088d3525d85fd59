//! Pipeline orchestrator
//!
//! Drives the three-level traversal: seed regions are walked for group URLs,
//! groups are walked for entity URLs, and each entity's detail page is
//! fetched and exported. Audit trails and the CSV export are written as the
//! run progresses; nothing is buffered until the end.

mod seeds;

pub use seeds::read_seed_urls;

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::output::{AuditWriter, CsvExport};
use crate::scrape::{
    extract_record, walk_listing, walk_region, DepthCap, DepthPolicy, EntityRecord, SiteProfile,
};
use crate::Result;
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::time::{Duration, Instant};
use url::Url;

/// Counts reported at the end of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Seed URLs read from the seed file
    pub regions_read: usize,

    /// Group URLs discovered across all regions
    pub groups_discovered: usize,

    /// Entity URLs discovered, accumulated across all groups
    pub entities_discovered: usize,

    /// Records appended to the CSV export
    pub records_exported: usize,

    /// Detail pages that failed to fetch (exported with only the source URL)
    pub fetch_failures: usize,

    pub elapsed: Duration,
}

/// The full crawl, wired together from configuration
pub struct Pipeline {
    config: Config,
    profile: SiteProfile,
    listing_fetcher: Fetcher,
    detail_fetcher: Fetcher,
    group_policy: DepthPolicy,
    entity_policy: DepthPolicy,
}

impl Pipeline {
    /// Creates a pipeline with the default site profile
    pub fn new(config: Config) -> Result<Self> {
        let base_url = Url::parse(&config.site.base_url)?;
        let profile = SiteProfile::restaurant_directory(base_url);
        Self::with_profile(config, profile)
    }

    /// Creates a pipeline with an explicit site profile
    ///
    /// Tests use this to point the pipeline at fixture markup.
    pub fn with_profile(config: Config, profile: SiteProfile) -> Result<Self> {
        let listing_fetcher = Fetcher::new(&config.fetch)?;
        let detail_fetcher = Fetcher::with_pacing(&config.fetch)?;
        let group_policy = DepthPolicy::new(DepthCap::from_config(config.crawl.max_group_pages));
        let entity_policy = DepthPolicy::new(DepthCap::from_config(config.crawl.max_entity_pages));

        Ok(Self {
            config,
            profile,
            listing_fetcher,
            detail_fetcher,
            group_policy,
            entity_policy,
        })
    }

    /// Runs the crawl to completion
    ///
    /// # Run shape
    ///
    /// 1. Read up to `max-regions` seeds from the seed file (fatal if absent).
    /// 2. Per seed: walk the group level, audit seed + groups.
    /// 3. Per group, in discovery order: walk the entity level, audit group +
    ///    entities, then fetch each entity's detail page (concurrently, up to
    ///    the parallelism cap) and export its record.
    ///
    /// Per-page failures are logged and skipped; only configuration and I/O
    /// failures abort the run.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();

        let seeds = read_seed_urls(
            Path::new(&self.config.input.seed_file),
            self.config.crawl.max_regions,
        )?;
        tracing::info!("Read {} seed URLs", seeds.len());

        let mut region_audit = AuditWriter::open(Path::new(&self.config.output.region_audit_path))?;
        let mut group_audit = AuditWriter::open(Path::new(&self.config.output.group_audit_path))?;
        let mut export = CsvExport::open(Path::new(&self.config.output.export_path))?;

        // Level 1: regions -> group URLs
        let mut group_urls = Vec::new();
        for seed in &seeds {
            let walk = walk_region(&self.listing_fetcher, seed, &self.profile, &self.group_policy)
                .await;
            tracing::info!("Region {}: {} groups", seed, walk.group_urls.len());
            region_audit.write_block(seed, &walk.group_urls)?;
            group_urls.extend(walk.group_urls);
        }

        // Levels 2 and 3: groups -> entity URLs -> records
        let mut entities_discovered = 0;
        let mut records_exported = 0;
        let mut fetch_failures = 0;

        for group_url in &group_urls {
            let outcome = walk_listing(
                &self.listing_fetcher,
                group_url.clone(),
                &self.profile.group_listing,
                &self.profile.base_url,
                &self.entity_policy,
            )
            .await;

            tracing::info!(
                "Group {} ('{}'): {} entities",
                group_url,
                outcome.branch_key,
                outcome.leaf_urls.len()
            );
            group_audit.write_block(group_url, &outcome.leaf_urls)?;
            entities_discovered += outcome.leaf_urls.len();

            let detail_fetcher = &self.detail_fetcher;
            let mut details = stream::iter(outcome.leaf_urls)
                .map(|entity_url| async move {
                    let result = detail_fetcher.fetch_page(&entity_url).await;
                    (entity_url, result)
                })
                .buffer_unordered(self.config.fetch.parallelism as usize);

            while let Some((entity_url, result)) = details.next().await {
                let record = match result {
                    Ok(body) => match extract_record(&body, &entity_url, &self.profile.detail) {
                        Ok(record) => record,
                        Err(e) => {
                            tracing::warn!("Extraction failed for {}: {}", entity_url, e);
                            EntityRecord::empty(&entity_url)
                        }
                    },
                    Err(e) => {
                        tracing::warn!("Detail fetch failed for {}: {}", entity_url, e);
                        fetch_failures += 1;
                        EntityRecord::empty(&entity_url)
                    }
                };

                export.append(&record)?;
                records_exported += 1;
            }
        }

        Ok(RunSummary {
            regions_read: seeds.len(),
            groups_discovered: group_urls.len(),
            entities_discovered,
            records_exported,
            fetch_failures,
            elapsed: start.elapsed(),
        })
    }
}

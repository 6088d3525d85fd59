use serde::Deserialize;

/// Main configuration structure for dinemap
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub fetch: FetchConfig,
    pub site: SiteConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Depth caps and run limits
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of seed lines read from the seed file (<= 0 = unlimited)
    #[serde(rename = "max-regions", default = "default_max_regions")]
    pub max_regions: i64,

    /// Maximum listing pages followed per region when discovering groups
    /// (< 0 = unlimited)
    #[serde(rename = "max-group-pages", default = "default_unlimited")]
    pub max_group_pages: i64,

    /// Maximum listing pages followed per group when discovering entities
    /// (< 0 = unlimited)
    #[serde(rename = "max-entity-pages", default = "default_unlimited")]
    pub max_entity_pages: i64,

    /// Overall run deadline in seconds (0 = no deadline)
    #[serde(rename = "run-deadline-secs", default)]
    pub run_deadline_secs: u64,
}

/// Fetch policy passed into the page fetch adapter
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum concurrent in-flight requests
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Fixed delay before each detail-page request (milliseconds)
    #[serde(rename = "detail-delay-ms", default = "default_detail_delay")]
    pub detail_delay_ms: u64,

    /// Additional random delay added on top of the fixed delay (milliseconds)
    #[serde(rename = "detail-jitter-ms", default = "default_detail_delay")]
    pub detail_jitter_ms: u64,

    /// Hosts the fetcher is allowed to contact (empty = allow all)
    #[serde(rename = "allowed-hosts", default)]
    pub allowed_hosts: Vec<String>,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL that relative listing links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Input configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the seed file (one region listing URL per line)
    #[serde(rename = "seed-file")]
    pub seed_file: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the region audit file (seed URL + discovered group URLs)
    #[serde(rename = "region-audit-path")]
    pub region_audit_path: String,

    /// Path to the group audit file (group URL + discovered entity URLs)
    #[serde(rename = "group-audit-path")]
    pub group_audit_path: String,

    /// Path to the CSV export of entity records
    #[serde(rename = "export-path")]
    pub export_path: String,
}

fn default_max_regions() -> i64 {
    0
}

fn default_unlimited() -> i64 {
    -1
}

fn default_user_agent() -> String {
    format!("dinemap/{}", env!("CARGO_PKG_VERSION"))
}

fn default_parallelism() -> u32 {
    5
}

fn default_timeout() -> u64 {
    30
}

fn default_detail_delay() -> u64 {
    1000
}

//! Configuration loading and validation
//!
//! Configuration is a TOML file with kebab-case keys, covering depth caps,
//! fetch policy, the target site's base URL, and input/output paths.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    Config, CrawlConfig, FetchConfig, InputConfig, OutputConfig, SiteConfig,
};
pub use validation::validate;

use crate::config::types::{Config, FetchConfig, InputConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_site_config(&config.site)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetch policy configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.parallelism < 1 || config.parallelism > 100 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be between 1 and 100, got {}",
            config.parallelism
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use HTTP or HTTPS scheme, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "base-url must have a host".to_string(),
        ));
    }

    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.seed_file.is_empty() {
        return Err(ConfigError::Validation(
            "seed-file cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("region-audit-path", &config.region_audit_path),
        ("group-audit-path", &config.group_audit_path),
        ("export-path", &config.export_path),
    ] {
        if path.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CrawlConfig;

    fn test_config() -> Config {
        Config {
            crawl: CrawlConfig {
                max_regions: 1,
                max_group_pages: -1,
                max_entity_pages: -1,
                run_deadline_secs: 0,
            },
            fetch: FetchConfig {
                user_agent: "test-agent".to_string(),
                parallelism: 5,
                request_timeout_secs: 30,
                detail_delay_ms: 0,
                detail_jitter_ms: 0,
                allowed_hosts: vec![],
            },
            site: SiteConfig {
                base_url: "https://www.tripadvisor.com".to_string(),
            },
            input: InputConfig {
                seed_file: "region_urls.txt".to_string(),
            },
            output: OutputConfig {
                region_audit_path: "region_group_urls.txt".to_string(),
                group_audit_path: "region_group_entity_urls.txt".to_string(),
                export_path: "entities.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&test_config()).is_ok());
    }

    #[test]
    fn test_zero_parallelism_rejected() {
        let mut config = test_config();
        config.fetch.parallelism = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = test_config();
        config.site.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut config = test_config();
        config.site.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let mut config = test_config();
        config.output.export_path = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}

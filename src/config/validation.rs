use crate::config::types::{Config, CrawlerConfig, IntakeConfig, SourceEntry, WebDriverConfig};
use crate::sources;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_webdriver_config(&config.webdriver)?;
    validate_output_config(&config.output.database_path)?;
    validate_sources(&config.sources)?;
    if let Some(intake) = &config.intake {
        validate_intake_config(intake)?;
    }
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > 32 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_pages must be between 1 and 32, got {}",
            config.max_concurrent_pages
        )));
    }

    if config.navigation_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "navigation_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.readiness_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "readiness_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_webdriver_config(config: &WebDriverConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|_| ConfigError::InvalidUrl(format!("webdriver url: {}", config.url)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "webdriver url must be http(s): {}",
            config.url
        )));
    }
    Ok(())
}

fn validate_output_config(database_path: &str) -> Result<(), ConfigError> {
    if database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_sources(entries: &[SourceEntry]) -> Result<(), ConfigError> {
    if entries.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[sources]] entry is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        let profile = sources::profile_for(&entry.name).ok_or_else(|| {
            ConfigError::Validation(format!("unknown source name: {:?}", entry.name))
        })?;

        if !seen.insert(entry.name.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source entry: {:?}",
                entry.name
            )));
        }

        for seed in &entry.seeds {
            let url = Url::parse(seed)
                .map_err(|_| ConfigError::InvalidUrl(format!("seed url: {}", seed)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl(format!(
                    "seed url must be http(s): {}",
                    seed
                )));
            }
            let host = url.host_str().unwrap_or_default();
            let on_domain = profile
                .allowed_domains
                .iter()
                .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)));
            if !on_domain {
                return Err(ConfigError::Validation(format!(
                    "seed {} is outside the allowed domains of source {:?}",
                    seed, entry.name
                )));
            }
        }
    }

    Ok(())
}

fn validate_intake_config(config: &IntakeConfig) -> Result<(), ConfigError> {
    Url::parse(&config.endpoint)
        .map_err(|_| ConfigError::InvalidUrl(format!("intake endpoint: {}", config.endpoint)))?;
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "intake timeout_secs must be >= 1".to_string(),
        ));
    }
    Ok(())
}

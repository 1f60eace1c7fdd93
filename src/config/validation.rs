use crate::config::types::{Config, OutputConfig, ScraperConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.retry_count > 10 {
        return Err(ConfigError::Validation(format!(
            "retry-count must be <= 10, got {}",
            config.retry_count
        )));
    }

    if config.backoff_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "backoff-ms must be <= 60000, got {}",
            config.backoff_ms
        )));
    }

    if config.rate_limit_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "rate-limit-ms must be <= 60000, got {}",
            config.rate_limit_ms
        )));
    }

    if config.max_books_per_category == Some(0) {
        return Err(ConfigError::Validation(
            "max-books-per-category must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "data-dir cannot be empty".to_string(),
        ));
    }

    if config.formats.is_empty() {
        return Err(ConfigError::Validation(
            "formats must name at least one of csv, json".to_string(),
        ));
    }

    Ok(())
}

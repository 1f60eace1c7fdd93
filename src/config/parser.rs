use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Missing keys fall back to their defaults, so a partial file is fine.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[scraper]
base-url = "http://books.example.test"
rate-limit-ms = 250
retry-count = 2
max-books-per-category = 10

[output]
data-dir = "./scraped"
formats = ["csv"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scraper.base_url, "http://books.example.test");
        assert_eq!(config.scraper.rate_limit_ms, 250);
        assert_eq!(config.scraper.retry_count, 2);
        assert_eq!(config.scraper.max_books_per_category, Some(10));
        assert_eq!(config.output.data_dir.to_str(), Some("./scraped"));
        assert_eq!(config.output.formats, vec![OutputFormat::Csv]);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let config_content = r#"
[scraper]
rate-limit-ms = 100
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scraper.base_url, "http://books.toscrape.com");
        assert_eq!(config.scraper.rate_limit_ms, 100);
        assert_eq!(config.scraper.retry_count, 3);
        assert_eq!(config.output.formats.len(), 2);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/inkshelf.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[scraper]
base-url = "not a url"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }
}

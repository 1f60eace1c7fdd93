use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Inkshelf
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Base URL of the target site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Retry attempts per request after the first failure
    #[serde(rename = "retry-count")]
    pub retry_count: u32,

    /// Base backoff between retries in milliseconds (grows per attempt)
    #[serde(rename = "backoff-ms")]
    pub backoff_ms: u64,

    /// Minimum time between the starts of consecutive requests (milliseconds)
    #[serde(rename = "rate-limit-ms")]
    pub rate_limit_ms: u64,

    /// Stop paginating a category once this many books were collected
    #[serde(rename = "max-books-per-category")]
    pub max_books_per_category: Option<usize>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "http://books.toscrape.com".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            retry_count: 3,
            backoff_ms: 500,
            rate_limit_ms: 1000,
            max_books_per_category: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives books.csv, books.json, categories.json and
    /// analysis_results.json
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,

    /// File formats for the book records
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            formats: vec![OutputFormat::Csv, OutputFormat::Json],
        }
    }
}

/// Serialization format for the persisted book records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

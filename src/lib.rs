//! Inkshelf: a book catalogue scraper
//!
//! This crate scrapes book listings from a demo bookstore site, parses the
//! HTML into structured records, persists them as CSV/JSON files, and computes
//! aggregate statistics over the collected records.

pub mod analysis;
pub mod config;
pub mod models;
pub mod output;
pub mod scraper;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Inkshelf operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] scraper::FetchFailure),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No book data in {0}: expected books.csv or books.json")]
    MissingData(PathBuf),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// A record field that failed validation at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    pub message: String,
}

/// Result type alias for Inkshelf operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use models::{Book, Category};
pub use output::{RunStatus, ScrapeReport};
pub use crate::scraper::run_scrape;

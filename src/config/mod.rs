//! Configuration module for Inkshelf
//!
//! Every setting has a default so the tool runs with no config file at all;
//! a TOML file passed with `--config` overrides the defaults, and CLI flags
//! override both.
//!
//! # Example
//!
//! ```no_run
//! use inkshelf::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("inkshelf.toml")).unwrap();
//! println!("Scraping {}", config.scraper.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, OutputFormat, ScraperConfig};

// Re-export parser and validation functions
pub use parser::load_config;
pub use validation::validate;

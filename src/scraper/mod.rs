//! Scraper module for fetching and processing book listings
//!
//! This module contains the core scraping logic, including:
//! - HTTP collection with retry logic and request pacing
//! - HTML parsing of category indexes and listing pages
//! - Pipeline orchestration across categories and pages

mod collector;
mod pacing;
mod parser;
mod pipeline;

pub use collector::{build_http_client, Collector, FetchFailure};
pub use pacing::RateGate;
pub use parser::{
    parse_category_index, parse_listing, CategoryLink, ParseWarning, ParsedListing,
};
pub use pipeline::{advance, run_scrape, PageStep, Pipeline};

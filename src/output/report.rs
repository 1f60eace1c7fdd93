//! End-of-run reporting

use std::time::Duration;

/// Terminal status of a scrape run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every category was scraped
    Complete,
    /// At least one category was skipped after exhausting retries
    PartialData,
}

/// Summary of a finished scrape run
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub status: RunStatus,

    /// Total book records accumulated across all categories
    pub books_scraped: usize,

    /// Categories scraped to completion
    pub categories_scraped: usize,

    /// Categories skipped after their fetches kept failing
    pub skipped_categories: Vec<String>,

    /// Individual records skipped during parsing
    pub parse_warnings: usize,

    pub elapsed: Duration,
}

/// Prints the run report to stdout in a formatted manner
pub fn print_report(report: &ScrapeReport) {
    println!("=== Scrape Report ===\n");

    let status = match report.status {
        RunStatus::Complete => "complete",
        RunStatus::PartialData => "partial data",
    };
    println!("Status: {}", status);
    println!("Books scraped: {}", report.books_scraped);
    println!("Categories scraped: {}", report.categories_scraped);

    if !report.skipped_categories.is_empty() {
        println!(
            "Skipped categories ({}):",
            report.skipped_categories.len()
        );
        for name in &report.skipped_categories {
            println!("  - {}", name);
        }
    }

    if report.parse_warnings > 0 {
        println!("Records skipped during parsing: {}", report.parse_warnings);
    }

    println!("Completed in {:.2} seconds", report.elapsed.as_secs_f64());
}

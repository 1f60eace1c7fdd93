//! File persistence for scraped records and analysis artifacts
//!
//! This module handles:
//! - Writing books.csv / books.json with a fixed field order
//! - Writing categories.json and analysis_results.json
//! - Reloading book records for analyze-only runs
//! - The end-of-run report
//!
//! Saving the same records twice produces byte-identical files, and loading
//! what was saved yields the same records in the same order.

mod csv_file;
mod json_file;
mod report;

pub use report::{print_report, RunStatus, ScrapeReport};

use crate::analysis::AnalysisReport;
use crate::config::OutputFormat;
use crate::models::{Book, Category};
use crate::{Result, ScrapeError};
use std::path::Path;

/// Book records, CSV form
pub const BOOKS_CSV: &str = "books.csv";
/// Book records, JSON form
pub const BOOKS_JSON: &str = "books.json";
/// Per-category book id lists
pub const CATEGORIES_JSON: &str = "categories.json";
/// Aggregate analysis output
pub const ANALYSIS_JSON: &str = "analysis_results.json";

/// Saves book records in the requested formats
///
/// # Arguments
///
/// * `books` - The records to persist, already in final order
/// * `data_dir` - Output directory, created if absent
/// * `formats` - Which of books.csv / books.json to write
pub fn save_books(books: &[Book], data_dir: &Path, formats: &[OutputFormat]) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    for format in formats {
        match format {
            OutputFormat::Csv => csv_file::write_books(&data_dir.join(BOOKS_CSV), books)?,
            OutputFormat::Json => json_file::write_json(&data_dir.join(BOOKS_JSON), &books)?,
        }
    }

    tracing::info!("Saved {} books to {}", books.len(), data_dir.display());
    Ok(())
}

/// Saves the category list as categories.json
pub fn save_categories(categories: &[Category], data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    json_file::write_json(&data_dir.join(CATEGORIES_JSON), &categories)?;
    tracing::info!(
        "Saved {} categories to {}",
        categories.len(),
        data_dir.display()
    );
    Ok(())
}

/// Saves the aggregate analysis as analysis_results.json
pub fn save_analysis(analysis: &AnalysisReport, data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    json_file::write_json(&data_dir.join(ANALYSIS_JSON), analysis)?;
    tracing::info!("Saved analysis results to {}", data_dir.display());
    Ok(())
}

/// Loads previously persisted book records for analyze-only runs
///
/// Prefers books.csv and falls back to books.json.
///
/// # Returns
///
/// * `Ok(Vec<Book>)` - Records in their persisted order
/// * `Err(ScrapeError::MissingData)` - Neither file exists in the directory
pub fn load_books(data_dir: &Path) -> Result<Vec<Book>> {
    let csv_path = data_dir.join(BOOKS_CSV);
    if csv_path.exists() {
        return csv_file::read_books(&csv_path);
    }

    let json_path = data_dir.join(BOOKS_JSON);
    if json_path.exists() {
        return json_file::read_books(&json_path);
    }

    Err(ScrapeError::MissingData(data_dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_books() -> Vec<Book> {
        vec![
            Book::new(
                "A Light in the Attic".to_string(),
                51.77,
                3,
                true,
                "Poetry".to_string(),
                "http://books.toscrape.com/catalogue/a-light-in-the-attic_1000/index.html"
                    .to_string(),
            )
            .unwrap(),
            Book::new(
                "It's Only the Himalayas".to_string(),
                45.17,
                2,
                false,
                "Travel".to_string(),
                "http://books.toscrape.com/catalogue/its-only-the-himalayas_981/index.html"
                    .to_string(),
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_round_trip_via_csv() {
        let dir = tempdir().unwrap();
        let books = sample_books();

        save_books(&books, dir.path(), &[OutputFormat::Csv]).unwrap();
        let loaded = load_books(dir.path()).unwrap();

        assert_eq!(loaded, books);
    }

    #[test]
    fn test_round_trip_via_json() {
        let dir = tempdir().unwrap();
        let books = sample_books();

        save_books(&books, dir.path(), &[OutputFormat::Json]).unwrap();
        let loaded = load_books(dir.path()).unwrap();

        assert_eq!(loaded, books);
    }

    #[test]
    fn test_save_twice_is_byte_identical() {
        let dir = tempdir().unwrap();
        let books = sample_books();
        let formats = [OutputFormat::Csv, OutputFormat::Json];

        save_books(&books, dir.path(), &formats).unwrap();
        let first_csv = std::fs::read(dir.path().join(BOOKS_CSV)).unwrap();
        let first_json = std::fs::read(dir.path().join(BOOKS_JSON)).unwrap();

        save_books(&books, dir.path(), &formats).unwrap();
        let second_csv = std::fs::read(dir.path().join(BOOKS_CSV)).unwrap();
        let second_json = std::fs::read(dir.path().join(BOOKS_JSON)).unwrap();

        assert_eq!(first_csv, second_csv);
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_csv_header_is_fixed() {
        let dir = tempdir().unwrap();
        save_books(&sample_books(), dir.path(), &[OutputFormat::Csv]).unwrap();

        let content = std::fs::read_to_string(dir.path().join(BOOKS_CSV)).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "id,title,price,rating,availability,category,url");
    }

    #[test]
    fn test_csv_price_has_two_decimals() {
        let dir = tempdir().unwrap();
        let books = vec![Book::new(
            "Round Price".to_string(),
            20.0,
            1,
            true,
            "Travel".to_string(),
            "http://example.test/round".to_string(),
        )
        .unwrap()];
        save_books(&books, dir.path(), &[OutputFormat::Csv]).unwrap();

        let content = std::fs::read_to_string(dir.path().join(BOOKS_CSV)).unwrap();
        assert!(content.contains(",20.00,"));
    }

    #[test]
    fn test_load_missing_files_fails() {
        let dir = tempdir().unwrap();
        match load_books(dir.path()) {
            Err(ScrapeError::MissingData(path)) => assert_eq!(path, dir.path()),
            other => panic!("expected MissingData, got {:?}", other),
        }
    }

    #[test]
    fn test_categories_json_shape() {
        let dir = tempdir().unwrap();
        let mut category = Category::new(
            "Travel".to_string(),
            "http://example.test/travel".to_string(),
        );
        category.add_book("travel-first");
        save_categories(&[category], dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(CATEGORIES_JSON)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[0]["name"], "Travel");
        assert_eq!(value[0]["book_ids"][0], "travel-first");
    }
}

//! Aggregate analysis over scraped book records
//!
//! Everything in this module is pure: it takes book records and produces an
//! [`AnalysisReport`]. Persistence and presentation live elsewhere; see
//! [`crate::output`] and [`render`].

mod render;

pub use render::{Renderer, TextRenderer};

use crate::models::Book;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Width of each price histogram bucket
pub const PRICE_BUCKET_WIDTH: f64 = 10.0;

/// Upper bound on histogram buckets; prices past the last bucket's lower
/// edge are counted in the last bucket
pub const MAX_PRICE_BUCKETS: usize = 100;

/// One price histogram bucket covering `[lower, upper)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// Price distribution statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnalysis {
    pub average_price: f64,
    pub median_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub price_range: f64,
    pub standard_deviation: f64,
    pub buckets: Vec<PriceBucket>,
}

/// Rating distribution statistics
///
/// `rating_counts` always carries all five keys, so a rating with zero books
/// still shows up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAnalysis {
    pub average_rating: f64,
    pub rating_counts: BTreeMap<u8, u64>,
}

/// Per-category statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub category_counts: BTreeMap<String, u64>,
    pub average_price_by_category: BTreeMap<String, f64>,
    pub most_common_category: Option<String>,
    pub least_common_category: Option<String>,
}

/// One (price, rating) observation for correlation inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRatingPair {
    pub price: f64,
    pub rating: u8,
}

/// The complete analysis output, persisted as analysis_results.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub price_analysis: PriceAnalysis,
    pub rating_analysis: RatingAnalysis,
    pub category_analysis: CategoryAnalysis,
    pub price_vs_rating: Vec<PriceRatingPair>,
}

/// Computes the full analysis over a set of book records
///
/// An empty input yields a report with zeroed statistics and empty
/// collections rather than an error.
pub fn analyze(books: &[Book]) -> AnalysisReport {
    AnalysisReport {
        price_analysis: price_analysis(books),
        rating_analysis: rating_analysis(books),
        category_analysis: category_analysis(books),
        price_vs_rating: price_vs_rating(books),
    }
}

fn price_analysis(books: &[Book]) -> PriceAnalysis {
    if books.is_empty() {
        return PriceAnalysis {
            average_price: 0.0,
            median_price: 0.0,
            min_price: 0.0,
            max_price: 0.0,
            price_range: 0.0,
            standard_deviation: 0.0,
            buckets: Vec::new(),
        };
    }

    let prices: Vec<f64> = books.iter().map(|b| b.price).collect();
    let sum: f64 = prices.iter().sum();
    let average = sum / prices.len() as f64;
    let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    PriceAnalysis {
        average_price: average,
        median_price: median(&prices),
        min_price: min,
        max_price: max,
        price_range: max - min,
        standard_deviation: standard_deviation(&prices, average),
        buckets: price_buckets(&prices),
    }
}

/// Median of a non-empty sample; even-sized samples average the two middle
/// values
fn median(prices: &[f64]) -> f64 {
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n - 1 denominator); 0.0 for fewer than two
/// observations
fn standard_deviation(prices: &[f64], average: f64) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    let variance: f64 = prices
        .iter()
        .map(|p| (p - average).powi(2))
        .sum::<f64>()
        / (prices.len() - 1) as f64;
    variance.sqrt()
}

/// Fixed-width histogram buckets from zero up past the maximum price
///
/// The bucket count is capped at [`MAX_PRICE_BUCKETS`]: any finite price
/// passes record validation, so the count must not scale with the maximum
/// price itself.
fn price_buckets(prices: &[f64]) -> Vec<PriceBucket> {
    let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let bucket_count = ((max / PRICE_BUCKET_WIDTH).floor() as usize)
        .saturating_add(1)
        .min(MAX_PRICE_BUCKETS);

    let mut buckets: Vec<PriceBucket> = (0..bucket_count)
        .map(|i| PriceBucket {
            lower: i as f64 * PRICE_BUCKET_WIDTH,
            upper: (i + 1) as f64 * PRICE_BUCKET_WIDTH,
            count: 0,
        })
        .collect();

    for price in prices {
        let index = (price / PRICE_BUCKET_WIDTH).floor() as usize;
        let index = index.min(bucket_count - 1);
        buckets[index].count += 1;
    }

    buckets
}

fn rating_analysis(books: &[Book]) -> RatingAnalysis {
    let mut rating_counts: BTreeMap<u8, u64> = (1..=5).map(|r| (r, 0)).collect();
    for book in books {
        *rating_counts.entry(book.rating).or_insert(0) += 1;
    }

    let average_rating = if books.is_empty() {
        0.0
    } else {
        books.iter().map(|b| b.rating as f64).sum::<f64>() / books.len() as f64
    };

    RatingAnalysis {
        average_rating,
        rating_counts,
    }
}

fn category_analysis(books: &[Book]) -> CategoryAnalysis {
    let mut category_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut price_sums: BTreeMap<String, f64> = BTreeMap::new();

    for book in books {
        *category_counts.entry(book.category.clone()).or_insert(0) += 1;
        *price_sums.entry(book.category.clone()).or_insert(0.0) += book.price;
    }

    let average_price_by_category: BTreeMap<String, f64> = category_counts
        .iter()
        .map(|(name, count)| (name.clone(), price_sums[name] / *count as f64))
        .collect();

    let most_common_category = category_counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(name, _)| name.clone());
    let least_common_category = category_counts
        .iter()
        .min_by_key(|(_, count)| **count)
        .map(|(name, _)| name.clone());

    CategoryAnalysis {
        category_counts,
        average_price_by_category,
        most_common_category,
        least_common_category,
    }
}

/// Collects (price, rating) pairs in record order
fn price_vs_rating(books: &[Book]) -> Vec<PriceRatingPair> {
    books
        .iter()
        .map(|b| PriceRatingPair {
            price: b.price,
            rating: b.rating,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, price: f64, rating: u8, category: &str) -> Book {
        Book::new(
            title.to_string(),
            price,
            rating,
            true,
            category.to_string(),
            format!("http://example.test/{}", title),
        )
        .unwrap()
    }

    fn sample() -> Vec<Book> {
        vec![
            book("a", 10.0, 1, "Travel"),
            book("b", 20.0, 3, "Travel"),
            book("c", 30.0, 3, "Poetry"),
            book("d", 55.0, 5, "Poetry"),
        ]
    }

    #[test]
    fn test_price_statistics() {
        let report = analyze(&sample());
        let prices = &report.price_analysis;

        assert!((prices.average_price - 28.75).abs() < 1e-9);
        assert!((prices.median_price - 25.0).abs() < 1e-9);
        assert!((prices.min_price - 10.0).abs() < 1e-9);
        assert!((prices.max_price - 55.0).abs() < 1e-9);
        assert!((prices.price_range - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_median_odd_sample() {
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_standard_deviation_is_sample_form() {
        // Sample variance of 10,20,30,55 around 28.75 is 368.75
        let expected = 368.75_f64.sqrt();
        let report = analyze(&sample());
        assert!((report.price_analysis.standard_deviation - expected).abs() < 1e-9);
    }

    #[test]
    fn test_price_buckets_cover_all_records() {
        let report = analyze(&sample());
        let buckets = &report.price_analysis.buckets;

        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[1].lower, 10.0);
        assert_eq!(buckets[1].count, 1); // 10.0 falls in [10, 20)
        assert_eq!(buckets[5].count, 1); // 55.0 falls in [50, 60)
        let total: u64 = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_rating_counts_include_empty_ratings() {
        let report = analyze(&sample());
        let counts = &report.rating_analysis.rating_counts;

        assert_eq!(counts.len(), 5);
        assert_eq!(counts[&1], 1);
        assert_eq!(counts[&2], 0);
        assert_eq!(counts[&3], 2);
        assert_eq!(counts[&4], 0);
        assert_eq!(counts[&5], 1);
        assert!((report.rating_analysis.average_rating - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_statistics() {
        let report = analyze(&sample());
        let categories = &report.category_analysis;

        assert_eq!(categories.category_counts["Travel"], 2);
        assert_eq!(categories.category_counts["Poetry"], 2);
        assert!((categories.average_price_by_category["Travel"] - 15.0).abs() < 1e-9);
        assert!((categories.average_price_by_category["Poetry"] - 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_most_and_least_common_category() {
        let mut books = sample();
        books.push(book("e", 5.0, 2, "Travel"));
        let report = analyze(&books);

        assert_eq!(
            report.category_analysis.most_common_category.as_deref(),
            Some("Travel")
        );
        assert_eq!(
            report.category_analysis.least_common_category.as_deref(),
            Some("Poetry")
        );
    }

    #[test]
    fn test_price_vs_rating_preserves_order() {
        let report = analyze(&sample());
        let pairs = &report.price_vs_rating;

        assert_eq!(pairs.len(), 4);
        assert!((pairs[0].price - 10.0).abs() < 1e-9);
        assert_eq!(pairs[0].rating, 1);
        assert_eq!(pairs[3].rating, 5);
    }

    #[test]
    fn test_empty_input_yields_zeroed_report() {
        let report = analyze(&[]);

        assert_eq!(report.price_analysis.average_price, 0.0);
        assert_eq!(report.price_analysis.standard_deviation, 0.0);
        assert!(report.price_analysis.buckets.is_empty());
        assert_eq!(report.rating_analysis.average_rating, 0.0);
        assert_eq!(report.rating_analysis.rating_counts.len(), 5);
        assert!(report.category_analysis.most_common_category.is_none());
        assert!(report.price_vs_rating.is_empty());
    }

    #[test]
    fn test_extreme_price_caps_bucket_count() {
        // Any finite non-negative price is a valid record, e.g. from a
        // hand-edited books.json reloaded in analyze-only mode
        let books = vec![book("cheap", 5.0, 2, "Travel"), book("absurd", 1e19, 4, "Travel")];
        let report = analyze(&books);
        let buckets = &report.price_analysis.buckets;

        assert_eq!(buckets.len(), MAX_PRICE_BUCKETS);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[MAX_PRICE_BUCKETS - 1].count, 1);
        let total: u64 = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_single_book_statistics() {
        let report = analyze(&[book("solo", 12.5, 4, "Art")]);

        assert!((report.price_analysis.median_price - 12.5).abs() < 1e-9);
        assert_eq!(report.price_analysis.standard_deviation, 0.0);
        assert!((report.price_analysis.price_range - 0.0).abs() < 1e-9);
    }
}

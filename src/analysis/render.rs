//! Presentation of analysis results

use super::AnalysisReport;

/// Maximum width of a histogram bar in characters
const BAR_WIDTH: usize = 40;

/// Renders an analysis report to some destination
pub trait Renderer {
    fn render(&self, analysis: &AnalysisReport);
}

/// Prints the analysis to stdout as text with ASCII histograms
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, analysis: &AnalysisReport) {
        println!("=== Analysis Results ===\n");

        let prices = &analysis.price_analysis;
        println!("Price statistics:");
        println!("  Average: {:.2}", prices.average_price);
        println!("  Median: {:.2}", prices.median_price);
        println!(
            "  Range: {:.2} - {:.2} (spread {:.2})",
            prices.min_price, prices.max_price, prices.price_range
        );
        println!("  Std deviation: {:.2}", prices.standard_deviation);

        if !prices.buckets.is_empty() {
            println!("\nPrice distribution:");
            let max_count = prices.buckets.iter().map(|b| b.count).max().unwrap_or(0);
            for bucket in &prices.buckets {
                println!(
                    "  {:>6.0} - {:<6.0} {} {}",
                    bucket.lower,
                    bucket.upper,
                    bar(bucket.count, max_count),
                    bucket.count
                );
            }
        }

        let ratings = &analysis.rating_analysis;
        println!("\nRating distribution (average {:.2}):", ratings.average_rating);
        let max_count = ratings.rating_counts.values().copied().max().unwrap_or(0);
        for (rating, count) in &ratings.rating_counts {
            println!("  {} star {} {}", rating, bar(*count, max_count), count);
        }

        let categories = &analysis.category_analysis;
        if !categories.category_counts.is_empty() {
            println!("\nCategories:");
            for (name, count) in &categories.category_counts {
                println!(
                    "  {}: {} books, average price {:.2}",
                    name, count, categories.average_price_by_category[name]
                );
            }
            if let Some(name) = &categories.most_common_category {
                println!("  Most common: {}", name);
            }
            if let Some(name) = &categories.least_common_category {
                println!("  Least common: {}", name);
            }
        }

        println!();
    }
}

/// Scales a count to a bar of at most [`BAR_WIDTH`] characters
fn bar(count: u64, max_count: u64) -> String {
    if max_count == 0 {
        return String::new();
    }
    let width = ((count as f64 / max_count as f64) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(10, 10).len(), BAR_WIDTH);
        assert_eq!(bar(5, 10).len(), BAR_WIDTH / 2);
        assert_eq!(bar(0, 10), "");
    }

    #[test]
    fn test_bar_handles_empty_distribution() {
        assert_eq!(bar(0, 0), "");
    }
}

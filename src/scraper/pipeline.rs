//! Pipeline orchestration - main scrape driver
//!
//! This module drives the whole run:
//! - Fetch the category index (fatal on failure)
//! - For each category, paginate through listing pages and accumulate books
//! - Skip a category that still fails after retries, keep the run going
//! - Persist the records, then analyze them
//!
//! The flow is
//! `Start → FetchCategoryIndex → {per category: FetchPage → ParsePage → advance}
//! → Persist → Analyze → Done | PartialData`.

use crate::analysis::{self, Renderer, TextRenderer};
use crate::config::Config;
use crate::models::{Book, Category};
use crate::output::{self, RunStatus, ScrapeReport};
use crate::scraper::collector::{Collector, FetchFailure};
use crate::scraper::parser::{parse_category_index, parse_listing, CategoryLink, ParsedListing};
use crate::ScrapeError;
use std::collections::HashSet;
use std::time::Instant;
use url::Url;

/// Decision taken after parsing one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStep {
    /// Follow the pagination link to the next page
    Continue(Url),
    /// No next page, or the per-category cap was reached
    Finished,
}

/// Decides whether pagination continues after a parsed page
///
/// # Arguments
///
/// * `next_page` - The pagination link extracted from the page, if any
/// * `collected` - Books collected so far for this category
/// * `cap` - Optional per-category book cap
pub fn advance(next_page: Option<Url>, collected: usize, cap: Option<usize>) -> PageStep {
    if let Some(cap) = cap {
        if collected >= cap {
            return PageStep::Finished;
        }
    }
    match next_page {
        Some(url) => PageStep::Continue(url),
        None => PageStep::Finished,
    }
}

/// Keeps the first sidebar entry per category name
///
/// Category names are unique within a run; a duplicate sidebar entry would
/// otherwise produce duplicate category records and colliding book ids.
fn dedupe_categories(links: Vec<CategoryLink>) -> Vec<CategoryLink> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| {
            let fresh = seen.insert(link.name.clone());
            if !fresh {
                tracing::warn!("Ignoring duplicate sidebar entry for {}", link.name);
            }
            fresh
        })
        .collect()
}

/// Books accumulated for one category
struct CategoryScrape {
    books: Vec<Book>,
    warnings: usize,
    pages: usize,
}

/// Main pipeline structure
pub struct Pipeline {
    config: Config,
    collector: Collector,
}

impl Pipeline {
    /// Creates a new pipeline instance
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let collector = Collector::new(&config.scraper)?;
        Ok(Self { config, collector })
    }

    /// Runs the full fetch → parse → store → summarize sequence
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeReport)` - Run finished; status says whether categories
    ///   were skipped
    /// * `Err(ScrapeError)` - Total failure, e.g. the category index was
    ///   unreachable after retries
    pub async fn run(&mut self) -> Result<ScrapeReport, ScrapeError> {
        let started = Instant::now();
        let base_url = Url::parse(&self.config.scraper.base_url)?;

        tracing::info!("Starting scrape of {}", base_url);

        // No category index means nothing to do: fatal for the run
        let index_html = self.collector.fetch(&base_url).await?;
        let category_links = dedupe_categories(parse_category_index(&index_html, &base_url));
        tracing::info!("Found {} categories", category_links.len());

        let mut all_books: Vec<Book> = Vec::new();
        let mut categories: Vec<Category> = Vec::new();
        let mut skipped_categories: Vec<String> = Vec::new();
        let mut parse_warnings = 0;

        for link in &category_links {
            tracing::info!("Processing category: {}", link.name);

            match self.scrape_category(link).await {
                Ok(scrape) => {
                    tracing::info!(
                        "{}: {} books across {} pages",
                        link.name,
                        scrape.books.len(),
                        scrape.pages
                    );
                    parse_warnings += scrape.warnings;

                    let mut category = Category::new(link.name.clone(), link.url.to_string());
                    for book in &scrape.books {
                        category.add_book(book.id.clone());
                    }
                    categories.push(category);
                    all_books.extend(scrape.books);
                }
                Err(failure) => {
                    tracing::warn!("Skipping category {}: {}", link.name, failure);
                    skipped_categories.push(link.name.clone());
                }
            }
        }

        // Persist
        let output_config = &self.config.output;
        output::save_books(&all_books, &output_config.data_dir, &output_config.formats)?;
        output::save_categories(&categories, &output_config.data_dir)?;

        // Analyze
        let analysis = analysis::analyze(&all_books);
        output::save_analysis(&analysis, &output_config.data_dir)?;
        TextRenderer.render(&analysis);

        let status = if skipped_categories.is_empty() {
            RunStatus::Complete
        } else {
            RunStatus::PartialData
        };

        Ok(ScrapeReport {
            status,
            books_scraped: all_books.len(),
            categories_scraped: categories.len(),
            skipped_categories,
            parse_warnings,
            elapsed: started.elapsed(),
        })
    }

    /// Paginates through one category, accumulating its books
    ///
    /// A fetch failure anywhere in the chain fails the whole category; the
    /// caller decides to skip it.
    async fn scrape_category(
        &mut self,
        link: &CategoryLink,
    ) -> Result<CategoryScrape, FetchFailure> {
        let cap = self.config.scraper.max_books_per_category;
        let mut books: Vec<Book> = Vec::new();
        let mut warnings = 0;
        let mut pages = 0;
        let mut page_url = link.url.clone();

        loop {
            let html = self.collector.fetch(&page_url).await?;
            pages += 1;

            let ParsedListing {
                books: page_books,
                warnings: page_warnings,
                next_page,
            } = parse_listing(&html, &page_url, &link.name);

            tracing::debug!(
                "{} page {}: {} books, {} warnings",
                link.name,
                pages,
                page_books.len(),
                page_warnings.len()
            );

            for warning in &page_warnings {
                tracing::warn!(
                    "{} page {} card {}: {} ({})",
                    link.name,
                    pages,
                    warning.position,
                    warning.reason,
                    warning.title.as_deref().unwrap_or("unknown title")
                );
            }
            warnings += page_warnings.len();

            for book in page_books {
                if cap.is_some_and(|cap| books.len() >= cap) {
                    break;
                }
                books.push(book);
            }

            match advance(next_page, books.len(), cap) {
                PageStep::Continue(next) => page_url = next,
                PageStep::Finished => break,
            }
        }

        Ok(CategoryScrape {
            books,
            warnings,
            pages,
        })
    }
}

/// Runs a complete scrape with the given configuration
///
/// This is the main entry point for a scrape run. It drives the pipeline end
/// to end and returns the final report.
pub async fn run_scrape(config: Config) -> Result<ScrapeReport, ScrapeError> {
    let mut pipeline = Pipeline::new(config)?;
    pipeline.run().await
}

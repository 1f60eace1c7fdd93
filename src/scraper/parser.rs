//! HTML parser for category indexes and listing pages
//!
//! This module extracts:
//! - Category names and listing URLs from the index page sidebar
//! - Full book records from listing pages (product cards)
//! - The "next page" pagination link, when present
//!
//! A malformed product card never aborts its page: the card is skipped and
//! reported as a [`ParseWarning`].

use crate::models::Book;
use ::scraper::{ElementRef, Html, Selector};
use url::Url;

/// A category discovered on the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub name: String,
    /// Absolute URL of the category's first listing page
    pub url: Url,
}

/// A non-fatal problem with a single product card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Zero-based position of the card on its page
    pub position: usize,
    /// Title, when the card got far enough to have one
    pub title: Option<String>,
    pub reason: String,
}

/// Everything extracted from one listing page
#[derive(Debug, Clone)]
pub struct ParsedListing {
    /// Valid book records, in page order
    pub books: Vec<Book>,
    /// One warning per skipped card
    pub warnings: Vec<ParseWarning>,
    /// Absolute URL of the next page, or None at the end of the category
    pub next_page: Option<Url>,
}

/// Parses the index page and extracts the category sidebar
///
/// # Arguments
///
/// * `html` - The HTML content of the index page
/// * `base_url` - The base URL for resolving relative category links
///
/// # Returns
///
/// Categories in sidebar order. Entries without a name or with an
/// unresolvable link are skipped.
pub fn parse_category_index(html: &str, base_url: &Url) -> Vec<CategoryLink> {
    let document = Html::parse_document(html);
    let mut categories = Vec::new();

    if let Ok(selector) = Selector::parse("div.side_categories ul li ul li a") {
        for element in document.select(&selector) {
            let name = element.text().collect::<String>().trim().to_string();
            if name.is_empty() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Ok(url) = base_url.join(href) {
                    categories.push(CategoryLink { name, url });
                }
            }
        }
    }

    categories
}

/// Parses one listing page into book records
///
/// Yields full [`Book`] records directly: title, price, rating, availability
/// and detail URL are all present on product cards. Cards with missing or
/// malformed fields are skipped individually, each producing one warning.
///
/// # Arguments
///
/// * `html` - The HTML content of the listing page
/// * `page_url` - URL of this page, for resolving relative links
/// * `category` - Name of the category being scraped
pub fn parse_listing(html: &str, page_url: &Url, category: &str) -> ParsedListing {
    let document = Html::parse_document(html);
    let mut books = Vec::new();
    let mut warnings = Vec::new();

    if let Ok(card_selector) = Selector::parse("article.product_pod") {
        for (position, card) in document.select(&card_selector).enumerate() {
            match parse_product_card(&card, page_url, category, position) {
                Ok(book) => books.push(book),
                Err(warning) => warnings.push(warning),
            }
        }
    }

    let next_page = extract_next_page(&document, page_url);

    ParsedListing {
        books,
        warnings,
        next_page,
    }
}

/// Parses a single product card into a book record
fn parse_product_card(
    card: &ElementRef,
    page_url: &Url,
    category: &str,
    position: usize,
) -> Result<Book, ParseWarning> {
    // The title attribute carries the full title; the link text is truncated
    let title = select_attr(card, "h3 a", "title").or_else(|| select_text(card, "h3 a"));

    let warn = |title: &Option<String>, reason: &str| ParseWarning {
        position,
        title: title.clone(),
        reason: reason.to_string(),
    };

    let price_text =
        select_text(card, "p.price_color").ok_or_else(|| warn(&title, "missing price"))?;
    let price = parse_price(&price_text).ok_or_else(|| warn(&title, "unparseable price"))?;

    let rating = extract_rating(card).ok_or_else(|| warn(&title, "missing star rating"))?;

    let availability_text =
        select_text(card, "p.availability").ok_or_else(|| warn(&title, "missing availability"))?;
    let availability = availability_text.contains("In stock");

    let href =
        select_attr(card, "h3 a", "href").ok_or_else(|| warn(&title, "missing detail link"))?;
    let url = page_url
        .join(&href)
        .map_err(|_| warn(&title, "unresolvable detail link"))?;

    let title = title.ok_or_else(|| warn(&None, "missing title"))?;

    Book::new(
        title.clone(),
        price,
        rating,
        availability,
        category.to_string(),
        url.to_string(),
    )
    .map_err(|e| warn(&Some(title), &e.to_string()))
}

/// Extracts the star rating from a card's `star-rating` class list
fn extract_rating(card: &ElementRef) -> Option<u8> {
    let selector = Selector::parse("p.star-rating").ok()?;
    let element = card.select(&selector).next()?;
    element.value().classes().find_map(rating_from_word)
}

fn rating_from_word(word: &str) -> Option<u8> {
    match word {
        "One" => Some(1),
        "Two" => Some(2),
        "Three" => Some(3),
        "Four" => Some(4),
        "Five" => Some(5),
        _ => None,
    }
}

/// Parses a price out of text like "£51.77"
///
/// Strips everything but digits and the decimal point, so currency symbols
/// and stray encoding artifacts are tolerated.
fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Extracts the "next page" pagination link, if the page has one
fn extract_next_page(document: &Html, page_url: &Url) -> Option<Url> {
    let selector = Selector::parse("li.next a[href]").ok()?;
    let element = document.select(&selector).next()?;
    let href = element.value().attr("href")?;
    page_url.join(href).ok()
}

/// Resolves the first matching element's trimmed text
fn select_text(card: &ElementRef, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    card.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolves the first matching element's attribute value
fn select_attr(card: &ElementRef, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    card.select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|s| s.to_string())
}

use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// A single scraped book record
///
/// Construction goes through [`Book::new`] (or [`Book::from_parts`] when an
/// identifier already exists), which rejects malformed fields with a
/// [`ValidationError`] naming the offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Stable identifier derived from category and title
    pub id: String,

    pub title: String,

    /// Price in the site's currency, non-negative
    pub price: f64,

    /// Star rating, 1 through 5
    pub rating: u8,

    /// Whether the book is in stock
    pub availability: bool,

    /// Name of the category this book was listed under
    pub category: String,

    /// Absolute URL of the book's detail page
    pub url: String,
}

impl Book {
    /// Creates a validated book record, deriving its identifier
    ///
    /// # Arguments
    ///
    /// * `title` - Book title, non-empty
    /// * `price` - Non-negative finite price
    /// * `rating` - Star rating within 1..=5
    /// * `availability` - In-stock flag
    /// * `category` - Owning category name, non-empty
    /// * `url` - Absolute detail page URL
    ///
    /// # Returns
    ///
    /// * `Ok(Book)` - All fields passed validation
    /// * `Err(ValidationError)` - The first field that failed, by name
    pub fn new(
        title: String,
        price: f64,
        rating: u8,
        availability: bool,
        category: String,
        url: String,
    ) -> Result<Self, ValidationError> {
        let id = derive_id(&category, &title);
        Self::from_parts(id, title, price, rating, availability, category, url)
    }

    /// Creates a validated book record with a pre-existing identifier
    ///
    /// Used when reloading persisted records, where the identifier must be
    /// preserved as written rather than re-derived.
    pub fn from_parts(
        id: String,
        title: String,
        price: f64,
        rating: u8,
        availability: bool,
        category: String,
        url: String,
    ) -> Result<Self, ValidationError> {
        let book = Self {
            id,
            title,
            price,
            rating,
            availability,
            category,
            url,
        };
        book.validate()?;
        Ok(book)
    }

    /// Checks all field invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError {
                field: "title",
                message: "title cannot be empty".to_string(),
            });
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError {
                field: "price",
                message: format!("price must be non-negative, got {}", self.price),
            });
        }

        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError {
                field: "rating",
                message: format!("rating must be within 1..=5, got {}", self.rating),
            });
        }

        if self.category.trim().is_empty() {
            return Err(ValidationError {
                field: "category",
                message: "category cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Derives a stable identifier from a category and title
///
/// The identifier is a lowercase slug: runs of non-alphanumeric characters
/// collapse to a single `-`. Identical inputs always produce the same id.
pub fn derive_id(category: &str, title: &str) -> String {
    slug(&format!("{} {}", category, title))
}

fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.extend(c.to_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    out
}

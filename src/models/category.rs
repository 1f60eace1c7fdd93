use serde::{Deserialize, Serialize};

/// A book category with the ordered identifiers of its scraped books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category name, unique within a run
    pub name: String,

    /// Absolute URL of the category's first listing page
    pub url: String,

    /// Identifiers of the books scraped for this category, in listing order
    pub book_ids: Vec<String>,
}

impl Category {
    /// Creates an empty category
    pub fn new(name: String, url: String) -> Self {
        Self {
            name,
            url,
            book_ids: Vec::new(),
        }
    }

    /// Appends a book identifier, preserving listing order
    pub fn add_book(&mut self, id: impl Into<String>) {
        self.book_ids.push(id.into());
    }

    /// Number of books recorded for this category
    pub fn book_count(&self) -> usize {
        self.book_ids.len()
    }
}

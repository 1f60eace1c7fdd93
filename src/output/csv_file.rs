//! CSV persistence for book records
//!
//! The column order is fixed (`id,title,price,rating,availability,category,
//! url`) and prices are written with exactly two decimal places, so repeated
//! saves of the same records are byte-identical.

use crate::models::Book;
use crate::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One CSV row; field order here is the on-disk column order
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: String,
    title: String,
    price: String,
    rating: u8,
    availability: bool,
    category: String,
    url: String,
}

impl From<&Book> for CsvRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            price: format!("{:.2}", book.price),
            rating: book.rating,
            availability: book.availability,
            category: book.category.clone(),
            url: book.url.clone(),
        }
    }
}

impl CsvRow {
    fn into_book(self) -> std::result::Result<Book, ValidationError> {
        let price: f64 = self.price.parse().map_err(|_| ValidationError {
            field: "price",
            message: format!("not a number: {}", self.price),
        })?;

        Book::from_parts(
            self.id,
            self.title,
            price,
            self.rating,
            self.availability,
            self.category,
            self.url,
        )
    }
}

/// Writes book records to a CSV file
pub fn write_books(path: &Path, books: &[Book]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for book in books {
        writer.serialize(CsvRow::from(book))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads book records back from a CSV file
///
/// Every row is re-validated; a malformed row fails the load.
pub fn read_books(path: &Path) -> Result<Vec<Book>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut books = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        books.push(row?.into_book()?);
    }
    Ok(books)
}

//! JSON persistence for records and analysis artifacts

use crate::models::Book;
use crate::Result;
use serde::Serialize;
use std::path::Path;

/// Writes any serializable value as pretty-printed JSON
///
/// The output is deterministic for a given value, so repeated saves are
/// byte-identical.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, body)?;
    Ok(())
}

/// Reads book records back from a JSON array
///
/// Every record is re-validated; a malformed record fails the load.
pub fn read_books(path: &Path) -> Result<Vec<Book>> {
    let body = std::fs::read_to_string(path)?;
    let books: Vec<Book> = serde_json::from_str(&body)?;
    for book in &books {
        book.validate()?;
    }
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_json_price_is_numeric() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.json");
        let books = vec![Book::new(
            "Title".to_string(),
            51.77,
            4,
            true,
            "Poetry".to_string(),
            "http://example.test/t".to_string(),
        )
        .unwrap()];

        write_json(&path, &books).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value[0]["price"].is_number());
        assert_eq!(value[0]["rating"], 4);
        assert_eq!(value[0]["availability"], true);
    }

    #[test]
    fn test_read_revalidates_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","title":"X","price":-5.0,"rating":3,"availability":true,"category":"Travel","url":"http://example.test/x"}]"#,
        )
        .unwrap();

        assert!(read_books(&path).is_err());
    }
}

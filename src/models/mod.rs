//! Data models for scraped records
//!
//! Plain data holders with field validation at construction time. `Book` and
//! `Category` share no behavior beyond validation and identity, so there is no
//! trait hierarchy here.

mod book;
mod category;

// Re-export main types
pub use book::{derive_id, Book};
pub use category::Category;

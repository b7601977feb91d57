// Book model: one catalog record plus its availability status.
// A `Book` does not validate its own fields; the store assigns ids and the
// front end checks titles and years before they get here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Availability of a book.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    #[default]
    #[serde(alias = "в наличии")]
    Available,
    #[serde(alias = "выдана")]
    CheckedOut,
}

impl BookStatus {
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::CheckedOut];

    /// Label used both on disk and in the `Status:` column.
    pub fn label(self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" | "в наличии" => Ok(BookStatus::Available),
            "checked_out" | "checked out" | "checked-out" | "выдана" => Ok(BookStatus::CheckedOut),
            _ => Err(CatalogError::InvalidStatus(s.to_string())),
        }
    }
}

/// One catalog record. Field order matches the on-disk JSON object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: BookStatus,
}

impl Book {
    /// Create a book with the given id and the default status.
    pub fn new(id: u32, title: &str, author: &str, year: i32) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            year,
            status: BookStatus::default(),
        }
    }

    /// Search predicate: case-insensitive substring of title or author, or
    /// an exact year match when the whole term is a non-negative integer.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
        {
            return true;
        }
        year_term(term) == Some(self.year)
    }
}

/// A term counts as a year only if it is made of ASCII digits alone.
/// Other Unicode decimal digits are not read as years.
fn year_term(term: &str) -> Option<i32> {
    if term.is_empty() || !term.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    term.parse().ok()
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}

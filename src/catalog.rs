// Catalog store: owns every `Book`, hands out ids and reads/writes the
// JSON backing file. Nothing here prints; results and errors go back to the
// caller, and diagnostics go through `tracing`.

use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::book::{Book, BookStatus};
use crate::error::CatalogError;

/// Outcome of a successful status change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusChange {
    pub id: u32,
    pub previous: BookStatus,
    pub current: BookStatus,
}

/// In-memory book collection backed by a JSON file.
///
/// Insertion order is kept and is the order used by `list` and `search`.
/// `next_id` is recomputed from the loaded books and only ever grows, so a
/// deleted id is not handed out again while the store is alive.
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    books: Vec<Book>,
    next_id: u32,
    load_error: Option<CatalogError>,
}

impl Catalog {
    /// Open the catalog stored at `path`.
    ///
    /// A missing file gives an empty catalog. A file that cannot be read or
    /// parsed also gives an empty catalog; the problem is logged and kept
    /// in `load_error` for the front end to show.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (books, load_error) = match load_books(&path) {
            Ok(books) => {
                info!(path = %path.display(), count = books.len(), "loaded catalog");
                (books, None)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "starting with an empty catalog");
                (Vec::new(), Some(e))
            }
        };
        // `load_books` rejects `u32::MAX`, so a loaded max always has room.
        let next_id = books
            .iter()
            .map(|b| b.id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1))
            .unwrap_or(u32::MAX);
        Catalog {
            path,
            books,
            next_id,
            load_error,
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error that forced an empty start, if any.
    pub fn load_error(&self) -> Option<&CatalogError> {
        self.load_error.as_ref()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Append a new, available book and return it.
    ///
    /// Fails with `IdsExhausted` once the counter reaches `u32::MAX`.
    pub fn add(&mut self, title: &str, author: &str, year: i32) -> Result<&Book, CatalogError> {
        let next = self
            .next_id
            .checked_add(1)
            .ok_or(CatalogError::IdsExhausted)?;
        let book = Book::new(self.next_id, title, author, year);
        self.next_id = next;
        debug!(id = book.id, title = %book.title, "added book");
        self.books.push(book);
        Ok(&self.books[self.books.len() - 1])
    }

    /// Remove the book with `id`, keeping the order of the rest.
    pub fn delete(&mut self, id: u32) -> Result<Book, CatalogError> {
        let index = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let book = self.books.remove(index);
        debug!(id, title = %book.title, "deleted book");
        Ok(book)
    }

    /// Books whose title or author contains `term` (ignoring case), or whose
    /// year equals `term` when the whole term is a non-negative integer.
    pub fn search(&self, term: &str) -> Vec<&Book> {
        let hits: Vec<&Book> = self.books.iter().filter(|b| b.matches(term)).collect();
        debug!(term, hits = hits.len(), "searched catalog");
        hits
    }

    /// All books in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn change_status(
        &mut self,
        id: u32,
        status: BookStatus,
    ) -> Result<StatusChange, CatalogError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let previous = std::mem::replace(&mut book.status, status);
        debug!(id, %previous, current = %status, "changed status");
        Ok(StatusChange {
            id,
            previous,
            current: status,
        })
    }

    /// Ids currently present, in collection order.
    pub fn all_ids(&self) -> Vec<u32> {
        self.books.iter().map(|b| b.id).collect()
    }

    /// Write the whole catalog to the backing file, replacing what was there.
    pub fn save(&self) -> Result<(), CatalogError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.books.serialize(&mut ser)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
        // Write atomically
        let tmp = tmp_path(&self.path);
        std::fs::write(&tmp, &buf).map_err(|e| CatalogError::io(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(CatalogError::io(&self.path, e));
        }

        info!(path = %self.path.display(), count = self.books.len(), "saved catalog");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Read and check the backing file. A missing file is an empty catalog.
fn load_books(path: &Path) -> Result<Vec<Book>, CatalogError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(CatalogError::io(path, e)),
    };
    let books: Vec<Book> =
        serde_json::from_str(&contents).map_err(|e| CatalogError::malformed(path, e))?;

    let mut seen = HashSet::with_capacity(books.len());
    for book in &books {
        if book.id == 0 || book.id == u32::MAX {
            return Err(CatalogError::InvalidId {
                path: path.to_path_buf(),
                id: book.id,
            });
        }
        if !seen.insert(book.id) {
            return Err(CatalogError::DuplicateId {
                path: path.to_path_buf(),
                id: book.id,
            });
        }
    }
    Ok(books)
}

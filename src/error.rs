use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the catalog store.
///
/// Data problems (a malformed backing file, an unknown id) are all
/// recoverable: callers report them and carry on.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O error while reading or writing the backing file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a valid catalog
    #[error("could not read catalog {path}: {reason}. Is the file empty?")]
    Malformed { path: PathBuf, reason: String },

    /// Two records in the backing file share an id
    #[error("catalog {path} contains id {id} more than once")]
    DuplicateId { path: PathBuf, id: u32 },

    /// Ids start at 1; `u32::MAX` is reserved so the counter can always advance
    #[error("catalog {path} contains invalid id {id}")]
    InvalidId { path: PathBuf, id: u32 },

    /// Every id has been handed out
    #[error("no more book ids available")]
    IdsExhausted,

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No book with this id
    #[error("no book with ID {0}")]
    NotFound(u32),

    #[error("invalid status '{0}', expected 'available' or 'checked_out'")]
    InvalidStatus(String),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors that mean "the id does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// Where the catalog lives on disk.

use std::path::PathBuf;

/// Environment variable that overrides the default catalog location.
pub const CATALOG_FILE_ENV: &str = "BOOK_CATALOG_FILE";

/// File name used inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "library.json";

/// Resolve the backing file using a priority chain:
///
/// 1. Explicit override (the `--file` flag), if `Some`
/// 2. `BOOK_CATALOG_FILE`
/// 3. `<data dir>/book-catalog/library.json`, or `./library.json` when the
///    platform has no data directory
pub fn resolve_catalog_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    match std::env::var_os(CATALOG_FILE_ENV) {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => default_catalog_path(),
    }
}

pub fn default_catalog_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("book-catalog").join(DEFAULT_FILE_NAME),
        None => PathBuf::from(DEFAULT_FILE_NAME),
    }
}

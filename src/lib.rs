// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) parses arguments, sets up logging and hands over to `ui`.
//
// Module responsibilities:
// - `book`: the `Book` record and its `BookStatus`.
// - `catalog`: the in-memory store, id assignment, search and the JSON
//   backing file.
// - `config`: where the backing file lives.
// - `error`: `CatalogError`, shared by the store and the UI.
// - `ui`: interactive menu and one-shot subcommands; all input validation
//   happens here.
pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ui;

pub use book::{Book, BookStatus};
pub use catalog::{Catalog, StatusChange};
pub use error::CatalogError;

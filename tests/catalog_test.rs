//! End-to-end behavior of the catalog store through the public API.

use book_catalog::{BookStatus, Catalog, CatalogError};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn scratch() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test_library.json");
    (dir, path)
}

#[test]
fn add_assigns_first_id_and_default_status() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    let book = catalog.add("Test Title", "Test Author", 2023).unwrap();
    assert_eq!(book.id, 1);
    assert_eq!(book.status, BookStatus::Available);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.list()[0].title, "Test Title");
}

#[test]
fn ids_strictly_increase() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    let ids: Vec<u32> = (0..10)
        .map(|i| catalog.add(&format!("Book {i}"), "Author", 2000 + i).unwrap().id)
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids, catalog.all_ids());
}

#[test]
fn save_and_reload_round_trip() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("Test Title", "Test Author", 2023).unwrap();
    catalog.add("Another Book", "Another Author", 2022).unwrap();
    catalog.change_status(2, BookStatus::CheckedOut).unwrap();
    catalog.save().unwrap();

    let reloaded = Catalog::open(&path);
    assert!(reloaded.load_error().is_none());
    assert_eq!(reloaded.list(), catalog.list());
    assert_eq!(reloaded.list()[0].id, 1);
    assert_eq!(reloaded.list()[0].title, "Test Title");
}

#[test]
fn reload_after_delete_keeps_ids_and_continues_from_max() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("A", "a", 1).unwrap();
    catalog.add("B", "b", 2).unwrap();
    catalog.add("C", "c", 3).unwrap();
    catalog.delete(3).unwrap();
    catalog.delete(1).unwrap();
    catalog.save().unwrap();

    let mut reloaded = Catalog::open(&path);
    assert_eq!(reloaded.all_ids(), vec![2]);
    assert_eq!(reloaded.add("D", "d", 4).unwrap().id, 3);
}

#[test]
fn save_overwrites_previous_contents() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("A", "a", 1).unwrap();
    catalog.add("B", "b", 2).unwrap();
    catalog.save().unwrap();
    catalog.delete(1).unwrap();
    catalog.save().unwrap();

    let reloaded = Catalog::open(&path);
    assert_eq!(reloaded.all_ids(), vec![2]);
}

#[test]
fn delete_removes_one_and_keeps_order() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("A", "a", 1).unwrap();
    catalog.add("B", "b", 2).unwrap();
    catalog.add("C", "c", 3).unwrap();
    let removed = catalog.delete(2).unwrap();
    assert_eq!(removed.title, "B");
    assert_eq!(catalog.all_ids(), vec![1, 3]);
}

#[test]
fn delete_unknown_id_leaves_catalog_unchanged() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("A", "a", 1).unwrap();
    let before = catalog.list().to_vec();

    let err = catalog.delete(99).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, CatalogError::NotFound(99)));
    assert_eq!(catalog.list(), before.as_slice());
}

#[test]
fn search_matches_first_entry_only() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("Test Title", "Test Author", 2023).unwrap();
    catalog.add("Another Book", "Another Author", 2022).unwrap();

    let results = catalog.search("Test");
    assert_eq!(catalog.len(), 2);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Test Title");
}

#[test]
fn search_is_case_insensitive_across_title_author_and_year() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("Dune", "Frank Herbert", 1965).unwrap();
    catalog.add("Neuromancer", "William Gibson", 1984).unwrap();
    catalog.add("Nineteen Eighty-Four", "George Orwell", 1949).unwrap();

    let titles = |term: &str| -> Vec<String> {
        catalog.search(term).iter().map(|b| b.title.clone()).collect()
    };
    assert_eq!(titles("dUNE"), vec!["Dune"]);
    assert_eq!(titles("gibson"), vec!["Neuromancer"]);
    assert_eq!(titles("1984"), vec!["Neuromancer"]);
    assert_eq!(titles("1984 Gibson"), Vec::<String>::new());
    assert_eq!(titles("n"), vec!["Dune", "Neuromancer", "Nineteen Eighty-Four"]);
    assert!(catalog.search("tolkien").is_empty());
}

#[test]
fn change_status_touches_only_target() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("A", "a", 1).unwrap();
    catalog.add("B", "b", 2).unwrap();
    let before = catalog.list().to_vec();

    let change = catalog.change_status(2, BookStatus::CheckedOut).unwrap();
    assert_eq!(change.previous, BookStatus::Available);
    assert_eq!(change.current, BookStatus::CheckedOut);

    assert_eq!(catalog.list()[0], before[0]);
    let b = catalog.get(2).unwrap();
    assert_eq!(b.status, BookStatus::CheckedOut);
    assert_eq!((b.title.as_str(), b.author.as_str(), b.year), ("B", "b", 2));
}

#[test]
fn change_status_unknown_id_is_not_found() {
    let (_dir, path) = scratch();
    let mut catalog = Catalog::open(&path);
    catalog.add("A", "a", 1).unwrap();
    let err = catalog.change_status(5, BookStatus::CheckedOut).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(catalog.list()[0].status, BookStatus::Available);
}

#[test]
fn malformed_file_degrades_to_empty() {
    let (_dir, path) = scratch();
    std::fs::write(&path, "{ not json").unwrap();
    let mut catalog = Catalog::open(&path);
    assert!(catalog.is_empty());
    assert!(matches!(catalog.load_error(), Some(CatalogError::Malformed { .. })));
    assert_eq!(catalog.add("A", "a", 1).unwrap().id, 1);
}

#[test]
fn unknown_status_on_disk_is_malformed() {
    let (_dir, path) = scratch();
    std::fs::write(
        &path,
        r#"[{"id": 1, "title": "A", "author": "a", "year": 1, "status": "lost"}]"#,
    )
    .unwrap();
    let catalog = Catalog::open(&path);
    assert!(catalog.is_empty());
    assert!(catalog.load_error().is_some());
}

#[test]
fn separate_stores_do_not_share_id_counters() {
    let (_dir_a, path_a) = scratch();
    let (_dir_b, path_b) = scratch();
    let mut a = Catalog::open(&path_a);
    let mut b = Catalog::open(&path_b);
    a.add("A1", "a", 1).unwrap();
    a.add("A2", "a", 2).unwrap();
    assert_eq!(b.add("B1", "b", 1).unwrap().id, 1);
}

#[test]
fn unreadable_path_degrades_to_empty_with_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::open(dir.path());
    assert!(catalog.is_empty());
    assert!(matches!(catalog.load_error(), Some(CatalogError::Io { .. })));
    assert_eq!(catalog.add("A", "a", 1).unwrap().id, 1);
}

#[test]
fn legacy_status_labels_are_rewritten_on_save() {
    let (_dir, path) = scratch();
    std::fs::write(
        &path,
        r#"[{"id": 1, "title": "A", "author": "a", "year": 1, "status": "выдана"},
            {"id": 2, "title": "B", "author": "b", "year": 2, "status": "в наличии"}]"#,
    )
    .unwrap();
    let catalog = Catalog::open(&path);
    assert!(catalog.load_error().is_none());
    catalog.save().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"status\": \"checked_out\""));
    assert!(text.contains("\"status\": \"available\""));
    assert!(!text.contains("выдана"));
    assert!(!text.contains("в наличии"));
}

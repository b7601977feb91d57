// UI layer: the interactive menu (dialoguer) and the one-shot subcommands.
// All user input is checked here, before it reaches the catalog: years must
// be in range, ids must parse, statuses come from a fixed list.

use crate::book::{Book, BookStatus};
use crate::catalog::{Catalog, StatusChange};
use crate::error::CatalogError;
use anyhow::{Context, Result};
use clap::Subcommand;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Latest publication year accepted at input.
pub const MAX_YEAR: i32 = 2024;

/// Non-interactive commands. Each one that changes the catalog saves it
/// once before returning.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a book
    Add {
        #[arg(value_parser = parse_text)]
        title: String,
        #[arg(value_parser = parse_text)]
        author: String,
        /// Publication year (0-2024)
        #[arg(value_parser = parse_year, allow_negative_numbers = true)]
        year: i32,
    },
    /// Delete a book by ID
    Delete { id: u32 },
    /// Search by title, author or year
    Search { term: String },
    /// List all books
    List,
    /// Change the status of a book
    Status {
        id: u32,
        /// 'available' or 'checked_out'
        status: BookStatus,
    },
}

/// Range check shared by the menu prompt and the `add` subcommand.
pub fn check_year(year: i32) -> Result<(), String> {
    if (0..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(format!("Year must be between 0 and {}", MAX_YEAR))
    }
}

fn parse_text(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        Err("This field cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn parse_year(s: &str) -> Result<i32, String> {
    let year: i32 = s
        .trim()
        .parse()
        .map_err(|_| "Year must be a whole number".to_string())?;
    check_year(year)?;
    Ok(year)
}

/// Main interactive menu. Runs until the user picks "Exit", which saves the
/// catalog; that is the only save of the session.
pub fn main_menu(mut catalog: Catalog) -> Result<()> {
    let items = [
        "Add book",
        "Delete book",
        "Search books",
        "List all books",
        "Change book status",
        "Exit",
    ];
    loop {
        let selection = Select::new()
            .with_prompt("Menu")
            .items(&items[..])
            .default(0)
            .interact()?;
        match selection {
            0 => handle_add(&mut catalog)?,
            1 => handle_delete(&mut catalog)?,
            2 => {
                let term: String = Input::new()
                    .with_prompt("Search (title, author or year)")
                    .allow_empty(true)
                    .interact_text()?;
                print_search(&catalog.search(&term));
            }
            3 => print_list(catalog.list()),
            4 => handle_change_status(&mut catalog)?,
            5 => {
                save_with_retry(&catalog)?;
                break;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Run a single subcommand against the catalog.
pub fn run_command(catalog: &mut Catalog, command: Command) -> Result<()> {
    let changed = match command {
        Command::Add {
            title,
            author,
            year,
        } => report_add(catalog.add(&title, &author, year)),
        Command::Delete { id } => report_delete(catalog.delete(id)),
        Command::Search { term } => {
            print_search(&catalog.search(&term));
            false
        }
        Command::List => {
            print_list(catalog.list());
            false
        }
        Command::Status { id, status } => report_change(catalog.change_status(id, status)),
    };
    if changed {
        save(catalog).with_context(|| format!("Failed to save {}", catalog.path().display()))?;
    }
    Ok(())
}

/// Tell the user the catalog started empty because the file was unreadable.
pub fn report_load_error(catalog: &Catalog) {
    if let Some(e) = catalog.load_error() {
        eprintln!("{}", format!("Could not load the catalog: {}", e).red());
    }
}

fn handle_add(catalog: &mut Catalog) -> Result<()> {
    let title: String = Input::new()
        .with_prompt("Title")
        .validate_with(non_empty)
        .interact_text()?;
    let author: String = Input::new()
        .with_prompt("Author")
        .validate_with(non_empty)
        .interact_text()?;
    // `Input<i32>` re-prompts on anything that is not an integer.
    let year: i32 = Input::new()
        .with_prompt("Publication year")
        .validate_with(|year: &i32| check_year(*year))
        .interact_text()?;

    report_add(catalog.add(title.trim(), author.trim(), year));
    Ok(())
}

fn handle_delete(catalog: &mut Catalog) -> Result<()> {
    let id: u32 = Input::new()
        .with_prompt("ID of the book to delete")
        .interact_text()?;
    report_delete(catalog.delete(id));
    Ok(())
}

fn handle_change_status(catalog: &mut Catalog) -> Result<()> {
    if catalog.is_empty() {
        println!("{}", "The catalog is empty".yellow());
        return Ok(());
    }
    let ids = catalog.all_ids();
    let id: u32 = Input::new()
        .with_prompt("ID of the book")
        .validate_with(|id: &u32| -> Result<(), &'static str> {
            if ids.contains(id) {
                Ok(())
            } else {
                Err("No book with that ID")
            }
        })
        .interact_text()?;

    let current = catalog.get(id).map(|b| b.status).unwrap_or_default();
    let labels: Vec<&str> = BookStatus::ALL.iter().map(|s| s.label()).collect();
    let default = BookStatus::ALL.iter().position(|s| *s != current).unwrap_or(0);
    let choice = Select::new()
        .with_prompt("New status")
        .items(&labels)
        .default(default)
        .interact()?;

    report_change(catalog.change_status(id, BookStatus::ALL[choice]));
    Ok(())
}

fn non_empty(input: &String) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("This field cannot be empty")
    } else {
        Ok(())
    }
}

fn report_add(result: Result<&Book, CatalogError>) -> bool {
    match result {
        Ok(book) => {
            println!("{}", format!("Book '{}' added with ID {}", book.title, book.id).green());
            true
        }
        Err(e) => {
            println!("{}", format!("Book not added: {}", e).red());
            false
        }
    }
}

fn report_delete(result: Result<Book, CatalogError>) -> bool {
    match result {
        Ok(book) => {
            println!("{}", format!("Book with ID {} deleted", book.id).green());
            true
        }
        Err(e) => {
            println!("{}", format!("Book not deleted: {}", e).yellow());
            false
        }
    }
}

fn report_change(result: Result<StatusChange, CatalogError>) -> bool {
    match result {
        Ok(change) => {
            println!(
                "{}",
                format!(
                    "Status of book with ID {} changed from '{}' to '{}'",
                    change.id, change.previous, change.current
                )
                .green()
            );
            true
        }
        Err(e) => {
            println!("{}", format!("Status not changed: {}", e).yellow());
            false
        }
    }
}

fn print_search(results: &[&Book]) {
    if results.is_empty() {
        println!("{}", "No books found".yellow());
        return;
    }
    println!("Search results:");
    for book in results {
        println!("{}", book);
    }
}

fn print_list(books: &[Book]) {
    if books.is_empty() {
        println!("{}", "The catalog is empty".yellow());
        return;
    }
    println!("All books:");
    for book in books {
        println!("{}", book);
    }
}

/// Save behind a spinner.
fn save(catalog: &Catalog) -> Result<(), CatalogError> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Saving {}...", catalog.path().display()));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = catalog.save();
    spinner.finish_and_clear();
    result
}

/// On exit, keep offering to retry a failed save; declining drops the
/// session's changes.
fn save_with_retry(catalog: &Catalog) -> Result<()> {
    loop {
        match save(catalog) {
            Ok(()) => {
                println!("{}", format!("Catalog saved to {}", catalog.path().display()).green());
                return Ok(());
            }
            Err(e) => {
                println!("{}", format!("Save failed: {}", e).red());
                let retry = Confirm::new()
                    .with_prompt("Retry saving?")
                    .default(true)
                    .interact()?;
                if !retry {
                    println!("{}", "Exiting without saving".yellow());
                    return Ok(());
                }
            }
        }
    }
}

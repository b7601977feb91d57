// Entrypoint for the CLI application.
// - Keeps `main` small: resolve the catalog file, open it and hand it to
//   the UI (interactive menu, or a single subcommand).
// - Logs go to stderr so catalog output on stdout stays clean.

use std::path::PathBuf;

use book_catalog::{
    catalog::Catalog,
    config::resolve_catalog_path,
    ui::{main_menu, report_load_error, run_command, Command},
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "book-catalog")]
#[command(about = "Keep a catalog of books in a local JSON file", long_about = None)]
struct Cli {
    /// Catalog file (defaults to $BOOK_CATALOG_FILE, then the user data directory)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Run one command and exit; without one the interactive menu starts
    #[command(subcommand)]
    command: Option<Command>,
}

fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("book_catalog={}", log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let path = resolve_catalog_path(cli.file);
    tracing::debug!(path = %path.display(), "using catalog file");
    let mut catalog = Catalog::open(path);
    report_load_error(&catalog);

    match cli.command {
        Some(command) => run_command(&mut catalog, command)?,
        // Blocks until the user picks "Exit".
        None => main_menu(catalog)?,
    }
    Ok(())
}

//! Catalog client CLI application.
//!
//! Stands in for the grid and detail screens: lists a category, shows one
//! entry, or walks a whole list through the detail lookup.

use anyhow::{Context, Result};
use catalog_client::{CatalogClient, CatalogError};
use clap::{Parser, Subcommand};
use shared::{CatalogPage, Category, Config, DataPaths, Entry, PageSource};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the entries of a category
    Top {
        /// manga or recommendations
        #[arg(short = 'k', long, default_value = "manga")]
        category: Category,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single entry
    Get {
        /// MyAnimeList ID
        id: u32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List a category, then open every entry on it
    Browse {
        /// manga or recommendations
        #[arg(default_value = "manga")]
        category: Category,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let mut log_config = shared::LogConfig::from_config(&config, "catalog-client");
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    info!("Catalog client starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    let data_paths = DataPaths::from_config(&config);
    data_paths
        .create_dirs()
        .context("Failed to create data directories")?;

    let client = CatalogClient::from_config(&config).context("Failed to create catalog client")?;

    match args.command {
        Command::Top { category, json } => {
            let page = client.fetch_top(category).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_page(&page);
            }
        }
        Command::Get { id, json } => match client.fetch_by_id(id).await {
            Ok(entry) if json => println!("{}", serde_json::to_string_pretty(&entry)?),
            Ok(entry) => print_entry(&entry),
            Err(e) => print_lookup_error(id, &e),
        },
        Command::Browse { category } => {
            let page = client.fetch_top(category).await;
            print_page(&page);

            let mut missing = 0;
            for entry in &page.entries {
                match client.fetch_by_id(entry.id).await {
                    Ok(entry) => print_entry(&entry),
                    Err(e) => {
                        missing += 1;
                        print_lookup_error(entry.id, &e);
                    }
                }
            }

            let stats = client.cache_stats().await;
            info!(
                entries = page.len(),
                missing = missing,
                cached_pages = stats.pages,
                cached_entries = stats.entries,
                "Browse complete"
            );
        }
    }

    info!("Catalog client finished");

    Ok(())
}

fn print_page(page: &CatalogPage) {
    match &page.source {
        PageSource::Network => println!("== {} ({} entries)", page.category, page.len()),
        PageSource::Snapshot => println!(
            "== {} ({} entries, offline snapshot)",
            page.category,
            page.len()
        ),
        PageSource::Unavailable { reason } => {
            println!("== {} unavailable: {}", page.category, reason);
            return;
        }
    }

    if page.is_empty() {
        println!("(no entries)");
        return;
    }

    for entry in &page.entries {
        println!(
            "{:>7}  {:<48}  {:>5}  {}",
            entry.id,
            truncate(&entry.title, 48),
            format_score(entry.score),
            entry.kind
        );
    }
}

fn print_entry(entry: &Entry) {
    println!();
    println!("{} [{}]", entry.title, entry.id);
    println!(
        "  score: {}  status: {}  type: {}",
        format_score(entry.score),
        or_dash(&entry.status),
        or_dash(&entry.kind)
    );
    if entry.needs_placeholder() {
        println!("  image: (placeholder)");
    } else {
        println!("  image: {}", entry.image_url);
    }
    if !entry.synopsis.is_empty() {
        println!("  {}", entry.synopsis);
    }
}

fn print_lookup_error(id: u32, error: &CatalogError) {
    match error {
        CatalogError::NotFound(_) => println!("Entry {} not found", id),
        other => println!("Entry {} unavailable: {}", id, other),
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{:.2}", s))
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

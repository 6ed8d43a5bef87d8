//! Manga catalog CLI.
//!
//! Command-line front end over the catalog, preference, and UI-state
//! stores. Showing a title records a visit in the view history, the same
//! obligation the routing layer of a graphical front end would have.

use anyhow::{Context, Result};
use catalog::{CatalogStore, HttpCatalogSource, PreferenceStore, UiStateStore};
use clap::{Parser, Subcommand};
use shared::models::{
    CompletionStatus, FilterOptions, SortDirection, SortField, SortOption,
};
use shared::storage::SqliteStore;
use shared::Config;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Browse the manga catalog from the command line")]
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
    /// List titles matching the given filters
    List {
        /// Free-text search over titles, authors, and publishers
        #[arg(long, default_value = "")]
        search: String,

        /// Genre to match (repeatable; a title matches any of them)
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Tag to match (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Completion status to match (repeatable)
        #[arg(long = "status")]
        status: Vec<CompletionStatus>,

        /// Earliest release year, inclusive
        #[arg(long)]
        year_from: Option<i32>,

        /// Latest release year, inclusive
        #[arg(long)]
        year_to: Option<i32>,

        /// Minimum chapter count, inclusive
        #[arg(long)]
        chapters_from: Option<u32>,

        /// Maximum chapter count, inclusive
        #[arg(long)]
        chapters_to: Option<u32>,

        /// Minimum rating (0 disables)
        #[arg(long)]
        min_rating: Option<f64>,

        /// Sort field (title, release-date, rating)
        #[arg(long, default_value = "release-date")]
        sort: SortField,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Use the saved filter snapshot instead of the flags
        #[arg(long)]
        saved: bool,

        /// Save these filters as the snapshot for later runs
        #[arg(long)]
        save: bool,
    },

    /// Show one title with its related recommendations (records a visit)
    Show {
        /// Title id
        id: String,
    },

    /// Toggle the favorite state of a title
    Favorite {
        /// Title id
        id: String,
    },

    /// List favorited title ids
    Favorites,

    /// Show the view history, most recent first
    History {
        /// Clear the history instead of showing it
        #[arg(long)]
        clear: bool,
    },

    /// List the selectable genre and tag facets of the loaded catalog
    Facets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "catalog".to_string(),
        default_level: log_level,
        console: args.verbose,
        file: true,
    })?;

    info!(config_file = %args.config.display(), "Catalog CLI starting");

    match args.command {
        Command::List {
            search,
            genres,
            tags,
            status,
            year_from,
            year_to,
            chapters_from,
            chapters_to,
            min_rating,
            sort,
            asc,
            saved,
            save,
        } => {
            let store = load_catalog(&config).await?;
            let mut ui_state = UiStateStore::new(open_storage(&config)?)?;
            ui_state.initialize_filters(&store.genres(), &store.tags());

            if saved {
                ui_state.load_saved_filters();
            } else {
                ui_state.set_filter_options(FilterOptions {
                    search,
                    genres,
                    tags,
                    status,
                    year_from,
                    year_to,
                    chapters_from,
                    chapters_to,
                    min_rating,
                });
            }
            ui_state.set_sort_option(SortOption {
                field: sort,
                direction: if asc {
                    SortDirection::Asc
                } else {
                    SortDirection::Desc
                },
            });

            if save {
                ui_state.save_filters()?;
                info!("Saved current filters");
            }

            let filtered = store.filter(ui_state.filter_options());
            let listed = catalog::sort_mangas(&filtered, &ui_state.sort_option());

            for manga in &listed {
                println!(
                    "{:<24} {:<10} {:>4.1}  {}",
                    manga.id, manga.release_date, manga.rating, manga.title
                );
            }
            info!(matched = listed.len(), total = store.mangas().len(), "Listed titles");
        }

        Command::Show { id } => {
            let store = load_catalog(&config).await?;
            let mut prefs = PreferenceStore::new(open_storage(&config)?)?;

            let Some(manga) = store.get_by_id(&id) else {
                println!("Title not found: {}", id);
                return Ok(());
            };

            // The routing layer's obligation: record the visit
            prefs.record_visit(&id)?;

            println!("{} ({})", manga.title, manga.id);
            if let Some(original) = &manga.original_title {
                println!("  original title: {}", original);
            }
            for author in &manga.authors {
                match author.role.and_then(|role| role.label()) {
                    Some(label) => println!("  author: {} ({})", author.name, label),
                    None => println!("  author: {}", author.name),
                }
            }
            println!("  publisher: {}", manga.publisher);
            println!("  released: {}", manga.release_date);
            println!("  status: {}", manga.completion_status);
            println!("  rating: {:.1}", manga.rating);
            println!("  genres: {}", manga.genres.join(", "));
            println!("  tags: {}", manga.tags.join(", "));
            println!(
                "  favorite: {}",
                if prefs.is_favorite(&id) { "yes" } else { "no" }
            );

            let related = store.related_to(manga);
            if related.is_empty() {
                println!("  related: none");
            } else {
                for rec in &related {
                    println!("  related: {} ({})", rec.title, rec.id);
                }
            }
        }

        Command::Favorite { id } => {
            let mut prefs = PreferenceStore::new(open_storage(&config)?)?;
            let now_favorited = prefs.toggle_favorite(&id)?;
            println!(
                "{}: {}",
                id,
                if now_favorited {
                    "now favorited"
                } else {
                    "now unfavorited"
                }
            );
        }

        Command::Favorites => {
            let prefs = PreferenceStore::new(open_storage(&config)?)?;
            for id in prefs.favorites() {
                println!("{}", id);
            }
            info!(count = prefs.favorites().len(), "Listed favorites");
        }

        Command::History { clear } => {
            let mut prefs = PreferenceStore::new(open_storage(&config)?)?;
            if clear {
                prefs.clear_history()?;
                println!("History cleared");
            } else {
                for item in prefs.history() {
                    println!("{:>15}  {}", item.timestamp, item.manga_id);
                }
            }
        }

        Command::Facets => {
            let store = load_catalog(&config).await?;
            let mut ui_state = UiStateStore::new(open_storage(&config)?)?;
            ui_state.initialize_filters(&store.genres(), &store.tags());

            println!("genres: {}", ui_state.available_genres().join(", "));
            println!("tags: {}", ui_state.available_tags().join(", "));
        }
    }

    Ok(())
}

/// Fetch the catalog once; the stores read it for the rest of the run
async fn load_catalog(config: &Config) -> Result<CatalogStore> {
    let source = HttpCatalogSource::new(
        config.titles_url(),
        config.media_mix_url(),
        Duration::from_secs(config.catalog.timeout_seconds),
    )?;

    let mut store = CatalogStore::new();
    store
        .load(&source)
        .await
        .context("Failed to load the catalog")?;

    Ok(store)
}

fn open_storage(config: &Config) -> Result<SqliteStore> {
    SqliteStore::open(config.storage_path())
        .with_context(|| format!("Failed to open storage at {}", config.storage_path().display()))
}

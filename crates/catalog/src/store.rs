//! In-memory catalog store.
//!
//! Holds the full title list for the lifetime of the process. One load
//! fetches the two catalog documents, orders the list by descending
//! release date, and merges the media-mix overrides into it; every later
//! read (lookup, filter, sort, related titles) is synchronous and
//! side-effect-free. Title records are never edited in place — a reload
//! replaces the list wholesale.

use crate::api::{CatalogError, CatalogSource};
use crate::query::{filter_mangas, sort_mangas};
use crate::scoring::related_mangas;
use shared::models::{FilterOptions, Manga, MediaMixMap, SortOption};
use tracing::{error, info};

/// The loaded catalog and its load status
#[derive(Default)]
pub struct CatalogStore {
    manga_list: Vec<Manga>,
    is_loading: bool,
    last_error: Option<String>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch both catalog documents and replace the list wholesale.
    ///
    /// The two fetches run concurrently and join before the merge step.
    /// On failure the previous list is left untouched and the error is
    /// also recorded as a user-facing message on the store.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> Result<(), CatalogError> {
        self.is_loading = true;
        self.last_error = None;

        let fetched = tokio::try_join!(source.fetch_titles(), source.fetch_media_mix());

        let result = match fetched {
            Ok((titles, overrides)) => {
                self.manga_list = assemble(titles, overrides);
                info!(titles = self.manga_list.len(), "Catalog loaded");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Catalog load failed");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        };

        self.is_loading = false;
        result
    }

    /// The loaded title list, descending by release date
    pub fn mangas(&self) -> &[Manga] {
        &self.manga_list
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The user-facing message of the last failed load, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Look up a title by id
    pub fn get_by_id(&self, id: &str) -> Option<&Manga> {
        self.manga_list.iter().find(|manga| manga.id == id)
    }

    /// Titles satisfying all active filter criteria
    pub fn filter(&self, options: &FilterOptions) -> Vec<Manga> {
        filter_mangas(&self.manga_list, options)
    }

    /// A new ordering of the loaded list
    pub fn sorted(&self, sort: &SortOption) -> Vec<Manga> {
        sort_mangas(&self.manga_list, sort)
    }

    /// The up-to-two titles most related to `target`
    pub fn related_to(&self, target: &Manga) -> Vec<Manga> {
        related_mangas(&self.manga_list, target)
    }

    /// Genre vocabulary across the loaded catalog, duplicates included;
    /// the UI-state store deduplicates when initializing facets
    pub fn genres(&self) -> Vec<String> {
        self.manga_list
            .iter()
            .flat_map(|manga| manga.genres.iter().cloned())
            .collect()
    }

    /// Tag vocabulary across the loaded catalog, duplicates included
    pub fn tags(&self) -> Vec<String> {
        self.manga_list
            .iter()
            .flat_map(|manga| manga.tags.iter().cloned())
            .collect()
    }
}

/// Order the raw list by descending release date (unparsable dates sink
/// to the end, ties keep source order) and apply the media-mix
/// overrides. An override replaces the title's own value by presence; it
/// is not a deep merge.
fn assemble(mut titles: Vec<Manga>, mut overrides: MediaMixMap) -> Vec<Manga> {
    titles.sort_by(|a, b| b.release_date_parsed().cmp(&a.release_date_parsed()));

    for manga in &mut titles {
        if let Some(media_mix) = overrides.remove(&manga.id) {
            manga.media_mix = Some(media_mix);
        }
    }

    titles
}

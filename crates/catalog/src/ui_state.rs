//! UI-state store.
//!
//! Owns the transient filter/sort criteria and the persisted UI settings
//! (dark mode, page size, saved filters). The selectable facet values are
//! derived from the loaded catalog and must be re-initialized whenever
//! the catalog reloads.

use shared::models::{FilterOptions, SortOption, UiSettings};
use shared::storage::KeyValueStore;
use shared::Result;

/// Storage key of the persisted UI settings
const UI_SETTINGS_KEY: &str = "manga-ui-settings";

/// Transient query criteria plus persisted UI settings
pub struct UiStateStore<S: KeyValueStore> {
    storage: S,
    settings: UiSettings,
    filter_options: FilterOptions,
    sort_option: SortOption,
    available_genres: Vec<String>,
    available_tags: Vec<String>,
}

impl<S: KeyValueStore> UiStateStore<S> {
    /// Read persisted settings, or start from defaults on first use.
    /// Filter and sort criteria always start from their defaults.
    pub fn new(storage: S) -> Result<Self> {
        let settings = storage.get_json(UI_SETTINGS_KEY)?.unwrap_or_default();
        Ok(Self {
            storage,
            settings,
            filter_options: FilterOptions::default(),
            sort_option: SortOption::default(),
            available_genres: Vec::new(),
            available_tags: Vec::new(),
        })
    }

    fn persist(&self) -> Result<()> {
        self.storage.set_json(UI_SETTINGS_KEY, &self.settings)
    }

    /// Set the selectable facet values from the catalog's vocabulary,
    /// deduplicated and sorted. Must be re-run after a catalog reload.
    pub fn initialize_filters(&mut self, genres: &[String], tags: &[String]) {
        self.available_genres = dedupe_sorted(genres);
        self.available_tags = dedupe_sorted(tags);
    }

    pub fn available_genres(&self) -> &[String] {
        &self.available_genres
    }

    pub fn available_tags(&self) -> &[String] {
        &self.available_tags
    }

    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter_options
    }

    pub fn set_filter_options(&mut self, options: FilterOptions) {
        self.filter_options = options;
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    pub fn set_sort_option(&mut self, sort: SortOption) {
        self.sort_option = sort;
    }

    /// Restore the filter criteria to their documented defaults
    pub fn reset_filters(&mut self) {
        self.filter_options = FilterOptions::default();
    }

    /// Snapshot the current filter criteria into the persisted settings
    pub fn save_filters(&mut self) -> Result<()> {
        self.settings.saved_filters = Some(self.filter_options.clone());
        self.persist()
    }

    /// Restore the filter criteria from the persisted snapshot, if one
    /// exists. Saved facet values are not validated against the current
    /// catalog; stale values simply match nothing.
    pub fn load_saved_filters(&mut self) {
        if let Some(saved) = &self.settings.saved_filters {
            self.filter_options = saved.clone();
        }
    }

    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    pub fn toggle_dark_mode(&mut self) -> Result<()> {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.persist()
    }

    pub fn set_items_per_page(&mut self, count: u32) -> Result<()> {
        self.settings.items_per_page = count;
        self.persist()
    }
}

fn dedupe_sorted(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = values.to_vec();
    out.sort();
    out.dedup();
    out
}

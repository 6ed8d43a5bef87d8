//! Catalog library for browsing manga titles.
//!
//! This library provides the in-memory catalog store (load, lookup,
//! filter, sort), the relationship-scoring heuristic behind related-title
//! recommendations, and the two user-state stores (preferences and UI
//! state) persisted through the shared key-value storage.

pub mod api;
pub mod prefs;
pub mod query;
pub mod scoring;
pub mod store;
pub mod ui_state;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::{CatalogError, CatalogSource, HttpCatalogSource};
pub use prefs::PreferenceStore;
pub use query::{filter_mangas, sort_mangas};
pub use scoring::{related_mangas, relationship_score};
pub use store::CatalogStore;
pub use ui_state::UiStateStore;

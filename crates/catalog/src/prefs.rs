//! User preference store.
//!
//! Owns the persisted user-preferences record: the favorites set, the
//! bounded view history, and the UI settings carried inside the record.
//! The record is read once on construction (falling back to defaults)
//! and written through on every mutation.

use chrono::Utc;
use shared::models::{HistoryItem, UserPreferences};
use shared::storage::KeyValueStore;
use shared::Result;
use tracing::debug;

/// Storage key of the persisted preferences record
const PREFERENCES_KEY: &str = "manga-user-preferences";

/// Maximum number of history entries retained
const HISTORY_LIMIT: usize = 20;

/// Favorites and view history, persisted through a key-value store
pub struct PreferenceStore<S: KeyValueStore> {
    storage: S,
    prefs: UserPreferences,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Read the persisted record, or start from defaults on first use
    pub fn new(storage: S) -> Result<Self> {
        let prefs = storage
            .get_json(PREFERENCES_KEY)?
            .unwrap_or_default();
        Ok(Self { storage, prefs })
    }

    fn persist(&self) -> Result<()> {
        self.storage.set_json(PREFERENCES_KEY, &self.prefs)
    }

    /// Flip the favorite state of a title.
    ///
    /// Returns `true` when the title is now favorited.
    pub fn toggle_favorite(&mut self, manga_id: &str) -> Result<bool> {
        let now_favorited =
            if let Some(pos) = self.prefs.favorites.iter().position(|id| id == manga_id) {
                self.prefs.favorites.remove(pos);
                false
            } else {
                self.prefs.favorites.push(manga_id.to_string());
                true
            };

        self.persist()?;
        debug!(manga_id = manga_id, favorited = now_favorited, "Toggled favorite");
        Ok(now_favorited)
    }

    pub fn is_favorite(&self, manga_id: &str) -> bool {
        self.prefs.favorites.iter().any(|id| id == manga_id)
    }

    /// Favorited ids in insertion order (the order carries no meaning)
    pub fn favorites(&self) -> &[String] {
        &self.prefs.favorites
    }

    /// Record a visit to a title at the current time
    pub fn record_visit(&mut self, manga_id: &str) -> Result<()> {
        self.record_visit_at(manga_id, Utc::now().timestamp_millis())
    }

    /// Upsert a history entry: any prior entry for the same title is
    /// replaced, and only the most recent entries are retained.
    fn record_visit_at(&mut self, manga_id: &str, timestamp: i64) -> Result<()> {
        self.prefs.history.retain(|item| item.manga_id != manga_id);
        self.prefs.history.push(HistoryItem {
            manga_id: manga_id.to_string(),
            timestamp,
        });

        if self.prefs.history.len() > HISTORY_LIMIT {
            self.prefs
                .history
                .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            self.prefs.history.truncate(HISTORY_LIMIT);
        }

        self.persist()
    }

    /// History entries, most recent first regardless of insertion order
    pub fn history(&self) -> Vec<HistoryItem> {
        let mut entries = self.prefs.history.clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.prefs.history.clear();
        self.persist()
    }
}

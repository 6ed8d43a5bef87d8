//! Data models for the manga catalog.
//!
//! This module defines the structures shared across the project: title
//! records as they appear in the catalog dataset, filter/sort criteria,
//! and the persisted user-preferences record. Field names map to the
//! camelCase keys of the JSON dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One catalog entry (a manga work)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manga {
    /// Opaque identifier, unique across the loaded set
    pub id: String,

    // Titles
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,

    // Creative credits
    #[serde(default)]
    pub authors: Vec<Author>,
    /// Legacy single-artist field kept for older dataset entries
    #[serde(default)]
    pub artist: Option<String>,

    // Publication facts
    #[serde(default)]
    pub publisher: String,
    /// Raw dataset value, e.g. "2020-01-01"; parsed on demand
    #[serde(default)]
    pub release_date: String,
    pub completion_status: CompletionStatus,

    // Descriptive text
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub editorial_review: Option<String>,

    // Classification (source order preserved for display)
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,

    // Metrics
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub volumes: Option<u32>,
    #[serde(default)]
    pub chapters: Option<u32>,

    // Media references
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub banner_image: Option<String>,
    /// External purchase links, passed through untouched
    #[serde(default)]
    pub affiliate_links: Option<serde_json::Value>,

    /// Cross-media availability and links, passed through untouched.
    /// Not interpreted by any query or scoring logic.
    #[serde(default)]
    pub media_mix: Option<serde_json::Value>,

    /// Explicit cross-references to other title ids
    #[serde(default)]
    pub related_works: Vec<String>,
}

impl Manga {
    /// Parse the raw release date, if well-formed.
    ///
    /// Malformed dates are a known dataset gap: they collapse toward one
    /// end of date-ordered views and never exclude a record outright.
    pub fn release_date_parsed(&self) -> Option<NaiveDate> {
        parse_release_date(&self.release_date)
    }

    /// Calendar year of the release date, if parsable
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date_parsed().map(|d| d.year())
    }
}

/// Parse a dataset date string (ISO `YYYY-MM-DD`)
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Supplementary media-mix overrides, keyed by title id
pub type MediaMixMap = HashMap<String, serde_json::Value>;

/// Creative credit on a title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub role: Option<AuthorRole>,
}

/// Author role on a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    Writer,
    Artist,
    Both,
}

impl AuthorRole {
    /// Localized display label, also matched by text search.
    /// A combined credit has no separate label.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            AuthorRole::Writer => Some("原作"),
            AuthorRole::Artist => Some("作画"),
            AuthorRole::Both => None,
        }
    }
}

/// Publication status of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
}

impl std::fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionStatus::Ongoing => write!(f, "ongoing"),
            CompletionStatus::Completed => write!(f, "completed"),
            CompletionStatus::Hiatus => write!(f, "hiatus"),
            CompletionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for CompletionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(CompletionStatus::Ongoing),
            "completed" => Ok(CompletionStatus::Completed),
            "hiatus" => Ok(CompletionStatus::Hiatus),
            "cancelled" => Ok(CompletionStatus::Cancelled),
            _ => Err(format!("Unknown completion status: {}", s)),
        }
    }
}

/// Filter criteria for the catalog query pipeline.
///
/// Categories combine with logical AND; within a category the requested
/// values combine with logical OR. A default (empty) field imposes no
/// constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Free-text search (empty = no constraint)
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Vec<CompletionStatus>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
    #[serde(default)]
    pub chapters_from: Option<u32>,
    #[serde(default)]
    pub chapters_to: Option<u32>,
    /// Minimum rating; `None` or a non-positive value disables the filter
    #[serde(default)]
    pub min_rating: Option<f64>,
}

/// Sortable field of a title record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    ReleaseDate,
    Rating,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "release-date" | "releaseDate" => Ok(SortField::ReleaseDate),
            "rating" => Ok(SortField::Rating),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort criterion for the catalog query pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortOption {
    fn default() -> Self {
        Self {
            field: SortField::ReleaseDate,
            direction: SortDirection::Desc,
        }
    }
}

/// One entry in the view history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub manga_id: String,
    /// Visit time as epoch milliseconds
    pub timestamp: i64,
}

/// Persisted UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    pub dark_mode: bool,
    pub items_per_page: u32,
    #[serde(default)]
    pub saved_filters: Option<FilterOptions>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            items_per_page: 12,
            saved_filters: None,
        }
    }
}

/// The persisted user-preferences record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
    #[serde(default)]
    pub ui_settings: UiSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manga_deserializes_from_dataset_shape() {
        let json = r#"{
            "id": "one-piece",
            "title": "ワンピース",
            "originalTitle": "ONE PIECE",
            "authors": [{ "name": "尾田栄一郎", "role": "both" }],
            "publisher": "集英社",
            "releaseDate": "1997-07-22",
            "completionStatus": "ongoing",
            "description": "海賊王を目指す少年の物語",
            "genres": ["少年", "冒険"],
            "tags": ["海賊", "バトル"],
            "rating": 9.2,
            "volumes": 108,
            "coverImage": "/images/one-piece.jpg",
            "mediaMix": { "anime": { "available": true } },
            "relatedWorks": []
        }"#;

        let manga: Manga = serde_json::from_str(json).unwrap();
        assert_eq!(manga.id, "one-piece");
        assert_eq!(manga.completion_status, CompletionStatus::Ongoing);
        assert_eq!(manga.authors.len(), 1);
        assert_eq!(manga.authors[0].role, Some(AuthorRole::Both));
        assert_eq!(manga.release_year(), Some(1997));
        assert!(manga.media_mix.is_some());
        assert!(manga.chapters.is_none());
    }

    #[test]
    fn test_invalid_release_date_degrades() {
        assert_eq!(parse_release_date("not-a-date"), None);
        assert_eq!(parse_release_date(""), None);
        assert!(parse_release_date("2020-06-01").is_some());
    }

    #[test]
    fn test_completion_status_round_trip() {
        for status in [
            CompletionStatus::Ongoing,
            CompletionStatus::Completed,
            CompletionStatus::Hiatus,
            CompletionStatus::Cancelled,
        ] {
            let parsed: CompletionStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("airing".parse::<CompletionStatus>().is_err());
    }

    #[test]
    fn test_defaults() {
        let filters = FilterOptions::default();
        assert!(filters.search.is_empty());
        assert!(filters.genres.is_empty());
        assert!(filters.min_rating.is_none());

        let sort = SortOption::default();
        assert_eq!(sort.field, SortField::ReleaseDate);
        assert_eq!(sort.direction, SortDirection::Desc);

        let settings = UiSettings::default();
        assert!(!settings.dark_mode);
        assert_eq!(settings.items_per_page, 12);
    }

    #[test]
    fn test_preferences_serde_round_trip() {
        let prefs = UserPreferences {
            favorites: vec!["a".to_string()],
            history: vec![HistoryItem {
                manga_id: "a".to_string(),
                timestamp: 1_700_000_000_000,
            }],
            ui_settings: UiSettings::default(),
        };

        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("mangaId"));

        let back: UserPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back.favorites, prefs.favorites);
        assert_eq!(back.history, prefs.history);
    }
}

//! Shared fixtures for the crate's unit tests.

use shared::models::{CompletionStatus, Manga};

/// A minimal well-formed title record; tests override the fields they
/// care about.
pub fn manga(id: &str) -> Manga {
    Manga {
        id: id.to_string(),
        title: id.to_string(),
        original_title: None,
        authors: Vec::new(),
        artist: None,
        publisher: "講談社".to_string(),
        release_date: "2020-01-01".to_string(),
        completion_status: CompletionStatus::Ongoing,
        description: String::new(),
        editorial_review: None,
        genres: Vec::new(),
        tags: Vec::new(),
        rating: 5.0,
        volumes: None,
        chapters: None,
        cover_image: String::new(),
        banner_image: None,
        affiliate_links: None,
        media_mix: None,
        related_works: Vec::new(),
    }
}

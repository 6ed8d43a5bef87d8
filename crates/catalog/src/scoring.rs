//! Relationship scoring between titles.
//!
//! A fixed-weight heuristic drives the related-title recommendations.
//! The weights and thresholds are load-bearing for behavior
//! compatibility with the published catalog; do not tune them.

use shared::models::Manga;

/// Awarded when two titles have identical author name sets
const AUTHOR_SET_MATCH: u32 = 100;
/// Awarded when either title references the other in its related works
const RELATED_WORK_REFERENCE: u32 = 80;
/// Awarded per genre present in both titles
const PER_SHARED_GENRE: u32 = 20;
/// Awarded per tag present in both titles
const PER_SHARED_TAG: u32 = 15;
/// Awarded when publishers are exactly equal
const SAME_PUBLISHER: u32 = 10;
/// Awarded when the release dates are at most a year apart
const CLOSE_RELEASE: u32 = 5;

/// Fixed day window for the release-proximity bonus, not calendar-aware
const RELEASE_WINDOW_DAYS: i64 = 365;

/// Upper clamp of the final score
const MAX_SCORE: u32 = 100;
/// Minimum score for a title to qualify as related
const RELATED_THRESHOLD: u32 = 65;
/// Maximum number of related titles returned
const RELATED_LIMIT: usize = 2;

/// Score how related two distinct titles are, in [0, 100].
///
/// Deterministic and symmetric in intent. An author-set match alone
/// already reaches the clamp, which is an accepted property of the
/// heuristic.
pub fn relationship_score(a: &Manga, b: &Manga) -> u32 {
    let mut score = 0u32;

    // Identical author sets, both directions of containment
    if !a.authors.is_empty() && !b.authors.is_empty() {
        let a_covered = a
            .authors
            .iter()
            .all(|author| b.authors.iter().any(|other| other.name == author.name));
        let b_covered = b
            .authors
            .iter()
            .all(|author| a.authors.iter().any(|other| other.name == author.name));
        if a_covered && b_covered {
            score += AUTHOR_SET_MATCH;
        }
    }

    // Explicit cross-reference in either direction
    if a.related_works.contains(&b.id) || b.related_works.contains(&a.id) {
        score += RELATED_WORK_REFERENCE;
    }

    let shared_genres = a
        .genres
        .iter()
        .filter(|genre| b.genres.contains(genre))
        .count() as u32;
    score += shared_genres * PER_SHARED_GENRE;

    let shared_tags = a.tags.iter().filter(|tag| b.tags.contains(tag)).count() as u32;
    score += shared_tags * PER_SHARED_TAG;

    if a.publisher == b.publisher {
        score += SAME_PUBLISHER;
    }

    // Release proximity; no bonus when either date fails to parse
    if let (Some(date_a), Some(date_b)) = (a.release_date_parsed(), b.release_date_parsed()) {
        if (date_a - date_b).num_days().abs() <= RELEASE_WINDOW_DAYS {
            score += CLOSE_RELEASE;
        }
    }

    score.min(MAX_SCORE)
}

/// The up-to-two titles most related to `target`.
///
/// Scores every other title, keeps those at or above the threshold, and
/// orders them by descending score; ties keep their incoming order.
pub fn related_mangas(mangas: &[Manga], target: &Manga) -> Vec<Manga> {
    let mut scored: Vec<(u32, &Manga)> = mangas
        .iter()
        .filter(|manga| manga.id != target.id)
        .map(|manga| (relationship_score(target, manga), manga))
        .filter(|(score, _)| *score >= RELATED_THRESHOLD)
        .collect();

    scored.sort_by(|(score_a, _), (score_b, _)| score_b.cmp(score_a));

    scored
        .into_iter()
        .take(RELATED_LIMIT)
        .map(|(_, manga)| manga.clone())
        .collect()
}

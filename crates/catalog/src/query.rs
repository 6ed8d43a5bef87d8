//! Pure filter and sort pipeline over the title list.
//!
//! These functions never mutate their input. Filter categories combine
//! with logical AND; the requested values inside one category combine
//! with logical OR. Sorting is stable, so ties keep their incoming order.

use shared::models::{FilterOptions, Manga, SortDirection, SortField, SortOption};
use std::cmp::Ordering;

/// Return the subsequence of titles satisfying all active filter criteria
pub fn filter_mangas(mangas: &[Manga], options: &FilterOptions) -> Vec<Manga> {
    mangas
        .iter()
        .filter(|manga| matches_filters(manga, options))
        .cloned()
        .collect()
}

fn matches_filters(manga: &Manga, options: &FilterOptions) -> bool {
    // Text search
    if !options.search.is_empty() && !matches_search(manga, &options.search) {
        return false;
    }

    // Genres
    if !options.genres.is_empty() && !contains_any(&manga.genres, &options.genres) {
        return false;
    }

    // Tags
    if !options.tags.is_empty() && !contains_any(&manga.tags, &options.tags) {
        return false;
    }

    // Status
    if !options.status.is_empty() && !options.status.contains(&manga.completion_status) {
        return false;
    }

    // Release year, inclusive bounds. A record whose release date does
    // not parse is never excluded by the year filter.
    if options.year_from.is_some() || options.year_to.is_some() {
        if let Some(year) = manga.release_year() {
            if let Some(from) = options.year_from {
                if year < from {
                    return false;
                }
            }
            if let Some(to) = options.year_to {
                if year > to {
                    return false;
                }
            }
        }
    }

    // Chapter count, inclusive bounds; a missing count is treated as 0
    if options.chapters_from.is_some() || options.chapters_to.is_some() {
        let chapters = manga.chapters.unwrap_or(0);
        if let Some(from) = options.chapters_from {
            if chapters < from {
                return false;
            }
        }
        if let Some(to) = options.chapters_to {
            if chapters > to {
                return false;
            }
        }
    }

    // Minimum rating; a non-positive threshold disables the filter
    if let Some(min_rating) = options.min_rating {
        if min_rating > 0.0 && manga.rating < min_rating {
            return false;
        }
    }

    true
}

/// Case-insensitive substring match against the searchable fields of a
/// title: title, original title, author names (also concatenated with
/// their localized role label), and publisher.
fn matches_search(manga: &Manga, search: &str) -> bool {
    let query = search.to_lowercase();

    if manga.title.to_lowercase().contains(&query) {
        return true;
    }
    if let Some(original) = &manga.original_title {
        if original.to_lowercase().contains(&query) {
            return true;
        }
    }

    for author in &manga.authors {
        if author.name.to_lowercase().contains(&query) {
            return true;
        }
        if let Some(label) = author.role.and_then(|role| role.label()) {
            let credited = format!("{}{}", author.name, label);
            if credited.to_lowercase().contains(&query) {
                return true;
            }
        }
    }

    manga.publisher.to_lowercase().contains(&query)
}

fn contains_any(have: &[String], requested: &[String]) -> bool {
    have.iter().any(|value| requested.contains(value))
}

/// Return a new ordering of the given titles by the requested criterion.
///
/// Title comparison is a standalone seam (`title_cmp`) so a locale-aware
/// collator can be substituted without touching the pipeline. Unparsable
/// release dates collapse toward one end of a date ordering.
pub fn sort_mangas(mangas: &[Manga], sort: &SortOption) -> Vec<Manga> {
    let mut sorted: Vec<Manga> = mangas.to_vec();

    sorted.sort_by(|a, b| {
        let comparison = match sort.field {
            SortField::Title => title_cmp(&a.title, &b.title),
            SortField::ReleaseDate => a.release_date_parsed().cmp(&b.release_date_parsed()),
            SortField::Rating => a
                .rating
                .partial_cmp(&b.rating)
                .unwrap_or(Ordering::Equal),
        };

        match sort.direction {
            SortDirection::Asc => comparison,
            SortDirection::Desc => comparison.reverse(),
        }
    });

    sorted
}

/// Compare two titles for display ordering, honoring Japanese collation.
///
/// The kana scripts are compared equivalently: katakana folds to
/// hiragana before the code-point comparison, so a mixed catalog
/// interleaves by reading (gojūon order) instead of splitting by
/// script. Titles equal after folding fall back to raw code-point
/// order to keep the comparator total and deterministic.
pub fn title_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(fold_kana)
        .cmp(b.chars().map(fold_kana))
        .then_with(|| a.cmp(b))
}

/// Map a katakana character onto its hiragana counterpart.
///
/// The two blocks are parallel, offset by 0x60 (ァ U+30A1 ↔ ぁ U+3041).
fn fold_kana(c: char) -> char {
    match c {
        'ァ'..='ヶ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::manga;
    use shared::models::{Author, AuthorRole, CompletionStatus};

    fn sample_list() -> Vec<Manga> {
        let mut a = manga("a");
        a.title = "あした天気".to_string();
        a.genres = vec!["sf".to_string(), "action".to_string()];
        a.tags = vec!["robot".to_string()];
        a.release_date = "2018-04-01".to_string();
        a.rating = 7.5;
        a.chapters = Some(40);

        let mut b = manga("b");
        b.title = "かがみの街".to_string();
        b.original_title = Some("Mirror Town".to_string());
        b.genres = vec!["mystery".to_string()];
        b.tags = vec!["school".to_string()];
        b.release_date = "2020-06-01".to_string();
        b.rating = 8.8;
        b.completion_status = CompletionStatus::Completed;
        b.authors = vec![Author {
            name: "佐藤二郎".to_string(),
            role: Some(AuthorRole::Writer),
        }];

        let mut c = manga("c");
        c.title = "さいごの楽園".to_string();
        c.genres = vec!["sf".to_string()];
        c.tags = vec!["robot".to_string(), "space".to_string()];
        c.release_date = "invalid".to_string();
        c.rating = 6.0;
        c.publisher = "小学館".to_string();

        vec![a, b, c]
    }

    fn ids(list: &[Manga]) -> Vec<&str> {
        list.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_default_options_filter_nothing() {
        let list = sample_list();
        let filtered = filter_mangas(&list, &FilterOptions::default());
        assert_eq!(ids(&filtered), ids(&list));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let list = sample_list();
        let options = FilterOptions {
            genres: vec!["sf".to_string()],
            ..Default::default()
        };

        let once = filter_mangas(&list, &options);
        let twice = filter_mangas(&once, &options);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_genre_filter_is_or_within_category() {
        let list = sample_list();
        let options = FilterOptions {
            genres: vec!["mystery".to_string(), "action".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &options)), vec!["a", "b"]);
    }

    #[test]
    fn test_categories_combine_with_and() {
        let list = sample_list();
        let options = FilterOptions {
            genres: vec!["sf".to_string()],
            tags: vec!["space".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &options)), vec!["c"]);
    }

    #[test]
    fn test_status_filter() {
        let list = sample_list();
        let options = FilterOptions {
            status: vec![CompletionStatus::Completed],
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &options)), vec!["b"]);
    }

    #[test]
    fn test_search_matches_each_field() {
        let list = sample_list();

        let by_title = FilterOptions {
            search: "かがみ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &by_title)), vec!["b"]);

        // Case-insensitive match on the original title
        let by_original = FilterOptions {
            search: "mirror".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &by_original)), vec!["b"]);

        let by_author = FilterOptions {
            search: "佐藤".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &by_author)), vec!["b"]);

        // Name concatenated with the localized role label
        let by_credit = FilterOptions {
            search: "佐藤二郎原作".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &by_credit)), vec!["b"]);

        let by_publisher = FilterOptions {
            search: "小学館".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &by_publisher)), vec!["c"]);

        let no_match = FilterOptions {
            search: "does-not-exist".to_string(),
            ..Default::default()
        };
        assert!(filter_mangas(&list, &no_match).is_empty());
    }

    #[test]
    fn test_year_bounds_are_inclusive_and_skip_unparsable_dates() {
        let list = sample_list();
        let options = FilterOptions {
            year_from: Some(2018),
            year_to: Some(2018),
            ..Default::default()
        };
        // "a" is from 2018; "c" has an unparsable date and passes
        assert_eq!(ids(&filter_mangas(&list, &options)), vec!["a", "c"]);
    }

    #[test]
    fn test_missing_chapters_count_as_zero() {
        let list = sample_list();
        let options = FilterOptions {
            chapters_from: Some(1),
            ..Default::default()
        };
        // Only "a" has a chapter count
        assert_eq!(ids(&filter_mangas(&list, &options)), vec!["a"]);

        let upper = FilterOptions {
            chapters_to: Some(0),
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &upper)), vec!["b", "c"]);
    }

    #[test]
    fn test_zero_min_rating_disables_the_filter() {
        let list = sample_list();

        let disabled = FilterOptions {
            min_rating: Some(0.0),
            ..Default::default()
        };
        assert_eq!(filter_mangas(&list, &disabled).len(), 3);

        let active = FilterOptions {
            min_rating: Some(7.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter_mangas(&list, &active)), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_by_each_field() {
        let list = sample_list();

        let by_title = sort_mangas(
            &list,
            &SortOption {
                field: SortField::Title,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(ids(&by_title), vec!["a", "b", "c"]);

        let by_rating = sort_mangas(
            &list,
            &SortOption {
                field: SortField::Rating,
                direction: SortDirection::Desc,
            },
        );
        assert_eq!(ids(&by_rating), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_direction_reverses_order() {
        let list = sample_list();

        for field in [SortField::Title, SortField::ReleaseDate, SortField::Rating] {
            let asc = sort_mangas(
                &list,
                &SortOption {
                    field,
                    direction: SortDirection::Asc,
                },
            );
            let mut desc = sort_mangas(
                &list,
                &SortOption {
                    field,
                    direction: SortDirection::Desc,
                },
            );
            desc.reverse();
            assert_eq!(ids(&asc), ids(&desc));
        }
    }

    #[test]
    fn test_unparsable_dates_collapse_to_the_end_descending() {
        let list = sample_list();
        let sorted = sort_mangas(
            &list,
            &SortOption {
                field: SortField::ReleaseDate,
                direction: SortDirection::Desc,
            },
        );
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_title_cmp_treats_kana_scripts_equivalently() {
        // Katakana ア (a) reads before hiragana い (i); code-point order
        // alone would invert this
        assert_eq!(title_cmp("アニメ", "いぬ"), Ordering::Less);
        assert_eq!(title_cmp("いぬ", "アニメ"), Ordering::Greater);

        // Same reading in both scripts stays a deterministic total order
        assert_eq!(title_cmp("あにめ", "アニメ"), Ordering::Less);
        assert_eq!(title_cmp("アニメ", "アニメ"), Ordering::Equal);
    }

    #[test]
    fn test_title_sort_interleaves_mixed_kana() {
        let mut a = manga("a");
        a.title = "いぬと暮らす".to_string();
        let mut b = manga("b");
        b.title = "アニメのある日々".to_string();
        let mut c = manga("c");
        c.title = "うみの底".to_string();

        let sorted = sort_mangas(
            &[a, b, c],
            &SortOption {
                field: SortField::Title,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let list = sample_list();
        let before = ids(&list);
        let _ = sort_mangas(
            &list,
            &SortOption {
                field: SortField::Rating,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(ids(&list), before);
    }
}

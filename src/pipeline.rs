//! Correlation and filtering over normalized records.
//!
//! Everything here is pure: same input, same output, order included.

use std::collections::HashMap;

use crate::models::{Movie, MovieShowtimes, Show};

/// Language badges shown per movie
pub const MAX_LANGUAGE_BADGES: usize = 2;

/// Pair every movie with the shows whose `event_id` is its `id`.
///
/// Catalog order is kept, and shows keep their schedule order. Movies
/// without shows stay in the output with an empty list; [`filter`] drops them.
pub fn correlate(movies: &[Movie], shows: &[Show]) -> Vec<MovieShowtimes> {
    let mut by_event: HashMap<&str, Vec<&Show>> = HashMap::new();
    for show in shows {
        by_event.entry(show.event_id.as_str()).or_default().push(show);
    }

    movies
        .iter()
        .map(|movie| MovieShowtimes {
            movie: movie.clone(),
            shows: by_event
                .get(movie.id.as_str())
                .map(|matched| matched.iter().map(|show| (*show).clone()).collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// Drop movies with no shows, then keep those whose title, original title
/// or genre text contains `query`, ignoring case. A blank query keeps all.
pub fn filter(entries: Vec<MovieShowtimes>, query: &str) -> Vec<MovieShowtimes> {
    let needle = query.trim().to_lowercase();
    entries
        .into_iter()
        .filter(|entry| !entry.shows.is_empty())
        .filter(|entry| needle.is_empty() || matches_query(&entry.movie, &needle))
        .collect()
}

fn matches_query(movie: &Movie, needle: &str) -> bool {
    [&movie.title, &movie.original_title, &movie.genres]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Distinct spoken-language labels across `shows`, first seen first, at most two
pub fn languages(shows: &[Show]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for language in shows.iter().filter_map(Show::language_label) {
        if seen.len() == MAX_LANGUAGE_BADGES {
            break;
        }
        if !seen.iter().any(|known| known == language) {
            seen.push(language.to_string());
        }
    }
    seen
}

impl MovieShowtimes {
    pub fn languages(&self) -> Vec<String> {
        languages(&self.shows)
    }
}

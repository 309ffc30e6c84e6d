use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the schedule feed for local times
const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Embed prefix for trailer identifiers carried by the catalog feed
const TRAILER_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// A cast member or director
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    /// "First Last", without stray whitespace when either half is missing
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Age-rating descriptor such as "violence" with its pictogram
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentDescriptor {
    pub name: String,
    pub image_url: String,
}

/// Spoken or subtitle language attached to a show
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    pub name_in_language: String,
    pub iso_two_letter_code: String,
}

/// Poster and banner URLs by size and orientation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventImages {
    pub small_portrait: String,
    pub medium_portrait: String,
    pub large_portrait: String,
    pub small_landscape: String,
    pub large_landscape: String,
}

/// Trailer reference; `location` is the video host identifier
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventVideo {
    pub title: String,
    pub location: String,
    pub thumbnail_location: String,
    pub media_resource_sub_type: String,
    pub media_resource_format: String,
}

/// Catalog entry. `id` is the join key for [`Show::event_id`].
///
/// Every text field is empty when the feed omits it. Year and runtime stay
/// as text so malformed numbers never abort normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub production_year: String,
    pub length_in_minutes: String,
    pub local_release: String,
    pub rating: String,
    pub rating_label: String,
    pub rating_image_url: String,
    pub local_distributor: String,
    pub global_distributor: String,
    pub production_companies: String,
    pub event_type: String,
    pub synopsis: String,
    pub short_synopsis: String,
    pub event_url: String,
    /// Comma-joined, exactly as the feed packs it
    pub genres: String,
    pub images: EventImages,
    pub video: EventVideo,
    pub cast: Vec<Person>,
    pub directors: Vec<Person>,
    pub content_descriptors: Vec<ContentDescriptor>,
}

impl Movie {
    /// Genre list split out of the packed string, in feed order
    pub fn genres(&self) -> Vec<String> {
        self.genres
            .split(',')
            .map(|genre| genre.trim())
            .filter(|genre| !genre.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The first two genres, for compact cards
    pub fn headline_genres(&self) -> Vec<String> {
        self.genres().into_iter().take(2).collect()
    }

    pub fn poster_url(&self) -> Option<&str> {
        non_empty(&self.images.medium_portrait)
    }

    pub fn trailer_embed_url(&self) -> Option<String> {
        non_empty(&self.video.location).map(|id| format!("{TRAILER_EMBED_BASE}{id}"))
    }

    /// Whether the original title is worth showing next to the title
    pub fn shows_original_title(&self) -> bool {
        !self.original_title.is_empty() && self.original_title != self.title
    }

    pub fn synopsis_teaser(&self) -> String {
        truncate_text(&self.synopsis, 120)
    }
}

/// One screening from the schedule feed. `event_id` points at [`Movie::id`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Show {
    pub id: String,
    pub accounting_date: String,
    pub start: String,
    pub start_utc: String,
    pub end: String,
    pub end_utc: String,
    pub sales_start: String,
    pub sales_start_utc: String,
    pub sales_end: String,
    pub sales_end_utc: String,
    pub reservation_start: String,
    pub reservation_start_utc: String,
    pub reservation_end: String,
    pub reservation_end_utc: String,
    pub event_id: String,
    pub title: String,
    pub original_title: String,
    pub production_year: String,
    pub length_in_minutes: String,
    pub local_release: String,
    pub rating: String,
    pub rating_label: String,
    pub rating_image_url: String,
    pub event_type: String,
    pub genres: String,
    pub theatre_id: String,
    pub theatre: String,
    pub auditorium_id: String,
    pub auditorium: String,
    pub theatre_and_auditorium: String,
    /// Packed as "2D, English"
    pub presentation_method_and_language: String,
    pub presentation_method: String,
    pub event_series: String,
    /// Empty until the show opens for booking
    pub show_url: String,
    pub event_url: String,
    pub spoken_language: Language,
    pub subtitle_language_1: Language,
    pub subtitle_language_2: Language,
    pub images: EventImages,
    pub content_descriptors: Vec<ContentDescriptor>,
}

impl Show {
    /// Non-bookable shows still render, just without a link
    pub fn is_bookable(&self) -> bool {
        !self.show_url.is_empty()
    }

    pub fn booking_url(&self) -> Option<&str> {
        non_empty(&self.show_url)
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        parse_feed_timestamp(&self.start)
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        parse_feed_timestamp(&self.end)
    }

    /// 24h "HH:MM", or the raw timestamp when it does not parse
    pub fn start_label(&self) -> String {
        match self.start_time() {
            Some(start) => start.format("%H:%M").to_string(),
            None => self.start.clone(),
        }
    }

    /// Language half of `presentation_method_and_language`, if any
    pub fn language_label(&self) -> Option<&str> {
        self.presentation_method_and_language
            .split(',')
            .nth(1)
            .map(str::trim)
            .filter(|language| !language.is_empty())
    }
}

/// Entry of the theater selector
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TheaterArea {
    pub id: String,
    pub name: String,
}

/// Date selector entry; `value` is the `dd.mm.yyyy` form the schedule feed takes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateOption {
    pub value: String,
    pub label: String,
}

/// View model entry: a movie and its shows in feed order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieShowtimes {
    pub movie: Movie,
    pub shows: Vec<Show>,
}

impl MovieShowtimes {
    /// Theater + auditorium of the first show
    pub fn venue_label(&self) -> Option<&str> {
        self.shows
            .first()
            .and_then(|show| non_empty(&show.theatre_and_auditorium))
    }
}

/// Cut `text` to `max_chars` characters, marking the cut with "..."
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn parse_feed_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, FEED_TIMESTAMP_FORMAT).ok()
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn splits_packed_genres() {
        let movie = Movie {
            genres: "Draama, Komedia,  Jännitys,".to_string(),
            ..Movie::default()
        };
        assert_eq!(movie.genres(), vec!["Draama", "Komedia", "Jännitys"]);
        assert_eq!(movie.headline_genres(), vec!["Draama", "Komedia"]);
        assert!(Movie::default().genres().is_empty());
    }

    #[test]
    fn trailer_and_poster_are_absent_when_empty() {
        let mut movie = Movie::default();
        assert_eq!(movie.trailer_embed_url(), None);
        assert_eq!(movie.poster_url(), None);

        movie.video.location = "dQw4w9WgXcQ".to_string();
        movie.images.medium_portrait = "https://media.example/p.jpg".to_string();
        assert_eq!(
            movie.trailer_embed_url().as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
        assert_eq!(movie.poster_url(), Some("https://media.example/p.jpg"));
    }

    #[test]
    fn original_title_only_when_distinct() {
        let mut movie = Movie {
            title: "Alien".to_string(),
            original_title: "Alien".to_string(),
            ..Movie::default()
        };
        assert!(!movie.shows_original_title());
        movie.original_title = "Alien: Romulus".to_string();
        assert!(movie.shows_original_title());
    }

    #[test]
    fn person_display_name_trims_missing_halves() {
        let person = Person {
            first_name: String::new(),
            last_name: "Scott".to_string(),
        };
        assert_eq!(person.display_name(), "Scott");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("äänielokuva", 4), "ääni...");
        assert_eq!(truncate_text("", 4), "");
    }

    #[test]
    fn show_times_and_booking() {
        let mut show = Show {
            start: "2025-01-01T18:45:00".to_string(),
            end: "2025-01-01T20:50:00".to_string(),
            ..Show::default()
        };
        assert!(!show.is_bookable());
        assert_eq!(show.booking_url(), None);
        assert_eq!(show.start_label(), "18:45");
        assert_eq!(show.end_time().map(|end| end.hour()), Some(20));

        show.show_url = "https://www.finnkino.fi/websales/show/1/".to_string();
        show.start = "soon".to_string();
        assert!(show.is_bookable());
        assert_eq!(show.start_label(), "soon");
    }

    #[test]
    fn language_label_is_second_segment() {
        let mut show = Show {
            presentation_method_and_language: "2D, English".to_string(),
            ..Show::default()
        };
        assert_eq!(show.language_label(), Some("English"));
        show.presentation_method_and_language = "2D".to_string();
        assert_eq!(show.language_label(), None);
        show.presentation_method_and_language = "2D, ".to_string();
        assert_eq!(show.language_label(), None);
    }
}

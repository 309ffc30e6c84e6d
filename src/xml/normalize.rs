use tracing::debug;

use super::tree::{parse_document, Element, ParseError};
use crate::models::{
    ContentDescriptor, EventImages, EventVideo, Language, Movie, Person, Show, TheaterArea,
};

/// Normalize the catalog feed: one [`Movie`] per `Event` element
pub fn normalize_movies(doc: &str) -> Result<Vec<Movie>, ParseError> {
    let root = parse_document(doc)?;
    let movies: Vec<Movie> = root.select_all(&["Event"]).into_iter().map(movie).collect();
    debug!("Normalized {} catalog events", movies.len());
    Ok(movies)
}

/// Normalize the schedule feed: one [`Show`] per `Show` element
pub fn normalize_shows(doc: &str) -> Result<Vec<Show>, ParseError> {
    let root = parse_document(doc)?;
    let shows: Vec<Show> = root.select_all(&["Show"]).into_iter().map(show).collect();
    debug!("Normalized {} scheduled shows", shows.len());
    Ok(shows)
}

/// Normalize the theater directory: one [`TheaterArea`] per `TheatreArea`
pub fn normalize_theater_areas(doc: &str) -> Result<Vec<TheaterArea>, ParseError> {
    let root = parse_document(doc)?;
    let areas: Vec<TheaterArea> = root
        .select_all(&["TheatreArea"])
        .into_iter()
        .map(|area| TheaterArea {
            id: area.field(&["ID"]),
            name: area.field(&["Name"]),
        })
        .collect();
    debug!("Normalized {} theater areas", areas.len());
    Ok(areas)
}

fn movie(event: &Element) -> Movie {
    Movie {
        id: event.field(&["ID"]),
        title: event.field(&["Title"]),
        original_title: event.field(&["OriginalTitle"]),
        production_year: event.field(&["ProductionYear"]),
        length_in_minutes: event.field(&["LengthInMinutes"]),
        local_release: event.field(&["dtLocalRelease"]),
        rating: event.field(&["Rating"]),
        rating_label: event.field(&["RatingLabel"]),
        rating_image_url: event.field(&["RatingImageUrl"]),
        local_distributor: event.field(&["LocalDistributorName"]),
        global_distributor: event.field(&["GlobalDistributorName"]),
        production_companies: event.field(&["ProductionCompanies"]),
        event_type: event.field(&["EventType"]),
        synopsis: event.field(&["Synopsis"]),
        short_synopsis: event.field(&["ShortSynopsis"]),
        event_url: event.field(&["EventURL"]),
        genres: event.field(&["Genres"]),
        images: images(event),
        video: EventVideo {
            title: event.field(&["Videos", "EventVideo", "Title"]),
            location: event.field(&["Videos", "EventVideo", "Location"]),
            thumbnail_location: event.field(&["Videos", "EventVideo", "ThumbnailLocation"]),
            media_resource_sub_type: event.field(&[
                "Videos",
                "EventVideo",
                "MediaResourceSubType",
            ]),
            media_resource_format: event.field(&["Videos", "EventVideo", "MediaResourceFormat"]),
        },
        cast: people(event, &["Cast", "Actor"]),
        directors: people(event, &["Directors", "Director"]),
        content_descriptors: content_descriptors(event),
    }
}

fn show(element: &Element) -> Show {
    Show {
        id: element.field(&["ID"]),
        accounting_date: element.field(&["dtAccounting"]),
        start: element.field(&["dttmShowStart"]),
        start_utc: element.field(&["dttmShowStartUTC"]),
        end: element.field(&["dttmShowEnd"]),
        end_utc: element.field(&["dttmShowEndUTC"]),
        sales_start: element.field(&["ShowSalesStartTime"]),
        sales_start_utc: element.field(&["ShowSalesStartTimeUTC"]),
        sales_end: element.field(&["ShowSalesEndTime"]),
        sales_end_utc: element.field(&["ShowSalesEndTimeUTC"]),
        reservation_start: element.field(&["ShowReservationStartTime"]),
        reservation_start_utc: element.field(&["ShowReservationStartTimeUTC"]),
        reservation_end: element.field(&["ShowReservationEndTime"]),
        reservation_end_utc: element.field(&["ShowReservationEndTimeUTC"]),
        event_id: element.field(&["EventID"]),
        title: element.field(&["Title"]),
        original_title: element.field(&["OriginalTitle"]),
        production_year: element.field(&["ProductionYear"]),
        length_in_minutes: element.field(&["LengthInMinutes"]),
        local_release: element.field(&["dtLocalRelease"]),
        rating: element.field(&["Rating"]),
        rating_label: element.field(&["RatingLabel"]),
        rating_image_url: element.field(&["RatingImageUrl"]),
        event_type: element.field(&["EventType"]),
        genres: element.field(&["Genres"]),
        theatre_id: element.field(&["TheatreID"]),
        theatre: element.field(&["Theatre"]),
        // the feed really spells it "Auditrium"
        auditorium_id: element.field(&["TheatreAuditriumID"]),
        auditorium: element.field(&["TheatreAuditorium"]),
        theatre_and_auditorium: element.field(&["TheatreAndAuditorium"]),
        presentation_method_and_language: element.field(&["PresentationMethodAndLanguage"]),
        presentation_method: element.field(&["PresentationMethod"]),
        event_series: element.field(&["EventSeries"]),
        show_url: element.field(&["ShowURL"]),
        event_url: element.field(&["EventURL"]),
        spoken_language: language(element, "SpokenLanguage"),
        subtitle_language_1: language(element, "SubtitleLanguage1"),
        subtitle_language_2: language(element, "SubtitleLanguage2"),
        images: images(element),
        content_descriptors: content_descriptors(element),
    }
}

fn images(element: &Element) -> EventImages {
    EventImages {
        small_portrait: element.field(&["Images", "EventSmallImagePortrait"]),
        medium_portrait: element.field(&["Images", "EventMediumImagePortrait"]),
        large_portrait: element.field(&["Images", "EventLargeImagePortrait"]),
        small_landscape: element.field(&["Images", "EventSmallImageLandscape"]),
        large_landscape: element.field(&["Images", "EventLargeImageLandscape"]),
    }
}

fn people(element: &Element, path: &[&str]) -> Vec<Person> {
    element
        .select_all(path)
        .into_iter()
        .map(|person| Person {
            first_name: person.field(&["FirstName"]),
            last_name: person.field(&["LastName"]),
        })
        .collect()
}

fn content_descriptors(element: &Element) -> Vec<ContentDescriptor> {
    element
        .select_all(&["ContentDescriptors", "ContentDescriptor"])
        .into_iter()
        .map(|descriptor| ContentDescriptor {
            name: descriptor.field(&["Name"]),
            image_url: descriptor.field(&["ImageURL"]),
        })
        .collect()
}

fn language(element: &Element, block: &str) -> Language {
    Language {
        name: element.field(&[block, "Name"]),
        name_in_language: element.field(&[block, "NameInLanguage"]),
        iso_two_letter_code: element.field(&[block, "ISOTwoLetterCode"]),
    }
}

//! Cinema catalog and showtimes from the Finnkino XML feeds.
//!
//! Feeds are fetched by [`feeds`], normalized by [`xml`], joined and
//! filtered by [`pipeline`], and served through the caching query layer in
//! [`showtimes`].

pub mod cache;
pub mod config;
pub mod dates;
pub mod feeds;
pub mod models;
pub mod pipeline;
pub mod showtimes;
pub mod xml;

pub use feeds::{FeedConfig, FeedError, FeedSource, FinnkinoClient, ScheduleQuery};
pub use models::{DateOption, Movie, MovieShowtimes, Show, TheaterArea};
pub use showtimes::Showtimes;

pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::FinnkinoClient;
pub use error::FeedError;
pub use traits::FeedSource;
pub use types::{FeedConfig, ScheduleQuery, ALL_THEATERS};

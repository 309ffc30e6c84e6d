pub mod normalize;
pub mod tree;

pub use normalize::{normalize_movies, normalize_shows, normalize_theater_areas};
pub use tree::ParseError;

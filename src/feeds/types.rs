use serde::{Deserialize, Serialize};

/// Theater value meaning "every theater"; never sent to the schedule feed
pub const ALL_THEATERS: &str = "all";

const DEFAULT_BASE_URL: &str = "https://www.finnkino.fi/xml";

/// Feed endpoints and HTTP identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    pub catalog_url: String,
    pub schedule_url: String,
    pub theater_areas_url: String,
    pub user_agent: String,
}

impl FeedConfig {
    /// Endpoints under another host, e.g. a local mirror of the feeds
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            catalog_url: format!("{base}/Events/"),
            schedule_url: format!("{base}/Schedule/"),
            theater_areas_url: format!("{base}/TheatreAreas/"),
            user_agent: format!("cinema-showtimes/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

/// Parameters of one schedule request, also its cache key.
///
/// The "all" sentinel and blank values are folded into `None` on
/// construction so equivalent requests compare equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScheduleQuery {
    theater: Option<String>,
    date: Option<String>,
}

impl ScheduleQuery {
    pub fn new(theater: &str, date: &str) -> Self {
        let theater = theater.trim();
        let date = date.trim();
        Self {
            theater: (!theater.is_empty() && theater != ALL_THEATERS).then(|| theater.to_string()),
            date: (!date.is_empty()).then(|| date.to_string()),
        }
    }

    pub fn theater(&self) -> Option<&str> {
        self.theater.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Query-string pairs; empty means the feed's default (today, all theaters)
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::with_capacity(2);
        if let Some(theater) = self.theater() {
            params.push(("area", theater));
        }
        if let Some(date) = self.date() {
            params.push(("dt", date));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_and_blanks_are_omitted() {
        assert!(ScheduleQuery::new(ALL_THEATERS, "").params().is_empty());
        assert!(ScheduleQuery::new("  ", " ").params().is_empty());
        assert_eq!(ScheduleQuery::new("all", "01.01.2025"), ScheduleQuery::new("", "01.01.2025"));
    }

    #[test]
    fn theater_and_date_become_area_and_dt() {
        let query = ScheduleQuery::new("1015", "01.01.2025");
        assert_eq!(query.params(), vec![("area", "1015"), ("dt", "01.01.2025")]);
        assert_eq!(ScheduleQuery::new("1015", "").params(), vec![("area", "1015")]);
        assert_eq!(ScheduleQuery::new("all", "02.01.2025").params(), vec![("dt", "02.01.2025")]);
    }

    #[test]
    fn base_url_override_keeps_endpoint_paths() {
        let config = FeedConfig::with_base_url("http://localhost:8080/xml/");
        assert_eq!(config.catalog_url, "http://localhost:8080/xml/Events/");
        assert_eq!(config.schedule_url, "http://localhost:8080/xml/Schedule/");
        assert_eq!(config.theater_areas_url, "http://localhost:8080/xml/TheatreAreas/");
        assert_eq!(
            FeedConfig::default().schedule_url,
            "https://www.finnkino.fi/xml/Schedule/"
        );
    }
}

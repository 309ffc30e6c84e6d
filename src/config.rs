//! Application configuration loaded from environment variables

use std::env;

use crate::feeds::FeedConfig;

/// Replaces the host prefix of all three feed endpoints
pub const BASE_URL_VAR: &str = "SHOWTIMES_FEED_BASE_URL";
pub const USER_AGENT_VAR: &str = "SHOWTIMES_USER_AGENT";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub feeds: FeedConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut feeds = lookup(BASE_URL_VAR)
            .filter(|base| !base.trim().is_empty())
            .map(|base| FeedConfig::with_base_url(base.trim()))
            .unwrap_or_default();

        if let Some(user_agent) = lookup(USER_AGENT_VAR).filter(|agent| !agent.trim().is_empty()) {
            feeds.user_agent = user_agent;
        }

        Self { feeds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_public_feeds() {
        let config = config_from(&[]);
        assert_eq!(config.feeds, FeedConfig::default());
    }

    #[test]
    fn environment_overrides_base_url_and_agent() {
        let config = config_from(&[
            (BASE_URL_VAR, "http://mirror.local/xml"),
            (USER_AGENT_VAR, "kiosk/2.0"),
        ]);
        assert_eq!(config.feeds.catalog_url, "http://mirror.local/xml/Events/");
        assert_eq!(config.feeds.user_agent, "kiosk/2.0");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = config_from(&[(BASE_URL_VAR, "  "), (USER_AGENT_VAR, "")]);
        assert_eq!(config.feeds, FeedConfig::default());
    }
}

use thiserror::Error;

use crate::xml::ParseError;

/// Failure of a single feed fetch. No partial data accompanies either kind.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Endpoint unreachable, or it answered with a non-success status
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("feed body is not well-formed XML: {0}")]
    Parse(#[from] ParseError),
}

impl FeedError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Transport { .. })
    }
}

use async_trait::async_trait;

use super::error::FeedError;
use super::types::ScheduleQuery;

/// Raw access to the three feeds. Implementations return the document body
/// untouched; parsing belongs to the normalizers.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Movie catalog (`Event` records)
    async fn catalog(&self) -> Result<String, FeedError>;

    /// Schedule for one theater area and date (`Show` records)
    async fn schedule(&self, query: &ScheduleQuery) -> Result<String, FeedError>;

    /// Theater directory (`TheatreArea` records)
    async fn theater_areas(&self) -> Result<String, FeedError>;

    /// Name of the upstream, for logs
    fn source_name(&self) -> &'static str;
}

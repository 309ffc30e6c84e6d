use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Request};
use tracing::{debug, warn};

use super::error::FeedError;
use super::traits::FeedSource;
use super::types::{FeedConfig, ScheduleQuery};

/// HTTP access to the Finnkino XML feeds.
///
/// One GET per call, no retries and no timeout beyond reqwest's defaults.
/// Results are not cached here.
pub struct FinnkinoClient {
    client: Client,
    config: FeedConfig,
}

impl FinnkinoClient {
    pub fn new() -> Result<Self> {
        Self::with_config(FeedConfig::default())
    }

    pub fn with_config(config: FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn build_request(&self, url: &str, params: &[(&str, &str)]) -> Result<Request, FeedError> {
        let mut builder = self.client.get(url);
        if !params.is_empty() {
            builder = builder.query(params);
        }
        builder.build().map_err(|source| FeedError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<String, FeedError> {
        let request = self.build_request(url, params)?;
        let url = request.url().to_string();
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| FeedError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            warn!("{} returned status: {}", url, response.status());
        }

        let body = response
            .error_for_status()
            .map_err(|source| FeedError::Transport {
                url: url.clone(),
                source,
            })?
            .text()
            .await
            .map_err(|source| FeedError::Transport {
                url: url.clone(),
                source,
            })?;

        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl FeedSource for FinnkinoClient {
    async fn catalog(&self) -> Result<String, FeedError> {
        self.fetch(&self.config.catalog_url, &[]).await
    }

    async fn schedule(&self, query: &ScheduleQuery) -> Result<String, FeedError> {
        self.fetch(&self.config.schedule_url, &query.params()).await
    }

    async fn theater_areas(&self) -> Result<String, FeedError> {
        self.fetch(&self.config.theater_areas_url, &[]).await
    }

    fn source_name(&self) -> &'static str {
        "Finnkino"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_request_carries_only_present_params() {
        let client = FinnkinoClient::new().expect("client");
        let schedule_url = client.config.schedule_url.clone();

        let query = ScheduleQuery::new("1015", "01.01.2025");
        let request = client
            .build_request(&schedule_url, &query.params())
            .expect("request");
        assert_eq!(
            request.url().as_str(),
            "https://www.finnkino.fi/xml/Schedule/?area=1015&dt=01.01.2025"
        );

        let request = client
            .build_request(&schedule_url, &ScheduleQuery::new("all", "").params())
            .expect("request");
        assert_eq!(request.url().as_str(), "https://www.finnkino.fi/xml/Schedule/");
        assert_eq!(request.method(), &reqwest::Method::GET);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let client = FinnkinoClient::with_config(FeedConfig::with_base_url("http://127.0.0.1:9"))
            .expect("client");
        let err = client.catalog().await.expect_err("nothing listens on port 9");
        assert!(err.is_transport());
    }
}

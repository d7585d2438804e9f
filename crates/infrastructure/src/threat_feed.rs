use apollo_application::ports::ThreatFeedFetcher;
use apollo_domain::DomainError;
use async_trait::async_trait;
use std::time::Duration;

/// HTTP fetcher for newline-delimited hostile-IP feeds.
///
/// Holds one persistent client so repeated refreshes reuse the connection
/// pool.
pub struct HttpThreatFeed {
    client: reqwest::Client,
}

impl HttpThreatFeed {
    pub fn new() -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent("Apollo-IPS/0.4 (threat-sync)")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainError::ThreatFeedFetch(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ThreatFeedFetcher for HttpThreatFeed {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::ThreatFeedFetch(format!("fetch error for {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::ThreatFeedFetch(format!(
                "HTTP {} for {url}",
                response.status().as_u16()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::ThreatFeedFetch(format!("read error for {url}: {e}")))
    }
}

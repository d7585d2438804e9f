use apollo_domain::DomainError;
use async_trait::async_trait;

/// Fetches the raw text of a newline-delimited hostile-IP feed.
#[async_trait]
pub trait ThreatFeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, DomainError>;
}

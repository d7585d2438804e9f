use apollo_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Reverse-DNS (PTR) lookup for alert enrichment.
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError>;
}

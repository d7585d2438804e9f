use apollo_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Country-level geolocation lookup.
///
/// `Ok(None)` means the database has no entry for the address (or no
/// database is configured); the enrichment layer renders both the same way.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn country_code(&self, ip: IpAddr) -> Result<Option<String>, DomainError>;
}

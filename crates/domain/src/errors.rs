use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Firewall install failed: {0}")]
    FirewallInstall(String),

    #[error("Firewall removal failed: {0}")]
    FirewallRemoval(String),

    #[error("Threat feed fetch failed: {0}")]
    ThreatFeedFetch(String),

    #[error("Enrichment lookup failed: {0}")]
    EnrichmentLookup(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Insufficient capture privilege: {0}")]
    CapturePermission(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

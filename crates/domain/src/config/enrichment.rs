use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Alert enrichment configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    /// Path to a GeoLite2-Country MMDB file. Optional; when absent every
    /// country lookup resolves to "N/A".
    #[serde(default)]
    pub geoip_database: Option<PathBuf>,

    /// Soft timeout per sub-lookup (DNS, GeoIP), in seconds (default: 5)
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,
}

fn default_lookup_timeout() -> u64 {
    5
}

use serde::{Deserialize, Serialize};

/// Threat-intelligence refresh configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThreatSyncConfig {
    /// Interval between feed refreshes, in seconds (default: 3600)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for ThreatSyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    3600
}

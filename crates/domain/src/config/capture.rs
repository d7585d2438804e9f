use serde::{Deserialize, Serialize};

/// Packet capture configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Interface to capture on. When absent the first non-loopback
    /// interface with an address is picked.
    #[serde(default)]
    pub interface: Option<String>,
}

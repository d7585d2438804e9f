use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Geolocation and reverse-DNS data attached to an alert.
///
/// Lookup failures are represented as `"N/A"` rather than omitted so that
/// observers always receive both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub country_code: String,
    pub hostname: String,
}

impl GeoInfo {
    pub const UNAVAILABLE: &'static str = "N/A";

    pub fn new(country_code: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            hostname: hostname.into(),
        }
    }

    pub fn unavailable() -> Self {
        Self::new(Self::UNAVAILABLE, Self::UNAVAILABLE)
    }
}

/// A security alert, fully enriched and ready for broadcast.
///
/// `timestamp` is floating-point unix seconds (wall clock). `action` is
/// always `"BLOCKED"`: an alert is only created after the firewall rule for
/// the source was installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedAlert {
    pub timestamp: f64,
    pub ip: IpAddr,
    pub reason: String,
    pub action: String,
    pub severity: Severity,
    pub geo: GeoInfo,
}

impl EnrichedAlert {
    pub const ACTION_BLOCKED: &'static str = "BLOCKED";

    pub fn blocked(
        timestamp: f64,
        ip: IpAddr,
        reason: impl Into<String>,
        severity: Severity,
        geo: GeoInfo,
    ) -> Self {
        Self {
            timestamp,
            ip,
            reason: reason.into(),
            action: Self::ACTION_BLOCKED.to_string(),
            severity,
            geo,
        }
    }
}

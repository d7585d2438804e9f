//! Configuration module for Apollo IPS
//!
//! Configuration structures organized by concern:
//! - `root`: Main configuration, loading and CLI overrides
//! - `signature`: Payload signature rules
//! - `response`: Block duration and alert queue sizing
//! - `enrichment`: GeoIP database and lookup timeouts
//! - `threat_sync`: Threat-intelligence refresh cadence
//! - `capture`: Capture interface selection
//! - `server`: Push-channel bind address and port
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod capture;
pub mod enrichment;
pub mod errors;
pub mod logging;
pub mod response;
pub mod root;
pub mod server;
pub mod signature;
pub mod threat_sync;

pub use capture::CaptureConfig;
pub use enrichment::EnrichmentConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use response::ResponseConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use signature::SignatureRuleConfig;
pub use threat_sync::ThreatSyncConfig;

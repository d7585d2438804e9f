//! Apollo IPS Domain Layer
pub mod alert;
pub mod config;
pub mod errors;
pub mod packet;
pub mod push;
pub mod severity;
pub mod throughput;
pub mod verdict;

pub use alert::{EnrichedAlert, GeoInfo};
pub use config::{CliOverrides, Config, ConfigError, SignatureRuleConfig};
pub use errors::DomainError;
pub use packet::PacketMeta;
pub use push::PushMessage;
pub use severity::Severity;
pub use throughput::ThroughputBucket;
pub use verdict::Verdict;

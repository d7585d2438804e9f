pub mod broadcast;
pub mod runner;
pub mod threat_sync;

pub use broadcast::BroadcastTickJob;
pub use runner::JobRunner;
pub use threat_sync::ThreatSyncJob;

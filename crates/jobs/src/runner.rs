use crate::{BroadcastTickJob, ThreatSyncJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_threat_sync(ThreatSyncJob::new(store))
///     .with_broadcast(BroadcastTickJob::new(engine, publisher))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    threat_sync: Option<ThreatSyncJob>,
    broadcast: Option<BroadcastTickJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            threat_sync: None,
            broadcast: None,
        }
    }

    pub fn with_threat_sync(mut self, job: ThreatSyncJob) -> Self {
        self.threat_sync = Some(job);
        self
    }

    pub fn with_broadcast(mut self, job: BroadcastTickJob) -> Self {
        self.broadcast = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.threat_sync {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.broadcast {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

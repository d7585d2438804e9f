use apollo_application::engine::ThreatIntelStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Loads the threat-intelligence feed at startup and re-syncs it on a
/// coarse interval. A failed fetch is a warning, never an abort: the
/// previously published set stays active.
pub struct ThreatSyncJob {
    store: Arc<ThreatIntelStore>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ThreatSyncJob {
    pub fn new(store: Arc<ThreatIntelStore>) -> Self {
        Self {
            store,
            interval_secs: 3600,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting threat intelligence sync job"
        );

        tokio::spawn(async move {
            match self.store.refresh().await {
                Ok(added) => info!(added, "Initial threat intelligence load complete"),
                Err(e) => {
                    warn!(error = %e, "Initial threat intelligence load failed; starting with current set")
                }
            }

            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ThreatSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.store.refresh().await {
                            Ok(added) => info!(added, "Threat intelligence refreshed"),
                            Err(e) => warn!(error = %e, "Threat feed refresh failed; keeping current set"),
                        }
                    }
                }
            }
        });
    }
}

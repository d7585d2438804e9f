use super::alert_queue::AlertQueue;
use super::clock;
use super::enrichment::EnrichmentService;
use crate::ports::FirewallController;
use apollo_domain::{EnrichedAlert, Severity};
use rustc_hash::FxHashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// State for one live block. A source IP maps to at most one entry.
pub struct BlockEntry {
    pub installed_at: Instant,
    pub expires_at: Instant,
    timer: CancellationToken,
}

/// Installs time-bounded firewall blocks and retracts them when the timer
/// fires.
///
/// `block` is the capture thread's entry point: it reserves the source's
/// slot under the mutex and returns immediately; the firewall command, the
/// unblock timer and the enrichment task all run on the injected runtime.
/// The reservation is rolled back if the install fails, so the next
/// detection for that source retries. Firewall commands never execute
/// while the map lock is held.
pub struct ResponseScheduler {
    firewall: Arc<dyn FirewallController>,
    enrichment: Arc<EnrichmentService>,
    alerts: Arc<AlertQueue>,
    blocked: Mutex<FxHashMap<IpAddr, BlockEntry>>,
    block_duration: Duration,
    runtime: Handle,
    shutdown: CancellationToken,
}

impl ResponseScheduler {
    pub fn new(
        firewall: Arc<dyn FirewallController>,
        enrichment: Arc<EnrichmentService>,
        alerts: Arc<AlertQueue>,
        block_duration: Duration,
        runtime: Handle,
    ) -> Arc<Self> {
        Arc::new(Self {
            firewall,
            enrichment,
            alerts,
            blocked: Mutex::new(FxHashMap::default()),
            block_duration,
            runtime,
            shutdown: CancellationToken::new(),
        })
    }

    /// Block `ip` and schedule its unblock. No-op while a block for `ip`
    /// is live: no firewall command, no alert.
    pub fn block(self: &Arc<Self>, ip: IpAddr, reason: impl Into<String>, severity: Severity) {
        let reason = reason.into();
        let timer = self.shutdown.child_token();
        {
            let mut blocked = self.blocked.lock().unwrap();
            if blocked.contains_key(&ip) {
                return;
            }
            let now = Instant::now();
            blocked.insert(
                ip,
                BlockEntry {
                    installed_at: now,
                    expires_at: now + self.block_duration,
                    timer: timer.clone(),
                },
            );
        }

        info!(
            severity = %severity,
            ip = %ip,
            reason = %reason,
            duration_secs = self.block_duration.as_secs(),
            "Threat detected, activating block"
        );

        let this = Arc::clone(self);
        self.runtime.spawn(async move {
            this.install_and_announce(ip, reason, severity, timer).await;
        });
    }

    async fn install_and_announce(
        self: Arc<Self>,
        ip: IpAddr,
        reason: String,
        severity: Severity,
        timer: CancellationToken,
    ) {
        if let Err(e) = self.firewall.install_block(ip).await {
            error!(ip = %ip, error = %e, "Firewall install failed; source stays eligible for retry");
            self.blocked.lock().unwrap().remove(&ip);
            return;
        }

        let duration = self.block_duration;
        let this = Arc::clone(&self);
        tokio::spawn(async move {
            tokio::select! {
                // Cancelled on shutdown or manual unblock. The rule is left
                // in place so an exiting process does not open ports.
                _ = timer.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    this.unblock(ip).await;
                }
            }
        });

        // The alert is enriched and enqueued only after a successful
        // install, never before.
        let geo = self.enrichment.enrich(ip).await;
        self.alerts.push(EnrichedAlert::blocked(
            clock::wall_now_f64(),
            ip,
            reason,
            severity,
            geo,
        ));
    }

    /// Remove the platform rule for `ip` and clear its entry.
    ///
    /// The entry is cleared even when the removal command fails — the
    /// timer has already fired, and keeping the entry would leave the
    /// source permanently blocked in the engine's view. Idempotent: a
    /// second call for the same source is a no-op.
    pub async fn unblock(&self, ip: IpAddr) {
        let entry = self.blocked.lock().unwrap().remove(&ip);
        let Some(entry) = entry else {
            return;
        };
        entry.timer.cancel();

        match self.firewall.remove_block(ip).await {
            Ok(()) => info!(ip = %ip, "Block lifted"),
            Err(e) => {
                warn!(ip = %ip, error = %e, "Firewall removal failed; block state cleared anyway")
            }
        }
    }

    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        self.blocked.lock().unwrap().contains_key(&ip)
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.lock().unwrap().len()
    }

    /// Cancel all pending unblock timers. Installed rules stay in place.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

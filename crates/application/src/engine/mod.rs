//! The detection-and-response engine.
//!
//! One long-lived `Engine` value composes every component; all shared
//! state lives inside it and is reached through explicit handles, never
//! through globals.

pub mod alert_queue;
pub mod clock;
pub mod enrichment;
pub mod pipeline;
pub mod scan_tracker;
pub mod scheduler;
pub mod signatures;
pub mod threat_intel;
pub mod throughput;

pub use alert_queue::AlertQueue;
pub use enrichment::EnrichmentService;
pub use pipeline::{DetectionPipeline, REASON_BLOCKLIST, REASON_PORT_SCAN};
pub use scan_tracker::ScanTracker;
pub use scheduler::ResponseScheduler;
pub use signatures::SignatureEngine;
pub use threat_intel::ThreatIntelStore;
pub use throughput::ThroughputAggregator;

use crate::ports::{FirewallController, GeoProvider, HostnameResolver, ThreatFeedFetcher};
use apollo_domain::{Config, ConfigError, EnrichedAlert, PacketMeta, ThroughputBucket, Verdict};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

/// The composed IPS core.
///
/// The capture thread drives `handle_packet`; the broadcast loop drives
/// the two drain sinks; everything else happens on the injected runtime.
pub struct Engine {
    throughput: ThroughputAggregator,
    pipeline: DetectionPipeline,
    scheduler: Arc<ResponseScheduler>,
    alerts: Arc<AlertQueue>,
    threat_intel: Arc<ThreatIntelStore>,
}

impl Engine {
    /// Build the engine from configuration and the injected adapters.
    ///
    /// Signature rules are compiled here; a bad pattern fails construction
    /// rather than surfacing mid-capture.
    pub fn new(
        config: &Config,
        firewall: Arc<dyn FirewallController>,
        geo: Arc<dyn GeoProvider>,
        rdns: Arc<dyn HostnameResolver>,
        feed: Arc<dyn ThreatFeedFetcher>,
        runtime: Handle,
    ) -> Result<Self, ConfigError> {
        let signatures = SignatureEngine::compile(&config.signature_rules)?;
        let scans = ScanTracker::new(
            config.port_scan_threshold,
            Duration::from_secs(config.scan_time_window),
        );
        let threat_intel = Arc::new(ThreatIntelStore::new(
            feed,
            config.threat_intelligence_url.clone(),
        ));
        let alerts = Arc::new(AlertQueue::new(config.response.alert_queue_capacity));
        let enrichment = Arc::new(EnrichmentService::new(
            geo,
            rdns,
            Duration::from_secs(config.enrichment.lookup_timeout_secs),
        ));
        let scheduler = ResponseScheduler::new(
            firewall,
            enrichment,
            Arc::clone(&alerts),
            Duration::from_secs(config.response.block_duration_secs),
            runtime,
        );

        Ok(Self {
            throughput: ThroughputAggregator::new(),
            pipeline: DetectionPipeline::new(Arc::clone(&threat_intel), signatures, scans),
            scheduler,
            alerts,
            threat_intel,
        })
    }

    /// Classify one packet and either count it or respond to it.
    ///
    /// Hostile packets go to the response scheduler and are *not* counted
    /// in the throughput buckets; clean packets only increment throughput.
    pub fn handle_packet(&self, packet: &PacketMeta) {
        self.handle_packet_at(packet, clock::wall_now_secs(), Instant::now());
    }

    pub fn handle_packet_at(&self, packet: &PacketMeta, wall_secs: i64, mono_now: Instant) {
        match self.pipeline.classify(packet, mono_now) {
            Verdict::Hostile { reason, severity } => {
                self.scheduler.block(packet.src_ip, reason, severity);
            }
            Verdict::Clean => {
                self.throughput.record_at(wall_secs, packet.wire_len);
            }
        }
    }

    /// Sink for the broadcast loop: previous completed throughput window.
    pub fn drain_throughput_window(&self) -> Option<(i64, ThroughputBucket)> {
        self.throughput.drain_previous_window()
    }

    /// Sink for the broadcast loop: all queued alerts, FIFO.
    pub fn drain_alerts(&self) -> Vec<EnrichedAlert> {
        self.alerts.drain()
    }

    pub fn threat_intel(&self) -> &Arc<ThreatIntelStore> {
        &self.threat_intel
    }

    pub fn scheduler(&self) -> &Arc<ResponseScheduler> {
        &self.scheduler
    }

    pub fn throughput(&self) -> &ThroughputAggregator {
        &self.throughput
    }

    /// Cancel pending unblock timers; installed rules stay in place.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}

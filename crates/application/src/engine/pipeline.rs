use super::scan_tracker::ScanTracker;
use super::signatures::SignatureEngine;
use super::threat_intel::ThreatIntelStore;
use apollo_domain::{PacketMeta, Severity, Verdict};
use std::sync::Arc;
use std::time::Instant;

pub const REASON_BLOCKLIST: &str = "IP in Threat Blocklist";
pub const REASON_PORT_SCAN: &str = "Port Scan Detected";

/// Composes the three detectors into one verdict per packet.
///
/// Evaluation order is fixed: threat-intel membership, then the port-scan
/// heuristic, then payload signatures. The first hostile answer wins and
/// later detectors are not consulted. Packets without an IP layer never
/// reach this point — the capture layer only materializes `PacketMeta` for
/// IP traffic.
pub struct DetectionPipeline {
    threat_intel: Arc<ThreatIntelStore>,
    signatures: SignatureEngine,
    scans: ScanTracker,
}

impl DetectionPipeline {
    pub fn new(
        threat_intel: Arc<ThreatIntelStore>,
        signatures: SignatureEngine,
        scans: ScanTracker,
    ) -> Self {
        Self {
            threat_intel,
            signatures,
            scans,
        }
    }

    pub fn classify(&self, packet: &PacketMeta, now: Instant) -> Verdict {
        if self.threat_intel.contains(packet.src_ip) {
            return Verdict::hostile(REASON_BLOCKLIST, Severity::High);
        }

        if let Some(dst_port) = packet.tcp_dst_port {
            if self.scans.observe_tcp(packet.src_ip, now, dst_port) {
                return Verdict::hostile(REASON_PORT_SCAN, Severity::Medium);
            }
        }

        if let Some(payload) = packet.payload.as_deref() {
            if let Some((name, severity)) = self.signatures.scan(payload) {
                return Verdict::hostile(name, severity);
            }
        }

        Verdict::Clean
    }
}

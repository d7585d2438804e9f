//! End-to-end detection flows: packet in, firewall command and enriched
//! alert out.

use apollo_domain::{PacketMeta, Severity};
use std::net::IpAddr;
use std::time::{Duration, Instant};

#[path = "../common/mod.rs"]
mod common;
use common::fixtures::{base_config, with_rule, with_scan_settings, TestHarness, T0};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn blocklist_hit_blocks_and_alerts() {
    let harness = TestHarness::start(base_config(), "9.9.9.9\n# comment\n\n").await;

    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("9.9.9.9"), 60), T0, Instant::now());
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 1);
    assert_eq!(harness.firewall.installed(), vec![ip("9.9.9.9")]);

    let alerts = harness.engine.drain_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].reason, "IP in Threat Blocklist");
    assert_eq!(alerts[0].severity, Severity::High);
    assert_eq!(alerts[0].action, "BLOCKED");
    assert_eq!(alerts[0].ip, ip("9.9.9.9"));

    // Hostile traffic is never counted as throughput.
    assert!(harness
        .engine
        .throughput()
        .drain_previous_window_at(T0 + 1)
        .is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn comment_and_blank_feed_lines_are_ignored() {
    let harness = TestHarness::start(base_config(), "9.9.9.9\n# 8.8.8.8\n\n").await;

    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("8.8.8.8"), 60), T0, Instant::now());
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 0);
    assert!(harness.engine.drain_alerts().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn port_scan_burst_blocks_once() {
    let config = with_scan_settings(base_config(), 5, 10);
    let harness = TestHarness::start(config, "").await;

    let mono = Instant::now();
    for (i, port) in (80u16..85).enumerate() {
        let packet = PacketMeta::new(ip("10.0.0.1"), 60).with_tcp(port);
        harness
            .engine
            .handle_packet_at(&packet, T0, mono + Duration::from_millis(i as u64 * 400));
    }
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 1);
    let alerts = harness.engine.drain_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].reason, "Port Scan Detected");
    assert_eq!(alerts[0].severity, Severity::Medium);

    // Further packets from the blocked source are no-ops in the scheduler.
    for port in 85u16..90 {
        let packet = PacketMeta::new(ip("10.0.0.1"), 60).with_tcp(port);
        harness.engine.handle_packet_at(
            &packet,
            T0 + 1,
            mono + Duration::from_millis(2500),
        );
    }
    harness.settle().await;
    assert_eq!(harness.firewall.install_calls(), 1);
    assert!(harness.engine.drain_alerts().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_scan_stays_clean() {
    let config = with_scan_settings(base_config(), 5, 10);
    let harness = TestHarness::start(config, "").await;

    let mono = Instant::now();
    for (i, port) in (80u16..85).enumerate() {
        let packet = PacketMeta::new(ip("10.0.0.2"), 60).with_tcp(port);
        harness
            .engine
            .handle_packet_at(&packet, T0, mono + Duration::from_secs(i as u64 * 11));
    }
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn signature_match_blocks_with_rule_metadata() {
    let config = with_rule(base_config(), "union.*select", "SQLi", Severity::High);
    let harness = TestHarness::start(config, "").await;

    let packet = PacketMeta::new(ip("8.8.8.8"), 300)
        .with_tcp(80)
        .with_payload(b"GET /products?id=1 UNION SELECT username, password FROM users".to_vec());
    harness
        .engine
        .handle_packet_at(&packet, T0, Instant::now());
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 1);
    let alerts = harness.engine.drain_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].reason, "SQLi");
    assert_eq!(alerts[0].severity, Severity::High);
    assert_eq!(alerts[0].geo.country_code, "XX");
    assert_eq!(alerts[0].geo.hostname, "host.example");
}

#[tokio::test(flavor = "multi_thread")]
async fn enrichment_is_looked_up_once_per_source() {
    let harness = TestHarness::start(base_config(), "9.9.9.9\n").await;

    // Two hostile packets from the same new IP in quick succession.
    let mono = Instant::now();
    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("9.9.9.9"), 60), T0, mono);
    harness.engine.handle_packet_at(
        &PacketMeta::new(ip("9.9.9.9"), 60),
        T0,
        mono + Duration::from_millis(500),
    );
    harness.settle().await;

    // Second block call was a no-op: one install, one alert, one lookup.
    assert_eq!(harness.firewall.install_calls(), 1);
    assert_eq!(harness.engine.drain_alerts().len(), 1);
    assert_eq!(harness.geo.call_count(), 1);
    assert_eq!(harness.rdns.call_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_install_allows_retry_on_next_detection() {
    let harness = TestHarness::start(base_config(), "9.9.9.9\n").await;
    harness.firewall.set_fail_install(true);

    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("9.9.9.9"), 60), T0, Instant::now());
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 1);
    assert!(harness.engine.drain_alerts().is_empty());
    assert!(!harness.engine.scheduler().is_blocked(ip("9.9.9.9")));

    harness.firewall.set_fail_install(false);
    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("9.9.9.9"), 60), T0 + 1, Instant::now());
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 2);
    assert_eq!(harness.engine.drain_alerts().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn pathological_threshold_of_one_blocks_any_tcp_packet() {
    let config = with_scan_settings(base_config(), 1, 10);
    let harness = TestHarness::start(config, "").await;

    let packet = PacketMeta::new(ip("10.0.0.9"), 60).with_tcp(443);
    harness
        .engine
        .handle_packet_at(&packet, T0, Instant::now());
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 1);
    let alerts = harness.engine.drain_alerts();
    assert_eq!(alerts[0].reason, "Port Scan Detected");
}

//! Throughput accounting and push-message flows.

use apollo_domain::{PacketMeta, PushMessage};
use std::net::IpAddr;
use std::time::Instant;

#[path = "../common/mod.rs"]
mod common;
use common::fixtures::{base_config, TestHarness, T0};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn throughput_accounting_matches_wire_format() {
    let harness = TestHarness::start(base_config(), "").await;

    let mono = Instant::now();
    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("8.8.8.8"), 100), T0, mono);
    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("1.1.1.1"), 200), T0, mono);

    let (window, bucket) = harness
        .engine
        .throughput()
        .drain_previous_window_at(T0 + 1)
        .unwrap();
    assert_eq!(window, T0);

    let message = PushMessage::throughput(window, bucket);
    assert_eq!(
        serde_json::to_string(&message).unwrap(),
        format!(
            r#"{{"type":"throughput_data","payload":{{"{T0}":{{"packets":2,"bytes_total":300}}}}}}"#
        )
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn throughput_drain_round_trips_through_json() {
    let harness = TestHarness::start(base_config(), "").await;

    let mono = Instant::now();
    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("8.8.8.8"), 1400), T0, mono);

    let (window, bucket) = harness
        .engine
        .throughput()
        .drain_previous_window_at(T0 + 1)
        .unwrap();

    let json = serde_json::to_string(&PushMessage::throughput(window, bucket)).unwrap();
    let parsed: PushMessage = serde_json::from_str(&json).unwrap();
    match parsed {
        PushMessage::ThroughputData(payload) => {
            let restored = payload.get(&window.to_string()).unwrap();
            assert_eq!(restored.packets, bucket.packets);
            assert_eq!(restored.bytes_total, bucket.bytes_total);
        }
        other => panic!("expected throughput data, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn stale_windows_are_collected_on_drain() {
    let harness = TestHarness::start(base_config(), "").await;

    let mono = Instant::now();
    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("8.8.8.8"), 100), T0, mono);
    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("8.8.8.8"), 100), T0 + 400, mono);

    // The drain at T0+401 returns the T0+400 bucket and collects T0.
    let (window, bucket) = harness
        .engine
        .throughput()
        .drain_previous_window_at(T0 + 401)
        .unwrap();
    assert_eq!(window, T0 + 400);
    assert_eq!(bucket.packets, 1);

    // A later drain can no longer see anything at or before the horizon.
    assert!(harness
        .engine
        .throughput()
        .drain_previous_window_at(T0 + 1)
        .is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn packet_without_tcp_or_payload_only_counts_throughput() {
    let harness = TestHarness::start(base_config(), "").await;

    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("8.8.8.8"), 84), T0, Instant::now());
    harness.settle().await;

    assert_eq!(harness.firewall.install_calls(), 0);
    assert!(harness.engine.drain_alerts().is_empty());
    let (_, bucket) = harness
        .engine
        .throughput()
        .drain_previous_window_at(T0 + 1)
        .unwrap();
    assert_eq!(bucket.packets, 1);
    assert_eq!(bucket.bytes_total, 84);
}

#[tokio::test(flavor = "multi_thread")]
async fn alert_payload_matches_wire_format() {
    let harness = TestHarness::start(base_config(), "9.9.9.9\n").await;

    harness
        .engine
        .handle_packet_at(&PacketMeta::new(ip("9.9.9.9"), 60), T0, Instant::now());
    harness.settle().await;

    let alerts = harness.engine.drain_alerts();
    let json = serde_json::to_value(PushMessage::alert(alerts[0].clone())).unwrap();

    assert_eq!(json["type"], "security_alert");
    let payload = &json["payload"];
    assert_eq!(payload["ip"], "9.9.9.9");
    assert_eq!(payload["reason"], "IP in Threat Blocklist");
    assert_eq!(payload["action"], "BLOCKED");
    assert_eq!(payload["severity"], "HIGH");
    assert_eq!(payload["geo"]["country_code"], "XX");
    assert_eq!(payload["geo"]["hostname"], "host.example");
    assert!(payload["timestamp"].as_f64().unwrap() > 0.0);
}

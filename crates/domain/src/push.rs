use crate::alert::EnrichedAlert;
use crate::throughput::ThroughputBucket;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One message on the observer push channel.
///
/// Serializes to the `{"type": ..., "payload": ...}` envelope consumed by
/// the frontend. Throughput payloads are keyed by the window's unix-second
/// timestamp rendered as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PushMessage {
    ThroughputData(BTreeMap<String, ThroughputBucket>),
    SecurityAlert(EnrichedAlert),
}

impl PushMessage {
    pub fn throughput(window: i64, bucket: ThroughputBucket) -> Self {
        let mut payload = BTreeMap::new();
        payload.insert(window.to_string(), bucket);
        PushMessage::ThroughputData(payload)
    }

    pub fn alert(alert: EnrichedAlert) -> Self {
        PushMessage::SecurityAlert(alert)
    }
}

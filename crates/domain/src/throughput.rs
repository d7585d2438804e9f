use serde::{Deserialize, Serialize};

/// Packet/byte counters for one integer-second window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThroughputBucket {
    pub packets: u64,
    pub bytes_total: u64,
}

impl ThroughputBucket {
    pub fn observe(&mut self, wire_len: u64) {
        self.packets += 1;
        self.bytes_total += wire_len;
    }

    pub fn is_empty(&self) -> bool {
        self.packets == 0
    }
}

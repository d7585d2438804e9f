use serde::{Deserialize, Serialize};

/// Response scheduler configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseConfig {
    /// How long a hostile source stays blocked, in seconds (default: 300)
    #[serde(default = "default_block_duration")]
    pub block_duration_secs: u64,

    /// Bounded alert queue capacity (default: 1024)
    #[serde(default = "default_alert_queue_capacity")]
    pub alert_queue_capacity: usize,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            block_duration_secs: default_block_duration(),
            alert_queue_capacity: default_alert_queue_capacity(),
        }
    }
}

fn default_block_duration() -> u64 {
    300
}

fn default_alert_queue_capacity() -> usize {
    1024
}

use super::clock;
use apollo_domain::ThroughputBucket;
use rustc_hash::FxHashMap;
use std::sync::Mutex;

/// Buckets older than this many windows are garbage-collected on drain.
pub const RETENTION_WINDOWS: i64 = 300;

/// Per-second bucketed packet/byte counters.
///
/// One mutex guards the map; every critical section is O(1) except the
/// drain-time GC, which touches at most `RETENTION_WINDOWS + 1` keys.
pub struct ThroughputAggregator {
    buckets: Mutex<FxHashMap<i64, ThroughputBucket>>,
}

impl ThroughputAggregator {
    pub fn new() -> Self {
        Self {
            buckets: Mutex::new(FxHashMap::default()),
        }
    }

    /// Count one packet of `wire_len` bytes in the current window.
    pub fn record(&self, wire_len: u64) {
        self.record_at(clock::wall_now_secs(), wire_len);
    }

    pub fn record_at(&self, now_wall_secs: i64, wire_len: u64) {
        let window = clock::current_window(now_wall_secs, clock::WINDOW_SIZE_SECS);
        let mut buckets = self.buckets.lock().unwrap();
        buckets.entry(window).or_default().observe(wire_len);
    }

    /// Read the bucket for the previous (completed) window, then delete
    /// every bucket older than the retention horizon.
    ///
    /// The returned bucket is a copy, never aliased to internal state.
    pub fn drain_previous_window(&self) -> Option<(i64, ThroughputBucket)> {
        self.drain_previous_window_at(clock::wall_now_secs())
    }

    pub fn drain_previous_window_at(&self, now_wall_secs: i64) -> Option<(i64, ThroughputBucket)> {
        let window = clock::current_window(now_wall_secs, clock::WINDOW_SIZE_SECS);
        let previous = window - clock::WINDOW_SIZE_SECS;
        let mut buckets = self.buckets.lock().unwrap();
        let drained = buckets
            .get(&previous)
            .filter(|bucket| !bucket.is_empty())
            .copied()
            .map(|bucket| (previous, bucket));
        buckets.retain(|key, _| *key >= window - RETENTION_WINDOWS);
        drained
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.lock().unwrap().len()
    }
}

impl Default for ThroughputAggregator {
    fn default() -> Self {
        Self::new()
    }
}

use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;
use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Upper bound on simultaneously tracked source IPs. The source set is
/// attacker-controlled, so the map must not grow without bound; least
/// recently seen sources are evicted first.
const MAX_TRACKED_SOURCES: usize = 100_000;

/// Per-source TCP burst tracker.
///
/// Keeps a bounded ring of `(timestamp, dst_port)` observations per source.
/// A detection fires when the ring is full and its span is shorter than the
/// configured window: N observations in less than T seconds. Destination
/// ports are recorded but deliberately not deduplicated — the heuristic is
/// burst detection, and repeated hits on one port count the same as a sweep.
pub struct ScanTracker {
    history: Mutex<LruCache<IpAddr, VecDeque<(Instant, u16)>, FxBuildHasher>>,
    threshold: usize,
    window: Duration,
}

impl ScanTracker {
    pub fn new(threshold: usize, window: Duration) -> Self {
        Self {
            history: Mutex::new(LruCache::with_hasher(
                NonZeroUsize::new(MAX_TRACKED_SOURCES).unwrap(),
                FxBuildHasher,
            )),
            threshold,
            window,
        }
    }

    /// Record one TCP observation and report whether it completes a burst.
    ///
    /// Edge-triggered: every observation that lands in a full, fast ring
    /// reports `true` again; the response scheduler dedupes per source.
    pub fn observe_tcp(&self, src_ip: IpAddr, now: Instant, dst_port: u16) -> bool {
        let mut history = self.history.lock().unwrap();
        let ring = history.get_or_insert_mut(src_ip, || VecDeque::with_capacity(self.threshold));

        if ring.len() == self.threshold {
            ring.pop_front();
        }
        ring.push_back((now, dst_port));

        if ring.len() < self.threshold {
            return false;
        }
        match (ring.front(), ring.back()) {
            (Some(&(oldest, _)), Some(&(newest, _))) => {
                newest.duration_since(oldest) < self.window
            }
            _ => false,
        }
    }

    pub fn tracked_sources(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

use apollo_domain::EnrichedAlert;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::warn;

/// Bounded FIFO of enriched alerts awaiting broadcast.
///
/// When the queue is full the incoming alert is dropped and logged; alerts
/// already queued are never displaced.
pub struct AlertQueue {
    inner: Mutex<VecDeque<EnrichedAlert>>,
    capacity: usize,
}

impl AlertQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity.min(64))),
            capacity,
        }
    }

    pub fn push(&self, alert: EnrichedAlert) {
        let mut queue = self.inner.lock().unwrap();
        if queue.len() >= self.capacity {
            warn!(
                ip = %alert.ip,
                capacity = self.capacity,
                "Alert queue full, dropping newest alert"
            );
            return;
        }
        queue.push_back(alert);
    }

    /// Remove and return all queued alerts in FIFO order.
    pub fn drain(&self) -> Vec<EnrichedAlert> {
        self.inner.lock().unwrap().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

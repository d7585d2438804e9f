//! Wall-clock window arithmetic.
//!
//! Wall time is used only for throughput window keys and alert timestamps.
//! Everything that measures elapsed time (scan windows, block expirations)
//! uses `std::time::Instant` instead, so NTP adjustments cannot misfire a
//! detection or shorten a block.

use chrono::Utc;

/// Default window size: one second.
pub const WINDOW_SIZE_SECS: i64 = 1;

/// Unix-second window key containing `now_wall_secs`.
pub fn current_window(now_wall_secs: i64, size: i64) -> i64 {
    now_wall_secs.div_euclid(size) * size
}

/// Current wall time as whole unix seconds.
pub fn wall_now_secs() -> i64 {
    Utc::now().timestamp()
}

/// Current wall time as fractional unix seconds, for alert timestamps.
pub fn wall_now_f64() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

//! Shared telemetry helpers: timestamps, durations, and correlation id generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

static ASSOCIATION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Current time as milliseconds since Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generate a unique correlation id shared by the start and end events of one flow.
pub fn new_association_id() -> String {
    let ts = now_millis();
    let pid = std::process::id();
    let seq = ASSOCIATION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("assoc-{ts}-{pid}-{seq}")
}

/// Milliseconds elapsed since `start`, as a measurement value.
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

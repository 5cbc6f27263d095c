//! Time-derived request nonces.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of per-request nonces.
///
/// A nonce is the current Unix time in milliseconds. Two requests issued
/// within the same millisecond by this process still get distinct values:
/// the generator never hands out a value at or below the last one.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce based on the wall clock.
    pub fn next(&self) -> u64 {
        self.next_at(unix_millis())
    }

    /// Next nonce given the current time in milliseconds.
    ///
    /// Returns `max(now_ms, last + 1)`, and never zero.
    pub fn next_at(&self, now_ms: u64) -> u64 {
        let mut issued = 0;
        // The closure always returns Some, so the update cannot fail.
        let _ = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                issued = now_ms.max(last.saturating_add(1)).max(1);
                Some(issued)
            });
        issued
    }
}

fn unix_millis() -> u64 {
    // A clock before 1970 yields 0 here; next_at() still returns >= 1.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

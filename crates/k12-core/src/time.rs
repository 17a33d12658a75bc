//! Creation timestamps for new records.
//!
//! Records carry epoch milliseconds taken at construction. Values handed out
//! by one process never go backwards, even if the wall clock does.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

static HIGH_WATER_MARK: AtomicI64 = AtomicI64::new(0);

/// Current time in epoch milliseconds, never lower than a previous call.
pub fn now_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let previous = HIGH_WATER_MARK.fetch_max(now, Ordering::SeqCst);
    previous.max(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_non_decreasing() {
        let mut last = now_millis();
        for _ in 0..1_000 {
            let next = now_millis();
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn test_now_millis_tracks_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let stamp = now_millis();
        assert!(stamp >= before);
    }
}

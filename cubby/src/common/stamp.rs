use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Fast path: returns 0 on any error instead of double error handling
#[inline]
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generates opaque, strictly increasing stamp tokens.
///
/// Tokens are the lowercase hex rendering of milliseconds since the Unix epoch.
/// When the clock stalls or moves backwards the generator advances past the last
/// issued value instead, so token ordering always matches issue ordering.
pub struct StampGenerator {
    last: AtomicU64,
    mutex: Mutex<()>,
}

impl StampGenerator {
    pub fn new() -> Self {
        StampGenerator {
            last: AtomicU64::new(0),
            mutex: Mutex::new(()),
        }
    }

    /// Issues the next stamp token.
    pub fn next_token(&self) -> String {
        let _lock = self.mutex.lock();
        let now = current_time_millis();
        let last = self.last.load(Ordering::Relaxed);
        let stamp = if now <= last { last + 1 } else { now };
        self.last.store(stamp, Ordering::Relaxed);
        format!("{:x}", stamp)
    }
}

impl Default for StampGenerator {
    fn default() -> Self {
        StampGenerator::new()
    }
}

/// Parses a stamp token back into its numeric millisecond value.
pub fn token_value(token: &str) -> Option<u64> {
    u64::from_str_radix(token, 16).ok()
}

/// Reconstructs the calendar datetime a stamp token encodes.
pub fn token_to_datetime(token: &str) -> Option<DateTime<Utc>> {
    token_value(token).and_then(|millis| DateTime::from_timestamp_millis(millis as i64))
}

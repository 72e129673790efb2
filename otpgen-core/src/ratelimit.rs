//! Verification attempt rate limiting
//!
//! Bounds the number of verification attempts per identity key within a
//! rolling time window. Independent of the OTP engine; callers consult it
//! before verifying and reset it after a success.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

/// Per-key attempt bookkeeping
struct AttemptEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window per-key attempt limiter
///
/// Entries are created lazily on first check and never proactively
/// evicted; bounding total memory (periodic sweep, LRU) is left to the
/// embedding service. The entry map sits behind a mutex so a shared
/// `&RateLimiter` can be used from concurrent callers without two
/// simultaneous attempts on one key both slipping under the limit.
///
/// Every operation has an `*_at` twin taking an explicit [`Instant`] so
/// tests can advance time instead of sleeping.
pub struct RateLimiter {
    max_attempts: u32,
    window: Duration,
    entries: Mutex<HashMap<String, AttemptEntry>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_attempts` per key per `window`
    ///
    /// Both parameters are expected to be positive.
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Check and record one attempt for `key`
    ///
    /// Returns `true` when the key is currently limited. A limited key is
    /// not incremented further, so hammering a locked key cannot inflate
    /// its count past `max_attempts`.
    pub fn is_rate_limited(&self, key: &str) -> bool {
        self.is_rate_limited_at(key, Instant::now())
    }

    /// Check and record one attempt at an explicit instant
    pub fn is_rate_limited_at(&self, key: &str, now: Instant) -> bool {
        let mut entries = self.lock_entries();
        let entry = entries.entry(key.to_string()).or_insert(AttemptEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) > self.window {
            // Window elapsed; this attempt opens a fresh one.
            entry.count = 1;
            entry.window_start = now;
            return false;
        }
        if entry.count >= self.max_attempts {
            debug!(key, "verification attempts exhausted");
            return true;
        }
        entry.count += 1;
        false
    }

    /// Clear the attempt count for `key`
    ///
    /// Intended for successful verifications, so earlier failed attempts
    /// in the same window stop counting against the user. Also restarts
    /// the window clock.
    pub fn reset(&self, key: &str) {
        self.reset_at(key, Instant::now());
    }

    /// Clear the attempt count at an explicit instant
    pub fn reset_at(&self, key: &str, now: Instant) {
        let mut entries = self.lock_entries();
        entries.insert(
            key.to_string(),
            AttemptEntry {
                count: 0,
                window_start: now,
            },
        );
    }

    /// Attempts left for `key` in the current window
    pub fn remaining_attempts(&self, key: &str) -> u32 {
        self.remaining_attempts_at(key, Instant::now())
    }

    /// Attempts left at an explicit instant
    pub fn remaining_attempts_at(&self, key: &str, now: Instant) -> u32 {
        let entries = self.lock_entries();
        match entries.get(key) {
            Some(entry) if now.duration_since(entry.window_start) <= self.window => {
                self.max_attempts.saturating_sub(entry.count)
            }
            _ => self.max_attempts,
        }
    }

    /// Time until the window for `key` rolls over
    ///
    /// Zero for unknown keys and elapsed windows.
    pub fn time_until_reset(&self, key: &str) -> Duration {
        self.time_until_reset_at(key, Instant::now())
    }

    /// Time until reset at an explicit instant
    pub fn time_until_reset_at(&self, key: &str, now: Instant) -> Duration {
        let entries = self.lock_entries();
        match entries.get(key) {
            Some(entry) => self
                .window
                .saturating_sub(now.duration_since(entry.window_start)),
            None => Duration::ZERO,
        }
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, AttemptEntry>> {
        // A poisoned map still holds valid counters; keep serving them.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(100);

    #[test]
    fn test_attempts_under_limit_pass() {
        let limiter = RateLimiter::new(3, WINDOW);
        let now = Instant::now();

        assert!(!limiter.is_rate_limited_at("alice", now));
        assert!(!limiter.is_rate_limited_at("alice", now));
        assert!(!limiter.is_rate_limited_at("alice", now));
    }

    #[test]
    fn test_fourth_attempt_is_limited() {
        let limiter = RateLimiter::new(3, WINDOW);
        let now = Instant::now();

        for _ in 0..3 {
            assert!(!limiter.is_rate_limited_at("alice", now));
        }
        assert!(limiter.is_rate_limited_at("alice", now));
    }

    #[test]
    fn test_limited_key_does_not_inflate() {
        let limiter = RateLimiter::new(3, WINDOW);
        let now = Instant::now();

        for _ in 0..3 {
            limiter.is_rate_limited_at("alice", now);
        }
        for _ in 0..10 {
            assert!(limiter.is_rate_limited_at("alice", now));
        }
        // The count stayed pinned at the limit
        assert_eq!(limiter.remaining_attempts_at("alice", now), 0);
    }

    #[test]
    fn test_reset_reopens_the_key() {
        let limiter = RateLimiter::new(3, WINDOW);
        let now = Instant::now();

        for _ in 0..4 {
            limiter.is_rate_limited_at("alice", now);
        }
        limiter.reset_at("alice", now);
        assert!(!limiter.is_rate_limited_at("alice", now));
        assert_eq!(limiter.remaining_attempts_at("alice", now), 2);
    }

    #[test]
    fn test_window_expiry_unlocks() {
        let limiter = RateLimiter::new(3, WINDOW);
        let start = Instant::now();

        for _ in 0..4 {
            limiter.is_rate_limited_at("alice", start);
        }
        assert!(limiter.is_rate_limited_at("alice", start));

        let later = start + WINDOW + Duration::from_millis(1);
        assert!(!limiter.is_rate_limited_at("alice", later));
        // The expired attempt opened a fresh window with one attempt used
        assert_eq!(limiter.remaining_attempts_at("alice", later), 2);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, WINDOW);
        let now = Instant::now();

        assert!(!limiter.is_rate_limited_at("alice", now));
        assert!(limiter.is_rate_limited_at("alice", now));
        assert!(!limiter.is_rate_limited_at("bob", now));
    }

    #[test]
    fn test_remaining_attempts_for_unknown_key() {
        let limiter = RateLimiter::new(5, WINDOW);
        assert_eq!(limiter.remaining_attempts("nobody"), 5);
    }

    #[test]
    fn test_remaining_attempts_counts_down() {
        let limiter = RateLimiter::new(3, WINDOW);
        let now = Instant::now();

        assert_eq!(limiter.remaining_attempts_at("alice", now), 3);
        limiter.is_rate_limited_at("alice", now);
        assert_eq!(limiter.remaining_attempts_at("alice", now), 2);
        limiter.is_rate_limited_at("alice", now);
        assert_eq!(limiter.remaining_attempts_at("alice", now), 1);
    }

    #[test]
    fn test_remaining_attempts_after_expiry() {
        let limiter = RateLimiter::new(3, WINDOW);
        let start = Instant::now();

        for _ in 0..3 {
            limiter.is_rate_limited_at("alice", start);
        }
        let later = start + WINDOW + Duration::from_millis(1);
        assert_eq!(limiter.remaining_attempts_at("alice", later), 3);
    }

    #[test]
    fn test_time_until_reset() {
        let limiter = RateLimiter::new(3, WINDOW);
        let start = Instant::now();

        assert_eq!(limiter.time_until_reset_at("alice", start), Duration::ZERO);

        limiter.is_rate_limited_at("alice", start);
        assert_eq!(limiter.time_until_reset_at("alice", start), WINDOW);

        let halfway = start + Duration::from_millis(50);
        assert_eq!(
            limiter.time_until_reset_at("alice", halfway),
            Duration::from_millis(50)
        );

        let past = start + WINDOW + Duration::from_millis(5);
        assert_eq!(limiter.time_until_reset_at("alice", past), Duration::ZERO);
    }
}

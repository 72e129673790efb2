//! Integration tests for the verification rate limiter
//!
//! Covers the attempt budget, window expiry against the real clock, and
//! concurrent access to a shared limiter.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use otpgen_core::ratelimit::RateLimiter;

#[test]
fn test_attempt_budget_and_reset() {
    let limiter = RateLimiter::new(3, Duration::from_secs(60));

    assert!(!limiter.is_rate_limited("alice"));
    assert!(!limiter.is_rate_limited("alice"));
    assert!(!limiter.is_rate_limited("alice"));
    assert!(limiter.is_rate_limited("alice"));

    limiter.reset("alice");
    assert!(!limiter.is_rate_limited("alice"));
}

#[test]
fn test_window_expiry_with_real_clock() {
    let limiter = RateLimiter::new(2, Duration::from_millis(100));

    assert!(!limiter.is_rate_limited("alice"));
    assert!(!limiter.is_rate_limited("alice"));
    assert!(limiter.is_rate_limited("alice"));

    thread::sleep(Duration::from_millis(150));
    assert!(!limiter.is_rate_limited("alice"));
}

#[test]
fn test_time_until_reset_shrinks_with_real_clock() {
    let limiter = RateLimiter::new(2, Duration::from_millis(200));

    limiter.is_rate_limited("alice");
    let first = limiter.time_until_reset("alice");
    assert!(first <= Duration::from_millis(200));
    assert!(first > Duration::ZERO);

    thread::sleep(Duration::from_millis(50));
    let second = limiter.time_until_reset("alice");
    assert!(second < first);
}

#[test]
fn test_concurrent_attempts_cannot_exceed_budget() {
    const MAX_ATTEMPTS: u32 = 10;
    let limiter = Arc::new(RateLimiter::new(MAX_ATTEMPTS, Duration::from_secs(60)));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let limiter = Arc::clone(&limiter);
        handles.push(thread::spawn(move || {
            let mut allowed = 0u32;
            for _ in 0..5 {
                if !limiter.is_rate_limited("shared-key") {
                    allowed += 1;
                }
            }
            allowed
        }));
    }

    let total_allowed: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total_allowed, MAX_ATTEMPTS);
}

#[test]
fn test_concurrent_distinct_keys_do_not_interfere() {
    let limiter = Arc::new(RateLimiter::new(3, Duration::from_secs(60)));

    let mut handles = Vec::new();
    for i in 0..4 {
        let limiter = Arc::clone(&limiter);
        handles.push(thread::spawn(move || {
            let key = format!("user:{}", i);
            let mut allowed = 0u32;
            for _ in 0..5 {
                if !limiter.is_rate_limited(&key) {
                    allowed += 1;
                }
            }
            allowed
        }));
    }

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}

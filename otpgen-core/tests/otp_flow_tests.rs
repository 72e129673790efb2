//! Integration tests for the one-time-password engine
//!
//! Exercises the public generate/verify surface end to end: algorithm
//! coverage, clock-skew windows, format guards, and composition with the
//! rate limiter the way a verifying service would use it.

use std::time::{Duration, Instant};

use otpgen_core::otp::hotp::{Alphabet, HashAlgorithm};
use otpgen_core::otp::totp::{self, TotpConfig};
use otpgen_core::ratelimit::RateLimiter;
use otpgen_core::types::OtpSecret;

const NOW: u64 = 1_700_000_000;

fn secret() -> OtpSecret {
    OtpSecret::from("JBSWY3DPEHPK3PXP")
}

#[test]
fn test_generate_verify_round_trip_all_algorithms() {
    for algorithm in [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
    ] {
        let config = TotpConfig {
            algorithm,
            ..TotpConfig::default()
        };
        let generated = totp::generate_at(&config, Some(&secret()), 0, NOW).unwrap();
        assert!(
            totp::verify_at(&config, &secret(), generated.token.expose(), NOW).unwrap(),
            "{:?} round trip failed",
            algorithm
        );
    }
}

#[test]
fn test_round_trip_across_digit_range() {
    for digits in 4..=8 {
        let config = TotpConfig {
            digits,
            ..TotpConfig::default()
        };
        let generated = totp::generate_at(&config, Some(&secret()), 0, NOW).unwrap();
        assert_eq!(generated.token.expose().len(), digits as usize);
        assert!(totp::verify_at(&config, &secret(), generated.token.expose(), NOW).unwrap());
    }
}

#[test]
fn test_code_from_adjacent_period_verifies_with_default_window() {
    let config = TotpConfig::default();

    // A code generated one period ago still verifies now
    let earlier = totp::generate_at(&config, Some(&secret()), 0, NOW - 30).unwrap();
    assert!(totp::verify_at(&config, &secret(), earlier.token.expose(), NOW).unwrap());

    // Two periods ago falls outside the default window
    let stale = totp::generate_at(&config, Some(&secret()), 0, NOW - 60).unwrap();
    assert!(!totp::verify_at(&config, &secret(), stale.token.expose(), NOW).unwrap());
}

#[test]
fn test_different_secrets_reject_each_other() {
    let config = TotpConfig::default();
    let other = OtpSecret::from("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ");

    let generated = totp::generate_at(&config, Some(&secret()), 0, NOW).unwrap();
    assert!(!totp::verify_at(&config, &other, generated.token.expose(), NOW).unwrap());
}

#[test]
fn test_verification_guarded_by_rate_limiter() {
    // The caller-side protocol: consult the limiter, verify, reset on
    // success.
    let config = TotpConfig::default();
    let limiter = RateLimiter::new(3, Duration::from_secs(60));
    let now = Instant::now();
    let key = "user:alice";

    let generated = totp::generate_at(&config, Some(&secret()), 0, NOW).unwrap();

    // Three bad guesses burn the budget
    for guess in ["000000", "111111", "222222"] {
        assert!(!limiter.is_rate_limited_at(key, now));
        let _ = totp::verify_at(&config, &secret(), guess, NOW).unwrap();
    }

    // The fourth attempt is refused before the engine is even consulted
    assert!(limiter.is_rate_limited_at(key, now));

    // After the window passes, the real code gets through and resets the
    // budget for the next login
    let later = now + Duration::from_secs(61);
    assert!(!limiter.is_rate_limited_at(key, later));
    assert!(totp::verify_at(&config, &secret(), generated.token.expose(), NOW).unwrap());
    limiter.reset_at(key, later);
    assert_eq!(limiter.remaining_attempts_at(key, later), 3);
}

#[test]
fn test_custom_alphabet_end_to_end() {
    let charset = "BCDFGHJKLMNPQRSTVWXZ";
    let config = TotpConfig {
        alphabet: Alphabet::from_charset(charset),
        digits: 5,
        ..TotpConfig::default()
    };

    let generated = totp::generate_at(&config, Some(&secret()), 0, NOW).unwrap();
    let code = generated.token.expose();
    assert_eq!(code.len(), 5);
    assert!(code.chars().all(|c| charset.contains(c)));
    assert!(totp::verify_at(&config, &secret(), code, NOW).unwrap());

    // Decimal candidates are malformed under this alphabet
    assert!(totp::verify_at(&config, &secret(), "12345", NOW).is_err());
}

#[test]
fn test_spaced_lowercase_secret_matches_canonical_form() {
    let config = TotpConfig::default();
    let canonical = totp::generate_at(&config, Some(&secret()), 0, NOW).unwrap();
    let sloppy = OtpSecret::from("jbsw y3dp ehpk 3pxp");
    assert!(totp::verify_at(&config, &sloppy, canonical.token.expose(), NOW).unwrap());
}

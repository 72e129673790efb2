//! TOTP engine (RFC 6238)
//!
//! Derives the moving counter from wall-clock time and a configurable
//! period, delegates code derivation to the HOTP generator, and exposes
//! generate/verify operations with a clock-skew window. The engine is
//! stateless; every call reads either its arguments or the clock.
//!
//! Each operation has an `*_at` twin taking an explicit Unix timestamp so
//! tests can pin time instead of sleeping.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::error::OtpError;
use crate::otp::base32;
use crate::otp::hotp::{self, Alphabet, HashAlgorithm};
use crate::types::{GeneratedCode, OtpSecret, TotpToken};

/// Default number of code symbols
pub const DEFAULT_DIGITS: u32 = 6;
/// Default period in seconds (RFC 6238 recommended time step)
pub const DEFAULT_PERIOD: u64 = 30;
/// Default clock-skew window (periods accepted on each side of now)
pub const DEFAULT_WINDOW: u32 = 1;
/// Bytes of entropy in a freshly generated secret (RFC 4226 recommends
/// at least 160 bits)
pub const GENERATED_SECRET_LEN: usize = 20;

/// Immutable per-call engine configuration
///
/// Bundles the parameters every operation needs so call sites stay
/// self-describing; defaults are SHA-1, 6 digits, 30 s period, window 1,
/// decimal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpConfig {
    pub algorithm: HashAlgorithm,
    pub digits: u32,
    pub period: u64,
    pub window: u32,
    pub alphabet: Alphabet,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            window: DEFAULT_WINDOW,
            alphabet: Alphabet::default(),
        }
    }
}

impl TotpConfig {
    /// Validate the configuration domain
    pub fn validate(&self) -> Result<(), OtpError> {
        if !(4..=8).contains(&self.digits) {
            return Err(OtpError::InvalidConfiguration {
                message: format!("digits must be between 4 and 8, got {}", self.digits),
            });
        }
        if self.period == 0 {
            return Err(OtpError::InvalidConfiguration {
                message: "period must be at least 1 second".to_string(),
            });
        }
        if self.alphabet.distinct_symbols() < 2 {
            return Err(OtpError::InvalidConfiguration {
                message: "alphabet needs at least 2 distinct symbols".to_string(),
            });
        }
        Ok(())
    }
}

/// Generate a code for the current period
///
/// When `secret` is `None`, a fresh 20-byte secret is drawn from the OS
/// CSPRNG and returned in the result so the caller can persist it.
/// `window_offset` shifts the counter by whole periods; 0 means "now".
pub fn generate(
    config: &TotpConfig,
    secret: Option<&OtpSecret>,
    window_offset: i64,
) -> Result<GeneratedCode, OtpError> {
    generate_at(config, secret, window_offset, unix_now()?)
}

/// Generate a code at an explicit Unix timestamp
pub fn generate_at(
    config: &TotpConfig,
    secret: Option<&OtpSecret>,
    window_offset: i64,
    now_secs: u64,
) -> Result<GeneratedCode, OtpError> {
    config.validate()?;

    let secret = match secret {
        Some(secret) => secret.clone(),
        None => generate_secret(),
    };
    let secret_bytes = base32::decode(secret.expose())?;

    // Counters saturate at 0 rather than wrapping when an offset reaches
    // below the epoch.
    let counter = (now_secs / config.period).saturating_add_signed(window_offset);
    let code = hotp::generate(
        &secret_bytes,
        counter,
        config.algorithm,
        config.digits,
        &config.alphabet,
    )?;
    let seconds_remaining = config.period - (now_secs % config.period);

    Ok(GeneratedCode {
        token: TotpToken::new(code),
        secret,
        seconds_remaining,
    })
}

/// Verify a candidate code against the current time window
///
/// Returns `Ok(false)` for a well-formed code that matches no period in
/// the window; errors are reserved for malformed candidates
/// (`InvalidToken`) and environment failures. With `window = W`, `2W + 1`
/// candidate periods are accepted; pair verification with the
/// [`crate::ratelimit::RateLimiter`] to keep the widened guess surface in
/// check.
pub fn verify(config: &TotpConfig, secret: &OtpSecret, candidate: &str) -> Result<bool, OtpError> {
    verify_at(config, secret, candidate, unix_now()?)
}

/// Verify a candidate code at an explicit Unix timestamp
pub fn verify_at(
    config: &TotpConfig,
    secret: &OtpSecret,
    candidate: &str,
    now_secs: u64,
) -> Result<bool, OtpError> {
    config.validate()?;
    check_candidate_format(config, candidate)?;

    let secret_bytes = base32::decode(secret.expose())?;
    let base = now_secs / config.period;
    let window = i64::from(config.window);

    // Probe every offset in the window and accumulate; no early exit and
    // constant-time content comparison, so the outcome's timing does not
    // depend on which period (if any) matched.
    let mut matched = false;
    for offset in -window..=window {
        let counter = base.saturating_add_signed(offset);
        let expected = hotp::generate(
            &secret_bytes,
            counter,
            config.algorithm,
            config.digits,
            &config.alphabet,
        )?;
        matched |= bool::from(expected.as_bytes().ct_eq(candidate.as_bytes()));
    }
    Ok(matched)
}

/// Reject candidates whose shape alone rules them out
///
/// Length and character-set checks are a correctness/DoS guard, separate
/// from cryptographic matching; a failure here is an error, not a silent
/// mismatch.
fn check_candidate_format(config: &TotpConfig, candidate: &str) -> Result<(), OtpError> {
    let length = candidate.chars().count();
    if length != config.digits as usize {
        return Err(OtpError::InvalidToken {
            reason: format!("expected {} characters, got {}", config.digits, length),
        });
    }
    if let Some(c) = candidate.chars().find(|c| !config.alphabet.contains(*c)) {
        return Err(OtpError::InvalidToken {
            reason: format!("character {:?} is not in the configured alphabet", c),
        });
    }
    Ok(())
}

/// Generate a fresh shared secret from the OS CSPRNG
pub fn generate_secret() -> OtpSecret {
    let mut bytes = [0u8; GENERATED_SECRET_LEN];
    OsRng.fill_bytes(&mut bytes);
    OtpSecret::new(base32::encode(&bytes))
}

/// Current Unix time in seconds
fn unix_now() -> Result<u64, OtpError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|_| OtpError::TimeError)
}

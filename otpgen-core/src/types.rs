//! Type definitions and wrappers for secure data handling
//!
//! This module provides type-safe wrappers for sensitive data using the
//! secrecy crate to prevent accidental exposure in logs or debug output.

use secrecy::{ExposeSecret, Secret};

/// Wrapper for a Base32-encoded shared secret
///
/// This type ensures OTP secrets are never accidentally logged or exposed
/// in debug output, maintaining security throughout the application.
#[derive(Clone, Debug)]
pub struct OtpSecret(Secret<String>);

impl OtpSecret {
    /// Create a new OtpSecret from a Base32-encoded string
    pub fn new(secret: String) -> Self {
        Self(Secret::new(secret))
    }

    /// Expose the secret value (use with caution!)
    ///
    /// This should only be called when absolutely necessary,
    /// such as when passing to cryptographic functions.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for OtpSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for OtpSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.to_string())
    }
}

/// Wrapper for generated one-time codes
///
/// Generated codes should also be treated as sensitive data and never
/// logged, even though they have a short lifetime.
#[derive(Clone, Debug)]
pub struct TotpToken(Secret<String>);

impl TotpToken {
    /// Create a new TotpToken from a generated code string
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    /// Expose the token value (use with caution!)
    ///
    /// This should only be called when sending the token to stdout
    /// or comparing it against a verification candidate.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for TotpToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Result of one code generation
///
/// Carries the code itself, the secret that produced it (a freshly
/// generated secret is returned here so the caller can persist it), and
/// how many seconds the current period remains valid.
#[derive(Clone, Debug)]
pub struct GeneratedCode {
    /// The one-time code for the selected period
    pub token: TotpToken,
    /// The secret actually used for derivation
    pub secret: OtpSecret,
    /// Seconds left before the current period rolls over
    pub seconds_remaining: u64,
}

//! Configuration module
//!
//! Handles loading and saving default token parameters from TOML files.
//! Secrets are never part of the configuration file; they stay with the
//! caller.

use serde::{Deserialize, Serialize};

use crate::otp::hotp::{Alphabet, HashAlgorithm};
use crate::otp::totp::{TotpConfig, DEFAULT_DIGITS, DEFAULT_PERIOD, DEFAULT_WINDOW};

pub mod toml_config;

/// Default token parameters
///
/// Every field can be overridden per invocation; the file only moves the
/// baseline. Sensitive data (the shared secret) is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpgenConfig {
    /// Hash algorithm for code derivation
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Number of code symbols (4-8)
    #[serde(default = "default_digits")]
    pub digits: u32,

    /// Seconds each counter value remains valid
    #[serde(default = "default_period")]
    pub period: u64,

    /// Clock-skew window in periods on each side of now
    #[serde(default = "default_window")]
    pub window: u32,

    /// Custom output symbol set; omit for standard decimal codes
    pub char_set: Option<String>,

    /// Default account label for provisioning URIs
    pub account_name: Option<String>,

    /// Default issuer label for provisioning URIs
    pub issuer: Option<String>,
}

fn default_digits() -> u32 {
    DEFAULT_DIGITS
}

fn default_period() -> u64 {
    DEFAULT_PERIOD
}

fn default_window() -> u32 {
    DEFAULT_WINDOW
}

impl Default for OtpgenConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            window: DEFAULT_WINDOW,
            char_set: None,
            account_name: None,
            issuer: None,
        }
    }
}

impl OtpgenConfig {
    /// Map the file values onto an engine configuration
    pub fn to_totp_config(&self) -> TotpConfig {
        let alphabet = match &self.char_set {
            Some(charset) => Alphabet::from_charset(charset),
            None => Alphabet::Decimal,
        };
        TotpConfig {
            algorithm: self.algorithm,
            digits: self.digits,
            period: self.period,
            window: self.window,
            alphabet,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.to_totp_config()
            .validate()
            .map_err(|e| e.to_string())?;

        if let Some(account_name) = &self.account_name {
            if account_name.trim().is_empty() {
                return Err("Account name cannot be empty".to_string());
            }
        }
        if let Some(issuer) = &self.issuer {
            if issuer.trim().is_empty() {
                return Err("Issuer cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

//! Error types for the otpgen one-time-password toolkit
//!
//! This module defines all error types used throughout the application,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the otpgen application
#[derive(Error, Debug)]
pub enum OtpgenError {
    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors related to OTP/TOTP operations
    #[error("OTP error: {0}")]
    Otp(#[from] OtpError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {path}")]
    LoadFailed { path: String },

    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

/// OTP/TOTP operation errors
///
/// `verify` never reports a wrong-but-well-formed code through this enum;
/// a mismatch is an `Ok(false)` outcome, not an error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    /// Secret is not usable Base32 (no decodable symbols, or empty)
    #[error("Invalid Base32 secret format")]
    InvalidSecretFormat,

    /// Verification candidate has the wrong length or characters outside
    /// the configured alphabet
    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    /// Digits, period, or alphabet outside the supported domain
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The host cannot perform the requested HMAC computation
    #[error("Crypto primitive unavailable: {message}")]
    CryptoUnavailable { message: String },

    /// System time error
    #[error("System time error")]
    TimeError,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OtpgenError>;

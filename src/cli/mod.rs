//! CLI command implementations
//!
//! This module contains the implementation of all CLI subcommands, plus
//! the shared flag set and its resolution against the configuration file.

pub mod generate;
pub mod uri;
pub mod verify;

use clap::Args;
use otpgen_core::config::toml_config;
use otpgen_core::error::{ConfigError, OtpgenError};
use otpgen_core::otp::hotp::{Alphabet, HashAlgorithm};
use otpgen_core::otp::totp::TotpConfig;
use otpgen_core::types::OtpSecret;

/// Token parameters shared by every subcommand
///
/// Each flag overrides the corresponding configuration-file value, which
/// in turn overrides the built-in default.
#[derive(Args, Clone)]
pub struct TokenArgs {
    /// Base32-encoded shared secret
    #[arg(long)]
    pub secret: Option<String>,

    /// Hash algorithm: sha1, sha256, or sha512
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Number of code symbols (4-8)
    #[arg(long)]
    pub digits: Option<u32>,

    /// Seconds each code remains valid
    #[arg(long)]
    pub period: Option<u64>,

    /// Custom output symbol set (not compatible with authenticator apps)
    #[arg(long)]
    pub char_set: Option<String>,

    /// Clock-skew window in periods on each side of now
    #[arg(long)]
    pub window: Option<u32>,

    /// Account label for provisioning URIs
    #[arg(long)]
    pub account_name: Option<String>,

    /// Issuer label for provisioning URIs
    #[arg(long)]
    pub issuer: Option<String>,
}

/// Flags merged with the configuration file
pub struct Resolved {
    pub config: TotpConfig,
    pub account_name: Option<String>,
    pub issuer: Option<String>,
}

/// Merge CLI flags over configuration-file values over defaults
pub fn resolve(args: &TokenArgs) -> Result<Resolved, OtpgenError> {
    let file = toml_config::load_config_or_default()?;

    let algorithm = match args.algorithm.as_deref() {
        Some(name) => name.parse::<HashAlgorithm>()?,
        None => file.algorithm,
    };
    let char_set = args.char_set.clone().or_else(|| file.char_set.clone());
    let alphabet = match char_set.as_deref() {
        Some(charset) => Alphabet::from_charset(charset),
        None => Alphabet::Decimal,
    };

    let config = TotpConfig {
        algorithm,
        digits: args.digits.unwrap_or(file.digits),
        period: args.period.unwrap_or(file.period),
        window: args.window.unwrap_or(file.window),
        alphabet,
    };
    config.validate()?;

    Ok(Resolved {
        config,
        account_name: args.account_name.clone().or(file.account_name),
        issuer: args.issuer.clone().or(file.issuer),
    })
}

/// The secret flag, required by verify and uri
pub fn require_secret(args: &TokenArgs) -> Result<OtpSecret, OtpgenError> {
    args.secret.clone().map(OtpSecret::new).ok_or_else(|| {
        OtpgenError::Config(ConfigError::MissingField {
            field: "secret".to_string(),
        })
    })
}

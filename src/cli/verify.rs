//! Verify command implementation
//!
//! Checks a candidate code against the secret within the configured
//! clock-skew window.

use colored::Colorize;
use otpgen_core::error::OtpgenError;
use otpgen_core::otp::totp;

use crate::cli::{require_secret, resolve, TokenArgs};

/// Run the verify command
///
/// Prints `valid` or `invalid`. A clean mismatch is not an engine error,
/// but the command still failed its check, so it exits nonzero like any
/// other failure.
pub fn run_verify(code: &str, args: &TokenArgs) -> Result<(), OtpgenError> {
    let resolved = resolve(args)?;
    let secret = require_secret(args)?;

    if totp::verify(&resolved.config, &secret, code)? {
        println!("{}", "valid".green());
        Ok(())
    } else {
        println!("{}", "invalid".red());
        std::process::exit(1);
    }
}

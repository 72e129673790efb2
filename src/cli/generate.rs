//! Generate command implementation
//!
//! Outputs the current one-time code to stdout for machine-parsable
//! usage; informational lines (countdown, fresh-secret notice) go to
//! stderr.

use colored::Colorize;
use otpgen_core::error::OtpgenError;
use otpgen_core::otp::totp;
use otpgen_core::types::OtpSecret;
use tracing::debug;

use crate::cli::{resolve, TokenArgs};

/// Run the generate command
pub fn run_generate(args: &TokenArgs) -> Result<(), OtpgenError> {
    let resolved = resolve(args)?;
    let secret = args.secret.clone().map(OtpSecret::new);
    let fresh_secret = secret.is_none();
    debug!(fresh_secret, "generating token");

    let generated = totp::generate(&resolved.config, secret.as_ref(), 0)?;

    // Code on stdout, first line, nothing else around it
    println!("{}", generated.token.expose());

    if fresh_secret {
        println!("{}", generated.secret.expose());
        eprintln!(
            "{} no --secret given; a fresh one was generated (line 2). Store it now.",
            "note:".yellow()
        );
    }
    eprintln!(
        "{}",
        format!("valid for {}s", generated.seconds_remaining).dimmed()
    );

    Ok(())
}

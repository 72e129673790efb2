//! Uri command implementation
//!
//! Prints the otpauth:// provisioning URI for the configured secret,
//! optionally rendered as a terminal QR code for direct scanning.

use otpgen_core::error::{ConfigError, OtpgenError};
use otpgen_core::otp::uri;

use crate::cli::{require_secret, resolve, TokenArgs};

/// Run the uri command
pub fn run_uri(args: &TokenArgs, qr: bool) -> Result<(), OtpgenError> {
    let resolved = resolve(args)?;
    let secret = require_secret(args)?;
    let account_name = resolved.account_name.clone().ok_or_else(|| {
        OtpgenError::Config(ConfigError::MissingField {
            field: "account_name".to_string(),
        })
    })?;

    let uri_string = uri::provisioning_uri(
        &secret,
        &account_name,
        resolved.issuer.as_deref(),
        &resolved.config,
    );
    println!("{}", uri_string);

    if qr {
        if let Some(rendered) = render_qr(&uri_string) {
            println!("{}", rendered);
        }
    }

    Ok(())
}

/// Render a QR code as a Unicode string for terminal display
///
/// Authenticator apps (Google Authenticator, Authy, etc.) scan the
/// encoded otpauth:// URI directly from the terminal.
fn render_qr(uri: &str) -> Option<String> {
    use qrcode::render::unicode;
    use qrcode::QrCode;

    match QrCode::new(uri.as_bytes()) {
        Ok(code) => Some(
            code.render::<unicode::Dense1x2>()
                .dark_color(unicode::Dense1x2::Light)
                .light_color(unicode::Dense1x2::Dark)
                .build(),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "QR code generation failed");
            None
        }
    }
}

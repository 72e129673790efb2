//! otpauth:// provisioning URI assembly
//!
//! Pure string formatting over values the engine already holds; the URI
//! is what QR-rendering tooling and authenticator apps consume. Only
//! configurations on the decimal code path are meaningful to third-party
//! authenticators.

use crate::otp::totp::TotpConfig;
use crate::types::OtpSecret;

/// Build the `otpauth://totp/...` provisioning URI
///
/// The label is `issuer:account` when an issuer is present, else just the
/// account name; both parts are percent-encoded. The secret is emitted
/// as-is (Base32 is URI-safe).
pub fn provisioning_uri(
    secret: &OtpSecret,
    account_name: &str,
    issuer: Option<&str>,
    config: &TotpConfig,
) -> String {
    let label = match issuer {
        Some(issuer) => format!("{}:{}", percent_encode(issuer), percent_encode(account_name)),
        None => percent_encode(account_name),
    };

    let mut uri = format!("otpauth://totp/{}?secret={}", label, secret.expose());
    if let Some(issuer) = issuer {
        uri.push_str(&format!("&issuer={}", percent_encode(issuer)));
    }
    uri.push_str(&format!(
        "&algorithm={}&digits={}&period={}",
        config.algorithm.uri_name(),
        config.digits,
        config.period
    ));
    uri
}

/// Percent-encode a label component (RFC 3986 unreserved bytes pass
/// through)
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

//! HOTP code derivation (RFC 4226)
//!
//! Computes one HMAC-based one-time code from a secret, a counter, a hash
//! algorithm, a digit count, and an output alphabet. Two truncation
//! strategies exist, selected by the [`Alphabet`] variant; only the
//! decimal one is RFC-compliant.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::OtpError;
use crate::otp::counter;

/// Hash algorithm for the HMAC step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        Self::Sha1
    }
}

impl HashAlgorithm {
    /// Name used in `otpauth://` provisioning URIs
    pub fn uri_name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SHA1" | "SHA-1" => Ok(Self::Sha1),
            "SHA256" | "SHA-256" => Ok(Self::Sha256),
            "SHA512" | "SHA-512" => Ok(Self::Sha512),
            other => Err(OtpError::CryptoUnavailable {
                message: format!("unsupported hash algorithm: {}", other),
            }),
        }
    }
}

const DECIMAL_CHARSET: &str = "0123456789";

/// Output alphabet for generated codes
///
/// `Decimal` applies RFC 4226 dynamic truncation and is the only variant
/// interoperable with standard authenticator apps. `Custom` derives each
/// output position from its own 4-byte window of the HMAC digest; it is a
/// deliberate, non-RFC extension for callers that want codes over a larger
/// symbol set, and codes produced with it cannot be checked by third-party
/// authenticators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alphabet {
    Decimal,
    Custom(Vec<char>),
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::Decimal
    }
}

impl Alphabet {
    /// Build an alphabet from a character set string
    ///
    /// The plain decimal set maps to `Decimal` so that spelling the
    /// default out does not silently switch truncation strategies.
    pub fn from_charset(charset: &str) -> Self {
        if charset == DECIMAL_CHARSET {
            Self::Decimal
        } else {
            Self::Custom(charset.chars().collect())
        }
    }

    /// Whether a character can appear in a code under this alphabet
    pub fn contains(&self, c: char) -> bool {
        match self {
            Self::Decimal => c.is_ascii_digit(),
            Self::Custom(symbols) => symbols.contains(&c),
        }
    }

    /// Number of distinct symbols
    pub fn distinct_symbols(&self) -> usize {
        match self {
            Self::Decimal => 10,
            Self::Custom(symbols) => {
                let unique: std::collections::HashSet<&char> = symbols.iter().collect();
                unique.len()
            }
        }
    }
}

/// Generate one HOTP code
///
/// Deterministic: identical inputs always produce an identical code.
/// Fails with `CryptoUnavailable` when the HMAC primitive cannot be
/// invoked and with `InvalidConfiguration` for an empty custom alphabet;
/// total over all other well-formed inputs.
pub fn generate(
    secret: &[u8],
    counter: u64,
    algorithm: HashAlgorithm,
    digits: u32,
    alphabet: &Alphabet,
) -> Result<String, OtpError> {
    let message = counter::encode(counter);
    let digest = hmac_digest(secret, &message, algorithm)?;

    match alphabet {
        Alphabet::Decimal => Ok(truncate_decimal(&digest, digits)),
        Alphabet::Custom(symbols) => {
            if symbols.is_empty() {
                return Err(OtpError::InvalidConfiguration {
                    message: "custom alphabet has no symbols".to_string(),
                });
            }
            Ok(truncate_custom(&digest, digits, symbols))
        }
    }
}

/// Compute the HMAC digest over the encoded counter
fn hmac_digest(
    key: &[u8],
    message: &[u8],
    algorithm: HashAlgorithm,
) -> Result<Vec<u8>, OtpError> {
    let unavailable = |e: InvalidLength| OtpError::CryptoUnavailable {
        message: e.to_string(),
    };

    let digest = match algorithm {
        HashAlgorithm::Sha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).map_err(unavailable)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(unavailable)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(unavailable)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(digest)
}

/// RFC 4226 §5.3 dynamic truncation
///
/// The low nibble of the last digest byte picks a 4-byte window; the top
/// bit of that window is masked off to keep the value a non-negative
/// 31-bit integer, then reduced mod 10^digits and left-zero-padded.
fn truncate_decimal(digest: &[u8], digits: u32) -> String {
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = (u32::from(digest[offset] & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3]);

    let code = binary % 10u32.pow(digits);
    format!("{:01$}", code, digits as usize)
}

/// Per-position truncation for custom alphabets
///
/// Each output position i reads a 4-byte big-endian word starting at
/// `(i * 4) % digest.len()`, every byte indexed modulo the digest length
/// so short digests and large digit counts never read out of bounds, and
/// reduces it modulo the alphabet length. Wider throwaway entropy per
/// symbol than the RFC's single truncation point, at the cost of
/// interoperability.
fn truncate_custom(digest: &[u8], digits: u32, symbols: &[char]) -> String {
    let mut code = String::with_capacity(digits as usize);
    for position in 0..digits as usize {
        let start = (position * 4) % digest.len();
        let mut word: u32 = 0;
        for lane in 0..4 {
            word = (word << 8) | u32::from(digest[(start + lane) % digest.len()]);
        }
        code.push(symbols[word as usize % symbols.len()]);
    }
    code
}

//! One-time-password engine
//!
//! Base32 secret codec, counter encoding, HOTP code derivation, the
//! time-based engine with clock-skew windowing, and provisioning URIs.

pub mod base32;
pub mod counter;
pub mod hotp;
pub mod totp;
pub mod uri;

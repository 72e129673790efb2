//! Moving-factor encoding (RFC 4226 §5.2)
//!
//! The HMAC message for a one-time code is the counter rendered as an
//! 8-byte big-endian buffer, high-order byte first, zero-padded.

/// Encode a counter as the 8-byte big-endian HMAC message
///
/// Total over the full `u64` range; no error conditions.
pub fn encode(counter: u64) -> [u8; 8] {
    counter.to_be_bytes()
}

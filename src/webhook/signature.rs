//! Slack request signature verification.
//!
//! Implements the `v0` signing scheme: the signature header carries a
//! hex-encoded HMAC-SHA256 of `v0:{timestamp}:{raw body}` keyed by the
//! app's signing secret. Verification is a pure function of its inputs and
//! never fails with an error; any malformed input is simply not authentic.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Version tag of the signing scheme, used in both the base string and the
/// digest prefix.
const VERSION: &str = "v0";

/// Check `signature` against the HMAC of `timestamp` and the raw request
/// body, and reject timestamps further than `tolerance_secs` from now.
///
/// The body must be the exact wire bytes, before any JSON decoding.
pub fn verify(timestamp: &str, signature: &str, body: &[u8], secret: &str, tolerance_secs: i64) -> bool {
    verify_at(timestamp, signature, body, secret, tolerance_secs, Utc::now().timestamp())
}

/// Verification against an explicit clock, so the replay window is testable.
fn verify_at(timestamp: &str, signature: &str, body: &[u8], secret: &str, tolerance_secs: i64, now: i64) -> bool {
    // Replay protection: the timestamp must parse and be close to the wall clock.
    let Ok(ts) = timestamp.trim().parse::<i64>() else {
        return false;
    };
    if (now - ts).abs() > tolerance_secs {
        return false;
    }

    let Some(hex_part) = signature.strip_prefix("v0=") else {
        return false;
    };
    let Ok(provided) = hex::decode(hex_part) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    let expected = mac.finalize().into_bytes();

    // Constant-time comparison of the raw digest bytes.
    expected.as_slice().ct_eq(provided.as_slice()).into()
}

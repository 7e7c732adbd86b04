//! Payment-gateway callback signature verification.
//!
//! The gateway signs its settlement callback with HMAC-SHA256 over
//! `"{order_id}|{payment_id}"` using the shared key secret. Verification is
//! the sole authenticity gate against forged callbacks and must run before
//! any ledger state is read or mutated.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the expected callback signature for a gateway order/payment pair.
///
/// Returns the hex-encoded HMAC-SHA256 of `"{order_id}|{payment_id}"`.
pub fn order_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a gateway-provided signature against the expected HMAC.
///
/// Comparison is constant-time over the full signature length so the check
/// leaks nothing about the position of the first mismatching byte.
pub fn verify_order_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    provided: &str,
) -> bool {
    let expected = order_signature(secret, order_id, payment_id);
    constant_time_eq(expected.as_bytes(), provided.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

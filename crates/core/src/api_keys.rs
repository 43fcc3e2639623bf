//! Static API key verification.
//!
//! Key-gated endpoints share a single configured secret. Incoming keys are
//! never compared byte-by-byte against it directly: both sides are reduced to
//! SHA-256 digests first, so the comparison always runs over 64 hex chars.

/// Header carrying the shared API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Compute the SHA-256 hex digest of an API key.
pub fn hash_api_key(key: &str) -> String {
    crate::hashing::sha256_hex(key.as_bytes())
}

/// Check a presented key against the configured one.
///
/// An empty configured key never matches anything.
pub fn keys_match(presented: &str, configured: &str) -> bool {
    if configured.is_empty() {
        return false;
    }

    let a = hash_api_key(presented);
    let b = hash_api_key(configured);

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

//! Domain-separated BLAKE3 hashing.
//!
//! Voucher digests use BLAKE3's key derivation mode with a fixed context
//! string so they can never collide with a plain BLAKE3 hash of the same
//! bytes computed for another purpose.

/// Context string for voucher digests.
pub const VOUCHER_DIGEST_CONTEXT: &str = "mintpass v1 voucher-digest";

/// Compute the plain BLAKE3 hash of the input data.
pub fn hash(data: &[u8]) -> [u8; 32] {
    *::blake3::hash(data).as_bytes()
}

/// Derive 32 bytes using BLAKE3's key derivation mode.
pub fn derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    ::blake3::derive_key(context, key_material)
}

/// Digest a canonically encoded voucher.
///
/// `BLAKE3::derive_key("mintpass v1 voucher-digest", encoded)`
pub fn voucher_digest(encoded: &[u8]) -> [u8; 32] {
    derive_key(VOUCHER_DIGEST_CONTEXT, encoded)
}

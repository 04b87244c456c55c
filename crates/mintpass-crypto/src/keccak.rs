//! Keccak-256 hashing (the pre-standard SHA-3 variant used by Ethereum).

use sha3::{Digest, Keccak256};

/// Prefix for EIP-191 version `0x45` personal messages carrying a 32-byte payload.
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute the Keccak-256 hash of the input data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Hash a 32-byte digest as an EIP-191 personal message.
///
/// `keccak256("\x19Ethereum Signed Message:\n32" || digest)`
///
/// This is the value an Ethereum wallet actually signs when asked to sign a
/// 32-byte payload, and the value a contract recovers the signer from.
pub fn eip191_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(digest);
    hasher.finalize().into()
}

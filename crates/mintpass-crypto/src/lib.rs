//! # mintpass-crypto
//!
//! Cryptographic primitives for mint voucher signing and verification.
//!
//! Two signature schemes are supported, each pairing a digest function with a
//! signer. The pairing is fixed per scheme; there is no algorithm negotiation.
//!
//! ## Modules
//!
//! - [`keccak`] — Keccak-256 and the EIP-191 personal message hash
//! - [`secp256k1`] — Recoverable secp256k1 ECDSA and Ethereum addresses
//! - [`blake3`] — Domain-separated BLAKE3 voucher digests
//! - [`ed25519`] — Ed25519 signing and verification (RFC 8032)
//! - [`scheme`] — The [`SignatureScheme`](scheme::SignatureScheme) trait and its implementations
//! - [`secret`] — Scoped, zeroizing secret key credentials

pub mod blake3;
pub mod ed25519;
pub mod keccak;
pub mod scheme;
pub mod secp256k1;
pub mod secret;

pub use scheme::{Ed25519Blake3, Eip191Secp256k1, SchemeKind, SignatureScheme};
pub use secret::SecretKey;

/// Error types for cryptographic operations.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The private key bytes do not form a valid key for the scheme.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Invalid key length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// The signing primitive rejected the digest.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Signature verification failed.
    #[error("signature verification failed")]
    SignatureVerification,

    /// Invalid signature length for the scheme.
    #[error("invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    /// The bytes do not describe a valid signer identity.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// A credential could not be loaded from its source.
    #[error("credential unavailable: {0}")]
    Credential(String),

    /// The scheme name is not recognised.
    #[error("unknown signature scheme: {0}")]
    UnknownScheme(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

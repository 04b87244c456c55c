//! Ed25519 signing and verification (RFC 8032).
//!
//! Wraps `ed25519-dalek` with length-checked constructors so malformed key or
//! signature bytes surface as [`CryptoError`] instead of panics.

use ed25519_dalek::Signer;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{CryptoError, Result};

/// Secret seed length in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// An Ed25519 signing key (private key). Zeroized on drop.
pub struct SigningKey {
    inner: ed25519_dalek::SigningKey,
}

/// An Ed25519 verification key (public key).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    inner: ed25519_dalek::VerifyingKey,
}

/// An Ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: ed25519_dalek::Signature,
}

impl SigningKey {
    /// Create a signing key from a 32-byte secret seed.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidKeyLength`] if `secret` is not 32 bytes
    pub fn from_slice(secret: &[u8]) -> Result<Self> {
        let mut seed: [u8; SECRET_KEY_LEN] =
            secret
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: SECRET_KEY_LEN,
                    actual: secret.len(),
                })?;
        let inner = ed25519_dalek::SigningKey::from_bytes(&seed);
        seed.zeroize();
        Ok(Self { inner })
    }

    /// Get the corresponding verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature {
            inner: self.inner.sign(message),
        }
    }
}

impl VerifyingKey {
    /// Create a verifying key from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; PUBLIC_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: PUBLIC_KEY_LEN,
                    actual: bytes.len(),
                })?;
        let inner = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|e| CryptoError::InvalidIdentity(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Get the raw bytes of this verifying key.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.inner.to_bytes()
    }

    /// Verify a signature on a message.
    ///
    /// Uses strict verification: small-order keys and non-canonical
    /// signatures are rejected.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        self.inner
            .verify_strict(message, &signature.inner)
            .map_err(|_| CryptoError::SignatureVerification)
    }
}

impl Signature {
    /// Create a signature from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let inner = ed25519_dalek::Signature::from_slice(bytes).map_err(|_| {
            CryptoError::InvalidSignatureLength {
                expected: SIGNATURE_LEN,
                actual: bytes.len(),
            }
        })?;
        Ok(Self { inner })
    }

    /// Get the raw bytes of this signature.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.inner.to_bytes()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("public", &self.verifying_key())
            .finish()
    }
}

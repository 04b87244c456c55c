//! Signature schemes: a digest function paired with a signer.
//!
//! A scheme fixes how canonical voucher bytes are fingerprinted, how the
//! fingerprint is signed, and what identity a verifier checks the signature
//! against. Issuer and verifier must agree on the scheme out of band.
//!
//! | scheme | digest | signature | identity |
//! |---|---|---|---|
//! | [`Eip191Secp256k1`] | Keccak-256 | 65-byte recoverable ECDSA over the EIP-191 hash | 20-byte address |
//! | [`Ed25519Blake3`] | BLAKE3 `derive_key` | 64-byte Ed25519 | 32-byte public key |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::secp256k1::EthAddress;
use crate::{blake3, ed25519, keccak, secp256k1, CryptoError, Result};

/// A digest function and signer pair.
///
/// Private keys are passed as raw bytes for the duration of one call; no
/// implementation retains key material.
pub trait SignatureScheme: Send + Sync + 'static {
    /// The public identity a signature is verified against.
    type Identity: Clone + PartialEq + Eq + fmt::Debug + Send + Sync;

    /// Stable scheme name.
    const NAME: &'static str;

    /// Signature length in bytes.
    const SIGNATURE_LEN: usize;

    /// Fingerprint canonical voucher bytes.
    fn digest(encoded: &[u8]) -> [u8; 32];

    /// Sign a digest with the given private key.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidKeyLength`] / [`CryptoError::InvalidKey`] for malformed keys
    /// - [`CryptoError::Signing`] if the primitive rejects the digest
    fn sign(secret: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>>;

    /// Check that `signature` over `digest` was produced by `identity`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::SignatureVerification`] on mismatch
    /// - [`CryptoError::InvalidSignatureLength`] for wrongly sized signatures
    fn verify(identity: &Self::Identity, digest: &[u8; 32], signature: &[u8]) -> Result<()>;

    /// Derive the public identity controlled by a private key.
    fn identity(secret: &[u8]) -> Result<Self::Identity>;

    /// Encode an identity as bytes.
    fn identity_bytes(identity: &Self::Identity) -> Vec<u8>;

    /// Decode an identity from bytes.
    fn parse_identity(bytes: &[u8]) -> Result<Self::Identity>;
}

/// Ethereum-compatible scheme: Keccak-256 digest, EIP-191 personal message
/// signing with recoverable secp256k1 ECDSA, identity is the signer's address.
#[derive(Clone, Copy, Debug, Default)]
pub struct Eip191Secp256k1;

impl SignatureScheme for Eip191Secp256k1 {
    type Identity = EthAddress;

    const NAME: &'static str = "eip191-secp256k1";
    const SIGNATURE_LEN: usize = secp256k1::SIGNATURE_LEN;

    fn digest(encoded: &[u8]) -> [u8; 32] {
        keccak::keccak256(encoded)
    }

    fn sign(secret: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>> {
        let prehash = keccak::eip191_hash(digest);
        Ok(secp256k1::sign_prehash(secret, &prehash)?.to_vec())
    }

    fn verify(identity: &EthAddress, digest: &[u8; 32], signature: &[u8]) -> Result<()> {
        let prehash = keccak::eip191_hash(digest);
        let recovered = secp256k1::recover_address(&prehash, signature)?;
        if &recovered == identity {
            Ok(())
        } else {
            Err(CryptoError::SignatureVerification)
        }
    }

    fn identity(secret: &[u8]) -> Result<EthAddress> {
        secp256k1::address_from_secret(secret)
    }

    fn identity_bytes(identity: &EthAddress) -> Vec<u8> {
        identity.to_vec()
    }

    fn parse_identity(bytes: &[u8]) -> Result<EthAddress> {
        bytes.try_into().map_err(|_| {
            CryptoError::InvalidIdentity(format!(
                "address must be {} bytes, got {}",
                secp256k1::ADDRESS_LEN,
                bytes.len()
            ))
        })
    }
}

/// Ed25519 over a domain-separated BLAKE3 digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Blake3;

impl SignatureScheme for Ed25519Blake3 {
    type Identity = ed25519::VerifyingKey;

    const NAME: &'static str = "ed25519-blake3";
    const SIGNATURE_LEN: usize = ed25519::SIGNATURE_LEN;

    fn digest(encoded: &[u8]) -> [u8; 32] {
        blake3::voucher_digest(encoded)
    }

    fn sign(secret: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>> {
        let key = ed25519::SigningKey::from_slice(secret)?;
        Ok(key.sign(digest).to_bytes().to_vec())
    }

    fn verify(
        identity: &ed25519::VerifyingKey,
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<()> {
        let signature = ed25519::Signature::from_slice(signature)?;
        identity.verify(digest, &signature)
    }

    fn identity(secret: &[u8]) -> Result<ed25519::VerifyingKey> {
        Ok(ed25519::SigningKey::from_slice(secret)?.verifying_key())
    }

    fn identity_bytes(identity: &ed25519::VerifyingKey) -> Vec<u8> {
        identity.to_bytes().to_vec()
    }

    fn parse_identity(bytes: &[u8]) -> Result<ed25519::VerifyingKey> {
        ed25519::VerifyingKey::from_slice(bytes)
    }
}

/// Runtime selector for a [`SignatureScheme`], used by configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemeKind {
    #[default]
    #[serde(rename = "eip191-secp256k1")]
    Eip191Secp256k1,
    #[serde(rename = "ed25519-blake3")]
    Ed25519Blake3,
}

impl SchemeKind {
    /// Stable scheme name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Eip191Secp256k1 => Eip191Secp256k1::NAME,
            Self::Ed25519Blake3 => Ed25519Blake3::NAME,
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemeKind {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Eip191Secp256k1, Self::Ed25519Blake3]
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CryptoError::UnknownScheme(s.to_string()))
    }
}

//! Recoverable secp256k1 ECDSA.
//!
//! Signatures are 65 bytes laid out as `r || s || v` with `v ∈ {27, 28}`, the
//! format produced by Ethereum wallets and consumed by `ecrecover`. Signing is
//! deterministic (RFC 6979) and always yields a low-S signature; verification
//! rejects high-S signatures (EIP-2) so each message has one valid encoding per
//! key.
//!
//! Signer identity is the 20-byte Ethereum address:
//! `keccak256(uncompressed_public_key[1..])[12..]`.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::keccak::keccak256;
use crate::{CryptoError, Result};

/// Private key length in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Recoverable signature length in bytes.
pub const SIGNATURE_LEN: usize = 65;

/// Ethereum address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Offset added to the recovery id in the `v` byte.
const RECOVERY_ID_OFFSET: u8 = 27;

/// A 20-byte Ethereum address.
pub type EthAddress = [u8; ADDRESS_LEN];

/// Build a signing key from raw private key bytes.
///
/// The returned key zeroizes itself on drop.
///
/// # Errors
///
/// - [`CryptoError::InvalidKeyLength`] if `secret` is not 32 bytes
/// - [`CryptoError::InvalidKey`] if the scalar is zero or not below the curve order
fn signing_key(secret: &[u8]) -> Result<SigningKey> {
    if secret.len() != SECRET_KEY_LEN {
        return Err(CryptoError::InvalidKeyLength {
            expected: SECRET_KEY_LEN,
            actual: secret.len(),
        });
    }
    SigningKey::from_slice(secret)
        .map_err(|_| CryptoError::InvalidKey("secp256k1 scalar is zero or out of range".into()))
}

/// Derive the Ethereum address of a public key.
pub fn address_of(key: &VerifyingKey) -> EthAddress {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 SEC1 tag.
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Derive the Ethereum address controlled by a private key.
pub fn address_from_secret(secret: &[u8]) -> Result<EthAddress> {
    let key = signing_key(secret)?;
    Ok(address_of(key.verifying_key()))
}

/// Sign a 32-byte prehash, returning a 65-byte recoverable signature.
///
/// # Errors
///
/// - [`CryptoError::InvalidKeyLength`] / [`CryptoError::InvalidKey`] for malformed keys
/// - [`CryptoError::Signing`] if the primitive rejects the prehash
pub fn sign_prehash(secret: &[u8], prehash: &[u8; 32]) -> Result<[u8; SIGNATURE_LEN]> {
    let key = signing_key(secret)?;
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(prehash)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;

    let mut out = [0u8; SIGNATURE_LEN];
    out[..64].copy_from_slice(&signature.to_bytes());
    out[64] = recovery_id.to_byte() + RECOVERY_ID_OFFSET;
    Ok(out)
}

/// Recover the Ethereum address that produced `signature` over `prehash`.
///
/// Accepts `v` as either `{0, 1}` or `{27, 28}`.
///
/// # Errors
///
/// - [`CryptoError::InvalidSignatureLength`] if the signature is not 65 bytes
/// - [`CryptoError::SignatureVerification`] if the signature is malformed,
///   high-S, or no public key can be recovered
pub fn recover_address(prehash: &[u8; 32], signature: &[u8]) -> Result<EthAddress> {
    if signature.len() != SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignatureLength {
            expected: SIGNATURE_LEN,
            actual: signature.len(),
        });
    }

    let v = signature[64];
    let v = if v >= RECOVERY_ID_OFFSET {
        v - RECOVERY_ID_OFFSET
    } else {
        v
    };
    let recovery_id = RecoveryId::from_byte(v).ok_or(CryptoError::SignatureVerification)?;

    let sig =
        Signature::from_slice(&signature[..64]).map_err(|_| CryptoError::SignatureVerification)?;
    if sig.normalize_s().is_some() {
        return Err(CryptoError::SignatureVerification);
    }

    let key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
        .map_err(|_| CryptoError::SignatureVerification)?;
    Ok(address_of(&key))
}

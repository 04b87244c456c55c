//! Scoped secret key credentials.
//!
//! Authority keys are injected at call time from the environment or a key
//! file and are never compiled in. A [`SecretKey`] owns its bytes in a
//! zeroizing buffer; schemes borrow the bytes for the duration of a single
//! signing call and build their own short-lived key objects from them.

use std::path::Path;

use zeroize::Zeroizing;

use crate::{CryptoError, Result};

/// Raw private key bytes, wiped from memory on drop.
#[derive(Clone)]
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    /// Take ownership of raw key bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    /// Parse a hex-encoded key. Surrounding whitespace and a `0x` prefix are ignored.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let trimmed = encoded.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits)
            .map_err(|e| CryptoError::Credential(format!("key is not valid hex: {e}")))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Load a hex-encoded key from an environment variable.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = Zeroizing::new(
            std::env::var(var)
                .map_err(|_| CryptoError::Credential(format!("environment variable {var} is not set")))?,
        );
        Self::from_hex(&value)
    }

    /// Load a hex-encoded key from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|e| {
            CryptoError::Credential(format!("failed to read {}: {e}", path.display()))
        })?);
        Self::from_hex(&contents)
    }

    /// Borrow the raw key bytes.
    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_prefix() {
        let key = SecretKey::from_hex("0x0102ff").expect("hex");
        assert_eq!(key.expose(), &[0x01, 0x02, 0xff]);
    }

    #[test]
    fn test_from_hex_trims_whitespace() {
        let key = SecretKey::from_hex("  abcd\n").expect("hex");
        assert_eq!(key.expose(), &[0xab, 0xcd]);
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(matches!(
            SecretKey::from_hex("zz"),
            Err(CryptoError::Credential(_))
        ));
    }

    #[test]
    fn test_missing_env_rejected() {
        assert!(matches!(
            SecretKey::from_env("MINTPASS_TEST_KEY_THAT_IS_NEVER_SET"),
            Err(CryptoError::Credential(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("authority.key");
        std::fs::write(&path, "0x2a2a\n").expect("write");
        let key = SecretKey::from_file(&path).expect("load");
        assert_eq!(key.expose(), &[0x2a, 0x2a]);
    }

    #[test]
    fn test_debug_redacts() {
        let key = SecretKey::from_bytes(vec![0x42; 32]);
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("42"));
        assert!(rendered.contains("redacted"));
    }
}

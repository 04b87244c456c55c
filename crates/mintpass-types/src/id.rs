//! Fixed-width identifiers.
//!
//! Both identifiers render as `0x`-prefixed lowercase hex and parse with or
//! without the prefix.

use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{Result, TypesError, ADDRESS_LEN, TRANSACTION_ID_LEN};

/// Globally unique voucher identifier (32 bytes).
///
/// Uniqueness is a protocol invariant that callers must uphold; nothing in
/// this type generates or checks it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
pub struct TransactionId([u8; TRANSACTION_ID_LEN]);

/// Recipient address (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
pub struct Address([u8; ADDRESS_LEN]);

impl TransactionId {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; TRANSACTION_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Big-endian `value` in the low eight bytes, zeros elsewhere.
    ///
    /// `from_u64(1)` is `0x00…01`.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; TRANSACTION_ID_LEN];
        bytes[TRANSACTION_ID_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Pack a short UTF-8 label, right-padded with zeros.
    ///
    /// The label must be at most 31 bytes so the value stays zero-terminated,
    /// matching `ethers.encodeBytes32String`.
    pub fn from_label(label: &str) -> Result<Self> {
        let raw = label.as_bytes();
        if raw.len() >= TRANSACTION_ID_LEN {
            return Err(TypesError::LabelTooLong { len: raw.len() });
        }
        let mut bytes = [0u8; TRANSACTION_ID_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    /// Parse `0x`-prefixed or bare hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        parse_fixed("transaction_id", s).map(Self)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; TRANSACTION_ID_LEN] {
        &self.0
    }
}

impl Address {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse `0x`-prefixed or bare hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        parse_fixed("recipient", s).map(Self)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

fn parse_fixed<const N: usize>(field: &'static str, s: &str) -> Result<[u8; N]> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let raw = hex::decode(digits).map_err(|e| TypesError::InvalidHex {
        field,
        reason: e.to_string(),
    })?;
    fixed_from_slice(field, &raw)
}

fn fixed_from_slice<const N: usize>(field: &'static str, raw: &[u8]) -> Result<[u8; N]> {
    raw.try_into().map_err(|_| TypesError::InvalidLength {
        field,
        expected: N,
        actual: raw.len(),
    })
}

impl TryFrom<&[u8]> for TransactionId {
    type Error = TypesError;

    fn try_from(raw: &[u8]) -> Result<Self> {
        fixed_from_slice("transaction_id", raw).map(Self)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = TypesError;

    fn try_from(raw: &[u8]) -> Result<Self> {
        fixed_from_slice("recipient", raw).map(Self)
    }
}

impl From<[u8; TRANSACTION_ID_LEN]> for TransactionId {
    fn from(bytes: [u8; TRANSACTION_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({self})")
    }
}

impl FromStr for TransactionId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

//! Mint vouchers and their signed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{Address, TransactionId, TypesError};

/// Authorization to mint one asset record.
///
/// Immutable once built: fields are only reachable through accessors, so a
/// signed voucher cannot be altered in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    transaction_id: TransactionId,
    recipient: Address,
    resource_uri: String,
}

impl Voucher {
    /// Build a voucher. Performs no policy checks; see the issuer for those.
    pub fn new(
        transaction_id: TransactionId,
        recipient: Address,
        resource_uri: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id,
            recipient,
            resource_uri: resource_uri.into(),
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn recipient(&self) -> &Address {
        &self.recipient
    }

    pub fn resource_uri(&self) -> &str {
        &self.resource_uri
    }
}

/// Scheme-defined signature bytes (65 for recoverable ECDSA, 64 for Ed25519).
#[derive(Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct VoucherSignature(Vec<u8>);

impl VoucherSignature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VoucherSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for VoucherSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoucherSignature({self})")
    }
}

impl FromStr for VoucherSignature {
    type Err = TypesError;

    fn from_str(s: &str) -> crate::Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        hex::decode(digits)
            .map(Self)
            .map_err(|e| TypesError::InvalidHex {
                field: "signature",
                reason: e.to_string(),
            })
    }
}

/// A voucher paired with the authority's signature over its digest.
///
/// This is the message handed to a verifier. It has no identity of its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedVoucher {
    voucher: Voucher,
    signature: VoucherSignature,
}

impl SignedVoucher {
    pub fn new(voucher: Voucher, signature: VoucherSignature) -> Self {
        Self { voucher, signature }
    }

    pub fn voucher(&self) -> &Voucher {
        &self.voucher
    }

    pub fn signature(&self) -> &VoucherSignature {
        &self.signature
    }

    pub fn into_parts(self) -> (Voucher, VoucherSignature) {
        (self.voucher, self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SignedVoucher {
        SignedVoucher::new(
            Voucher::new(
                TransactionId::from_u64(1),
                Address::new([0xAA; 20]),
                "https://example.test/1",
            ),
            VoucherSignature::new(vec![0x01; 65]),
        )
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(
            json["voucher"]["transaction_id"],
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(
            json["voucher"]["recipient"],
            "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        );
        assert_eq!(json["voucher"]["resource_uri"], "https://example.test/1");
        assert_eq!(json["signature"], format!("0x{}", "01".repeat(65)));
    }

    #[test]
    fn test_json_roundtrip() {
        let signed = sample();
        let json = serde_json::to_string(&signed).expect("serialize");
        let parsed: SignedVoucher = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, signed);
    }

    #[test]
    fn test_rejects_wrong_width_in_json() {
        let json = r#"{
            "voucher": {
                "transaction_id": "0x01",
                "recipient": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "resource_uri": "x"
            },
            "signature": "0x00"
        }"#;
        assert!(serde_json::from_str::<SignedVoucher>(json).is_err());
    }

    #[test]
    fn test_signature_parse() {
        let sig: VoucherSignature = "0xdeadbeef".parse().expect("parse");
        assert_eq!(sig.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(sig.len(), 4);
        assert!("0xzz".parse::<VoucherSignature>().is_err());
    }
}

//! Canonical voucher encoding.
//!
//! ## Layout
//!
//! ```text
//! 0  .. 32   transaction_id
//! 32 .. 52   recipient
//! 52 .. end  resource_uri (UTF-8, no length prefix)
//! ```
//!
//! Identical to Solidity `abi.encodePacked(bytes32, address, string)`, so an
//! on-chain verifier can rebuild it with one call. The two fixed-width fields
//! come first and the only variable-width field is last, which keeps the
//! encoding injective without a length prefix. Any field appended after
//! `resource_uri` must be preceded by a length prefix for `resource_uri`.

use mintpass_types::{Voucher, ADDRESS_LEN, TRANSACTION_ID_LEN};

/// Length of the fixed-width prefix (`transaction_id || recipient`).
pub const FIXED_PREFIX_LEN: usize = TRANSACTION_ID_LEN + ADDRESS_LEN;

/// A fixed-width field had the wrong length.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("cannot encode {field}: expected {expected} bytes, got {actual}")]
    FieldWidth {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Encode a voucher into its canonical bytes.
pub fn encode(voucher: &Voucher) -> Vec<u8> {
    pack(
        voucher.transaction_id().as_bytes(),
        voucher.recipient().as_bytes(),
        voucher.resource_uri(),
    )
}

/// Encode raw voucher fields into canonical bytes.
///
/// # Errors
///
/// - [`EncodingError::FieldWidth`] if `transaction_id` is not 32 bytes or
///   `recipient` is not 20 bytes
pub fn encode_fields(
    transaction_id: &[u8],
    recipient: &[u8],
    resource_uri: &str,
) -> Result<Vec<u8>, EncodingError> {
    check_width("transaction_id", transaction_id, TRANSACTION_ID_LEN)?;
    check_width("recipient", recipient, ADDRESS_LEN)?;
    Ok(pack(transaction_id, recipient, resource_uri))
}

fn check_width(field: &'static str, value: &[u8], expected: usize) -> Result<(), EncodingError> {
    if value.len() == expected {
        Ok(())
    } else {
        Err(EncodingError::FieldWidth {
            field,
            expected,
            actual: value.len(),
        })
    }
}

fn pack(transaction_id: &[u8], recipient: &[u8], resource_uri: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(FIXED_PREFIX_LEN + resource_uri.len());
    out.extend_from_slice(transaction_id);
    out.extend_from_slice(recipient);
    out.extend_from_slice(resource_uri.as_bytes());
    out
}

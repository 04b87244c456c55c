//! # mintpass-types
//!
//! Shared domain types for mint vouchers: identifiers, the voucher itself,
//! its signed form, and the records a ledger keeps once a voucher is consumed.

pub mod id;
pub mod mint;
pub mod voucher;

pub use id::{Address, TransactionId};
pub use mint::{MintReceipt, MintRecord, MintStatus};
pub use voucher::{SignedVoucher, Voucher, VoucherSignature};

/// Width of a transaction identifier in bytes.
pub const TRANSACTION_ID_LEN: usize = 32;

/// Width of a recipient address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Error types for constructing domain values.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// A fixed-width field was given the wrong number of bytes.
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// The field being parsed.
        field: &'static str,
        /// The declared width.
        expected: usize,
        /// The supplied width.
        actual: usize,
    },

    /// A hex string could not be decoded.
    #[error("{field} is not valid hex: {reason}")]
    InvalidHex {
        /// The field being parsed.
        field: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// A transaction label does not fit in 31 bytes.
    #[error("transaction label is {len} bytes, at most 31 allowed")]
    LabelTooLong {
        /// Label length in bytes.
        len: usize,
    },
}

/// Convenience result type for type construction.
pub type Result<T> = std::result::Result<T, TypesError>;

//! # mintpass-issuer
//!
//! Off-chain issuance of signed mint vouchers.
//!
//! An authority holding a private key builds a [`Voucher`](mintpass_types::Voucher),
//! encodes it into its canonical byte layout, digests the bytes, and signs the
//! digest. The resulting [`SignedVoucher`](mintpass_types::SignedVoucher) is
//! handed to a verifier, which recomputes the same digest independently.
//!
//! ## Modules
//!
//! - [`encoding`] — Canonical voucher byte layout
//! - [`issuer`] — Voucher construction and signing

pub mod encoding;
pub mod issuer;

pub use encoding::{encode, encode_fields, EncodingError};
pub use issuer::{voucher_digest, VoucherIssuer};

/// Error types for voucher issuance.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    /// A caller-supplied field violates an issuance precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Canonical encoding failed.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The private key was malformed or the signer rejected the digest.
    #[error("signing failed: {0}")]
    Signing(#[from] mintpass_crypto::CryptoError),
}

/// Convenience result type for issuance.
pub type Result<T> = std::result::Result<T, IssueError>;

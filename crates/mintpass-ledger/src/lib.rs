//! # mintpass-ledger
//!
//! Verification and replay protection for signed mint vouchers.
//!
//! A ledger accepts a [`SignedVoucher`], recomputes its digest, checks the
//! signature against a trusted authority, and then consumes the voucher's
//! transaction id. Consumption and minting happen in one atomic step: of any
//! number of concurrent submissions sharing a transaction id, exactly one
//! mints and the rest are rejected as replays.
//!
//! Every rejection is terminal for that voucher. Nothing here retries; a
//! rejected mint needs a new voucher with a fresh transaction id.
//!
//! ## Modules
//!
//! - [`consumed`] — The [`ConsumedSet`] abstraction and its in-memory implementation
//! - [`sqlite`] — SQLite-backed [`ConsumedSet`]
//! - [`ledger`] — The reference [`Ledger`] verifier

pub mod consumed;
pub mod ledger;
pub mod sqlite;

pub use consumed::{ConsumedSet, MemoryConsumedSet, MintEntry};
pub use ledger::{verify_signature, Ledger};
pub use sqlite::SqliteConsumedSet;

use mintpass_crypto::SignatureScheme;
use mintpass_types::{MintReceipt, SignedVoucher, TransactionId};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The signature was not produced by the trusted authority over this voucher.
    #[error("signature does not match the authority")]
    SignatureMismatch,

    /// The transaction id has already been consumed.
    #[error("transaction id {transaction_id} already consumed")]
    Replay {
        /// The replayed identifier.
        transaction_id: TransactionId,
    },

    /// The consumed set could not be accessed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Database failure.
    #[error(transparent)]
    Db(#[from] mintpass_db::DbError),
}

/// Convenience result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Validates signed vouchers and consumes their transaction ids.
pub trait Verifier<S: SignatureScheme> {
    /// Verify `signed` against `authority` and, if valid and unconsumed,
    /// atomically consume its transaction id and mint.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::SignatureMismatch`] if the signature does not verify
    /// - [`LedgerError::Replay`] if the transaction id was already consumed
    fn verify_and_consume(
        &self,
        signed: &SignedVoucher,
        authority: &S::Identity,
    ) -> Result<MintReceipt>;
}

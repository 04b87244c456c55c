//! Voucher issuance.
//!
//! ## Flow
//!
//! 1. Check preconditions (fixed widths, non-empty `resource_uri`)
//! 2. Build the [`Voucher`]
//! 3. [`encode`] → `S::digest` → `S::sign`
//! 4. Return the [`SignedVoucher`]
//!
//! The issuer holds no state and performs no I/O. It never generates
//! transaction ids: two vouchers issued with the same id are both validly
//! signed, and only the first to reach a ledger will mint. Callers must make
//! ids unique.

use std::marker::PhantomData;

use mintpass_crypto::SignatureScheme;
use mintpass_types::{Address, SignedVoucher, TransactionId, Voucher, VoucherSignature};

use crate::encoding::encode;
use crate::{IssueError, Result};

/// Issues vouchers signed under scheme `S`.
pub struct VoucherIssuer<S> {
    _scheme: PhantomData<fn() -> S>,
}

impl<S: SignatureScheme> VoucherIssuer<S> {
    pub fn new() -> Self {
        Self {
            _scheme: PhantomData,
        }
    }

    /// Build and sign a voucher from raw fields.
    ///
    /// `private_key` is borrowed for this call only.
    ///
    /// # Errors
    ///
    /// - [`IssueError::InvalidInput`] if `transaction_id` is not 32 bytes,
    ///   `recipient` is not 20 bytes, or `resource_uri` is empty
    /// - [`IssueError::Signing`] if the key is malformed or signing fails
    pub fn issue(
        &self,
        transaction_id: &[u8],
        recipient: &[u8],
        resource_uri: &str,
        private_key: &[u8],
    ) -> Result<SignedVoucher> {
        let transaction_id = TransactionId::try_from(transaction_id)
            .map_err(|e| IssueError::InvalidInput(e.to_string()))?;
        let recipient =
            Address::try_from(recipient).map_err(|e| IssueError::InvalidInput(e.to_string()))?;
        self.issue_voucher(Voucher::new(transaction_id, recipient, resource_uri), private_key)
    }

    /// Sign an already-built voucher.
    ///
    /// # Errors
    ///
    /// - [`IssueError::InvalidInput`] if `resource_uri` is empty
    /// - [`IssueError::Signing`] if the key is malformed or signing fails
    pub fn issue_voucher(&self, voucher: Voucher, private_key: &[u8]) -> Result<SignedVoucher> {
        if voucher.resource_uri().is_empty() {
            return Err(IssueError::InvalidInput(
                "resource_uri must not be empty".into(),
            ));
        }

        let digest = voucher_digest::<S>(&voucher);
        let signature = S::sign(private_key, &digest)?;

        tracing::debug!(
            scheme = S::NAME,
            transaction_id = %voucher.transaction_id(),
            digest = %hex::encode(digest),
            "voucher issued"
        );

        Ok(SignedVoucher::new(voucher, VoucherSignature::new(signature)))
    }

    /// The identity a verifier should trust for vouchers signed with `private_key`.
    pub fn authority(&self, private_key: &[u8]) -> Result<S::Identity> {
        Ok(S::identity(private_key)?)
    }
}

impl<S: SignatureScheme> Default for VoucherIssuer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for VoucherIssuer<S> {
    fn clone(&self) -> Self {
        Self {
            _scheme: PhantomData,
        }
    }
}

impl<S> std::fmt::Debug for VoucherIssuer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoucherIssuer").finish()
    }
}

/// The digest a verifier recomputes for `voucher` under scheme `S`.
pub fn voucher_digest<S: SignatureScheme>(voucher: &Voucher) -> [u8; 32] {
    S::digest(&encode(voucher))
}

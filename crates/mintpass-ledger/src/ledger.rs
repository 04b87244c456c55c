//! Reference ledger: signature check, then atomic consume-and-mint.

use std::marker::PhantomData;
use std::time::{SystemTime, UNIX_EPOCH};

use mintpass_crypto::SignatureScheme;
use mintpass_issuer::voucher_digest;
use mintpass_types::{Address, MintReceipt, MintStatus, SignedVoucher, TransactionId};

use crate::consumed::{ConsumedSet, MintEntry};
use crate::{LedgerError, Result, Verifier};

/// A ledger that verifies vouchers signed under scheme `S` and records
/// consumed transaction ids in `C`.
///
/// `Ledger` is `Send + Sync`; share it behind an `Arc` to serve concurrent
/// submissions.
pub struct Ledger<S, C> {
    consumed: C,
    _scheme: PhantomData<fn() -> S>,
}

impl<S: SignatureScheme, C: ConsumedSet> Ledger<S, C> {
    pub fn new(consumed: C) -> Self {
        Self {
            consumed,
            _scheme: PhantomData,
        }
    }

    /// Owner of a minted token.
    pub fn owner_of(&self, token_id: u64) -> Result<Option<Address>> {
        Ok(self.consumed.token(token_id)?.map(|record| record.owner))
    }

    /// Resource locator of a minted token.
    pub fn token_uri(&self, token_id: u64) -> Result<Option<String>> {
        Ok(self
            .consumed
            .token(token_id)?
            .map(|record| record.resource_uri))
    }

    /// Whether a transaction id has been consumed, and by which token.
    pub fn status(&self, transaction_id: &TransactionId) -> Result<MintStatus> {
        Ok(match self.consumed.record(transaction_id)? {
            Some(record) => MintStatus::Minted {
                token_id: record.token_id,
            },
            None => MintStatus::Unconsumed,
        })
    }

    /// Number of tokens minted so far.
    pub fn minted_count(&self) -> Result<u64> {
        self.consumed.len()
    }

    pub fn consumed_set(&self) -> &C {
        &self.consumed
    }
}

impl<S: SignatureScheme, C: ConsumedSet> Verifier<S> for Ledger<S, C> {
    fn verify_and_consume(
        &self,
        signed: &SignedVoucher,
        authority: &S::Identity,
    ) -> Result<MintReceipt> {
        let voucher = signed.voucher();
        let digest = verify_signature::<S>(signed, authority).inspect_err(|_| {
            tracing::warn!(
                transaction_id = %voucher.transaction_id(),
                "mint rejected: signature mismatch"
            );
        })?;

        let entry = MintEntry {
            transaction_id: *voucher.transaction_id(),
            owner: *voucher.recipient(),
            resource_uri: voucher.resource_uri().to_string(),
            digest,
            minted_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        };

        match self.consumed.consume(&entry)? {
            Some(record) => {
                tracing::info!(
                    transaction_id = %record.transaction_id,
                    token_id = record.token_id,
                    owner = %record.owner,
                    "voucher consumed, token minted"
                );
                Ok(MintReceipt { record, digest })
            }
            None => {
                tracing::warn!(
                    transaction_id = %entry.transaction_id,
                    "mint rejected: transaction id already consumed"
                );
                Err(LedgerError::Replay {
                    transaction_id: entry.transaction_id,
                })
            }
        }
    }
}

/// Recompute the voucher digest and check the signature against `authority`.
///
/// Returns the digest on success. Does not touch any consumed set.
///
/// # Errors
///
/// - [`LedgerError::SignatureMismatch`] for any verification failure,
///   including a signature of the wrong length
pub fn verify_signature<S: SignatureScheme>(
    signed: &SignedVoucher,
    authority: &S::Identity,
) -> Result<[u8; 32]> {
    let digest = voucher_digest::<S>(signed.voucher());
    S::verify(authority, &digest, signed.signature().as_bytes())
        .map_err(|_| LedgerError::SignatureMismatch)?;
    Ok(digest)
}

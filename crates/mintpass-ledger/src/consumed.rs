//! The consumed-transaction-id set.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use mintpass_types::{Address, MintRecord, TransactionId};

use crate::{LedgerError, Result};

/// A mint waiting to be recorded.
#[derive(Clone, Debug)]
pub struct MintEntry {
    pub transaction_id: TransactionId,
    pub owner: Address,
    pub resource_uri: String,
    pub digest: [u8; 32],
    /// Unix epoch seconds.
    pub minted_at: u64,
}

/// Atomic set of consumed transaction ids together with the mints they authorized.
///
/// [`consume`](ConsumedSet::consume) is the single critical section of the
/// protocol and must be linearizable: a given transaction id is accepted by
/// at most one call, ever.
pub trait ConsumedSet: Send + Sync {
    /// Consume `entry.transaction_id` and record the mint.
    ///
    /// Returns the new record with its assigned token id, or `None` if the
    /// transaction id was already consumed (nothing is written in that case).
    fn consume(&self, entry: &MintEntry) -> Result<Option<MintRecord>>;

    /// Whether the transaction id has been consumed.
    fn contains(&self, transaction_id: &TransactionId) -> Result<bool> {
        Ok(self.record(transaction_id)?.is_some())
    }

    /// The mint that consumed a transaction id.
    fn record(&self, transaction_id: &TransactionId) -> Result<Option<MintRecord>>;

    /// The mint with the given token id.
    fn token(&self, token_id: u64) -> Result<Option<MintRecord>>;

    /// Number of consumed transaction ids.
    fn len(&self) -> Result<u64>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory consumed set guarded by a single mutex.
///
/// Token ids start at 1 and are assigned under the same lock as the
/// membership check.
#[derive(Debug, Default)]
pub struct MemoryConsumedSet {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    by_transaction: HashMap<TransactionId, u64>,
    tokens: Vec<MintRecord>,
}

impl MemoryConsumedSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::Storage("consumed set lock poisoned".into()))
    }
}

impl ConsumedSet for MemoryConsumedSet {
    fn consume(&self, entry: &MintEntry) -> Result<Option<MintRecord>> {
        let mut inner = self.lock()?;
        if inner.by_transaction.contains_key(&entry.transaction_id) {
            return Ok(None);
        }

        let token_id = inner.tokens.len() as u64 + 1;
        let record = MintRecord {
            token_id,
            transaction_id: entry.transaction_id,
            owner: entry.owner,
            resource_uri: entry.resource_uri.clone(),
            minted_at: entry.minted_at,
        };
        inner.by_transaction.insert(entry.transaction_id, token_id);
        inner.tokens.push(record.clone());

        tracing::debug!(
            transaction_id = %entry.transaction_id,
            token_id,
            "transaction id consumed"
        );
        Ok(Some(record))
    }

    fn record(&self, transaction_id: &TransactionId) -> Result<Option<MintRecord>> {
        let inner = self.lock()?;
        Ok(inner
            .by_transaction
            .get(transaction_id)
            .and_then(|&token_id| token_at(&inner.tokens, token_id))
            .cloned())
    }

    fn token(&self, token_id: u64) -> Result<Option<MintRecord>> {
        let inner = self.lock()?;
        Ok(token_at(&inner.tokens, token_id).cloned())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.lock()?.tokens.len() as u64)
    }
}

fn token_at(tokens: &[MintRecord], token_id: u64) -> Option<&MintRecord> {
    let index = usize::try_from(token_id).ok()?.checked_sub(1)?;
    tokens.get(index)
}

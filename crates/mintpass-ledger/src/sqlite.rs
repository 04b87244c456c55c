//! SQLite-backed consumed set.
//!
//! Survives restarts and can be shared by several processes through one
//! database file. Uniqueness is enforced by the `UNIQUE` constraint on
//! `minted_tokens.transaction_id`, not by the in-process mutex, so two
//! processes racing on the same id still resolve to one mint.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use mintpass_db::queries::minted::{self, NewMint};
use mintpass_types::{MintRecord, TransactionId};
use rusqlite::Connection;

use crate::consumed::{ConsumedSet, MintEntry};
use crate::{LedgerError, Result};

/// Consumed set stored in the `minted_tokens` table.
#[derive(Debug)]
pub struct SqliteConsumedSet {
    conn: Mutex<Connection>,
}

impl SqliteConsumedSet {
    /// Open or create the ledger database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_connection(mintpass_db::open(path)?))
    }

    /// Open a private in-memory database.
    pub fn open_memory() -> Result<Self> {
        Ok(Self::from_connection(mintpass_db::open_memory()?))
    }

    /// Wrap an already-migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| LedgerError::Storage("database connection lock poisoned".into()))
    }
}

impl ConsumedSet for SqliteConsumedSet {
    fn consume(&self, entry: &MintEntry) -> Result<Option<MintRecord>> {
        let conn = self.conn()?;
        let token_id = minted::insert_if_absent(
            &conn,
            &NewMint {
                transaction_id: &entry.transaction_id,
                owner: &entry.owner,
                resource_uri: &entry.resource_uri,
                digest: &entry.digest,
                minted_at: entry.minted_at,
            },
        )?;

        Ok(token_id.map(|token_id| {
            tracing::debug!(
                transaction_id = %entry.transaction_id,
                token_id,
                "transaction id consumed"
            );
            MintRecord {
                token_id,
                transaction_id: entry.transaction_id,
                owner: entry.owner,
                resource_uri: entry.resource_uri.clone(),
                minted_at: entry.minted_at,
            }
        }))
    }

    fn record(&self, transaction_id: &TransactionId) -> Result<Option<MintRecord>> {
        Ok(minted::by_transaction(&*self.conn()?, transaction_id)?)
    }

    fn token(&self, token_id: u64) -> Result<Option<MintRecord>> {
        Ok(minted::by_token(&*self.conn()?, token_id)?)
    }

    fn len(&self) -> Result<u64> {
        Ok(minted::count(&*self.conn()?)?)
    }
}

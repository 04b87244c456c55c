//! Minted token queries.

use mintpass_types::{Address, MintRecord, TransactionId};
use rusqlite::{Connection, OptionalExtension};

use crate::{DbError, Result};

/// A mint about to be recorded.
#[derive(Debug)]
pub struct NewMint<'a> {
    pub transaction_id: &'a TransactionId,
    pub owner: &'a Address,
    pub resource_uri: &'a str,
    pub digest: &'a [u8; 32],
    pub minted_at: u64,
}

/// Record a mint unless its transaction id is already present.
///
/// Returns the assigned token id, or `None` if the id was already consumed.
/// The check and the insert are a single statement, so concurrent writers on
/// the same database file cannot both succeed for one id.
pub fn insert_if_absent(conn: &Connection, mint: &NewMint<'_>) -> Result<Option<u64>> {
    let inserted = conn.execute(
        "INSERT INTO minted_tokens (transaction_id, owner, resource_uri, digest, minted_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(transaction_id) DO NOTHING",
        rusqlite::params![
            mint.transaction_id.as_bytes().as_slice(),
            mint.owner.as_bytes().as_slice(),
            mint.resource_uri,
            mint.digest.as_slice(),
            mint.minted_at as i64,
        ],
    )?;
    if inserted == 0 {
        return Ok(None);
    }
    Ok(Some(conn.last_insert_rowid() as u64))
}

/// Look up the mint that consumed a transaction id.
pub fn by_transaction(conn: &Connection, transaction_id: &TransactionId) -> Result<Option<MintRecord>> {
    conn.query_row(
        "SELECT token_id, transaction_id, owner, resource_uri, minted_at
         FROM minted_tokens WHERE transaction_id = ?1",
        [transaction_id.as_bytes().as_slice()],
        RawRow::read,
    )
    .optional()?
    .map(RawRow::into_record)
    .transpose()
}

/// Look up a mint by token id.
pub fn by_token(conn: &Connection, token_id: u64) -> Result<Option<MintRecord>> {
    conn.query_row(
        "SELECT token_id, transaction_id, owner, resource_uri, minted_at
         FROM minted_tokens WHERE token_id = ?1",
        [token_id as i64],
        RawRow::read,
    )
    .optional()?
    .map(RawRow::into_record)
    .transpose()
}

/// Number of minted tokens.
pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM minted_tokens", [], |row| row.get(0))?;
    Ok(count as u64)
}

/// A row as stored, before width checks.
struct RawRow {
    token_id: i64,
    transaction_id: Vec<u8>,
    owner: Vec<u8>,
    resource_uri: String,
    minted_at: i64,
}

impl RawRow {
    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            token_id: row.get(0)?,
            transaction_id: row.get(1)?,
            owner: row.get(2)?,
            resource_uri: row.get(3)?,
            minted_at: row.get(4)?,
        })
    }

    fn into_record(self) -> Result<MintRecord> {
        Ok(MintRecord {
            token_id: self.token_id as u64,
            transaction_id: TransactionId::try_from(self.transaction_id.as_slice())
                .map_err(|e| DbError::Corrupt(e.to_string()))?,
            owner: Address::try_from(self.owner.as_slice())
                .map_err(|e| DbError::Corrupt(e.to_string()))?,
            resource_uri: self.resource_uri,
            minted_at: self.minted_at as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Connection {
        crate::open_memory().expect("open test db")
    }

    fn mint<'a>(id: &'a TransactionId, owner: &'a Address) -> NewMint<'a> {
        NewMint {
            transaction_id: id,
            owner,
            resource_uri: "https://example.test/1",
            digest: &[0x55; 32],
            minted_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_insert_assigns_sequential_token_ids() {
        let conn = test_db();
        let owner = Address::new([0x0A; 20]);
        let first = TransactionId::from_u64(1);
        let second = TransactionId::from_u64(2);
        assert_eq!(insert_if_absent(&conn, &mint(&first, &owner)).expect("insert"), Some(1));
        assert_eq!(insert_if_absent(&conn, &mint(&second, &owner)).expect("insert"), Some(2));
        assert_eq!(count(&conn).expect("count"), 2);
    }

    #[test]
    fn test_duplicate_transaction_id_not_inserted() {
        let conn = test_db();
        let owner = Address::new([0x0A; 20]);
        let id = TransactionId::from_u64(1);
        insert_if_absent(&conn, &mint(&id, &owner)).expect("first");

        let other_owner = Address::new([0x0B; 20]);
        assert_eq!(
            insert_if_absent(&conn, &mint(&id, &other_owner)).expect("second"),
            None
        );
        assert_eq!(count(&conn).expect("count"), 1);

        let stored = by_transaction(&conn, &id).expect("query").expect("present");
        assert_eq!(stored.owner, owner);
    }

    #[test]
    fn test_lookup_by_token() {
        let conn = test_db();
        let owner = Address::new([0x0A; 20]);
        let id = TransactionId::from_u64(42);
        let token_id = insert_if_absent(&conn, &mint(&id, &owner))
            .expect("insert")
            .expect("new");

        let record = by_token(&conn, token_id).expect("query").expect("present");
        assert_eq!(record.transaction_id, id);
        assert_eq!(record.resource_uri, "https://example.test/1");
        assert_eq!(record.minted_at, 1_700_000_000);
        assert!(by_token(&conn, token_id + 1).expect("query").is_none());
    }

    #[test]
    fn test_unknown_transaction_id() {
        let conn = test_db();
        assert!(by_transaction(&conn, &TransactionId::from_u64(9))
            .expect("query")
            .is_none());
    }
}

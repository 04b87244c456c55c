//! SQL schema definitions.

/// Complete schema for the v1 ledger database.
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS minted_tokens (
    token_id INTEGER PRIMARY KEY AUTOINCREMENT,
    transaction_id BLOB NOT NULL UNIQUE CHECK (length(transaction_id) = 32),
    owner BLOB NOT NULL CHECK (length(owner) = 20),
    resource_uri TEXT NOT NULL,
    digest BLOB NOT NULL CHECK (length(digest) = 32),
    minted_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_minted_tokens_owner ON minted_tokens(owner);
"#;

//! Records produced when a ledger consumes a voucher.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{Address, TransactionId};

/// A minted asset as stored by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    /// Sequential token identifier, starting at 1.
    pub token_id: u64,
    /// The consumed voucher identifier.
    pub transaction_id: TransactionId,
    /// Owner of the minted asset.
    pub owner: Address,
    /// Metadata locator for the asset.
    pub resource_uri: String,
    /// Unix epoch seconds.
    pub minted_at: u64,
}

/// Proof of a successful mint returned to the submitter.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    #[serde(flatten)]
    pub record: MintRecord,
    /// Voucher digest the signature was verified against.
    #[serde_as(as = "serde_with::hex::Hex")]
    pub digest: [u8; 32],
}

/// Consumption state of a transaction identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MintStatus {
    /// Never consumed; a voucher carrying this id may still mint.
    Unconsumed,
    /// Consumed by the given token. Terminal.
    Minted { token_id: u64 },
}

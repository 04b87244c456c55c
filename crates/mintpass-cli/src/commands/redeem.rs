//! Verifier-side commands.
//!
//! `verify` is read-only. `mint` and `status` open the SQLite ledger at the
//! configured path, or at `--db` when given.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use mintpass_crypto::SignatureScheme;
use mintpass_ledger::{verify_signature, Ledger, SqliteConsumedSet, Verifier};
use mintpass_types::TransactionId;
use serde::Serialize;

use super::{parse_authority, print_json, read_voucher};
use crate::config::MintpassConfig;

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Path to a signed voucher JSON file.
    #[arg(long)]
    pub voucher: PathBuf,

    /// Trusted authority identity, hex-encoded.
    #[arg(long)]
    pub authority: String,
}

#[derive(Debug, Args)]
pub struct MintArgs {
    /// Path to a signed voucher JSON file.
    #[arg(long)]
    pub voucher: PathBuf,

    /// Trusted authority identity, hex-encoded.
    #[arg(long)]
    pub authority: String,

    /// Ledger database. Overrides the configured path.
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Transaction id as 32 hex-encoded bytes.
    #[arg(long)]
    pub tx_id: String,

    /// Ledger database. Overrides the configured path.
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Serialize)]
struct VerifyOutput {
    valid: bool,
    transaction_id: TransactionId,
    digest: String,
}

pub fn verify<S: SignatureScheme>(args: &VerifyArgs) -> anyhow::Result<()> {
    let authority = parse_authority::<S>(&args.authority)?;
    let signed = read_voucher(&args.voucher)?;
    let digest = verify_signature::<S>(&signed, &authority)?;

    print_json(&VerifyOutput {
        valid: true,
        transaction_id: *signed.voucher().transaction_id(),
        digest: hex::encode(digest),
    })
}

pub fn mint<S: SignatureScheme>(args: &MintArgs, config: &MintpassConfig) -> anyhow::Result<()> {
    let authority = parse_authority::<S>(&args.authority)?;
    let signed = read_voucher(&args.voucher)?;
    let ledger = open_ledger::<S>(args.db.as_deref(), config)?;

    let receipt = ledger.verify_and_consume(&signed, &authority)?;
    print_json(&receipt)
}

pub fn status<S: SignatureScheme>(args: &StatusArgs, config: &MintpassConfig) -> anyhow::Result<()> {
    let transaction_id = TransactionId::from_hex(&args.tx_id)?;
    let ledger = open_ledger::<S>(args.db.as_deref(), config)?;
    print_json(&ledger.status(&transaction_id)?)
}

fn open_ledger<S: SignatureScheme>(
    db: Option<&Path>,
    config: &MintpassConfig,
) -> anyhow::Result<Ledger<S, SqliteConsumedSet>> {
    let path = db.map(Path::to_path_buf).unwrap_or_else(|| config.db_path());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tracing::debug!(path = %path.display(), "opening ledger");
    let consumed = SqliteConsumedSet::open(&path)
        .with_context(|| format!("failed to open ledger {}", path.display()))?;
    Ok(Ledger::new(consumed))
}

//! Authority-side commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use mintpass_crypto::SignatureScheme;
use mintpass_issuer::VoucherIssuer;
use mintpass_types::{Address, TransactionId, Voucher};
use serde::Serialize;

use super::{load_key, print_json};
use crate::config::MintpassConfig;

#[derive(Debug, Args)]
pub struct IssueArgs {
    /// Transaction id as 32 hex-encoded bytes. Must never have been used before.
    #[arg(long, conflicts_with = "tx_label", required_unless_present = "tx_label")]
    pub tx_id: Option<String>,

    /// Short text label (at most 31 bytes) right-padded into a transaction id.
    #[arg(long)]
    pub tx_label: Option<String>,

    /// Recipient address as 20 hex-encoded bytes.
    #[arg(long)]
    pub recipient: String,

    /// Resource locator for the minted asset's metadata.
    #[arg(long)]
    pub uri: String,

    /// Write the signed voucher to this file instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Serialize)]
struct IdentityOutput {
    scheme: &'static str,
    authority: String,
}

/// Print the identity verifiers must trust for the injected key.
pub fn identity<S: SignatureScheme>(config: &MintpassConfig) -> anyhow::Result<()> {
    let key = load_key(config)?;
    let identity = S::identity(key.expose())?;
    drop(key);

    print_json(&IdentityOutput {
        scheme: S::NAME,
        authority: format!("0x{}", hex::encode(S::identity_bytes(&identity))),
    })
}

/// Build, sign and emit a voucher.
pub fn issue<S: SignatureScheme>(args: &IssueArgs, config: &MintpassConfig) -> anyhow::Result<()> {
    let transaction_id = match (&args.tx_id, &args.tx_label) {
        (Some(hex), _) => TransactionId::from_hex(hex)?,
        (None, Some(label)) => TransactionId::from_label(label)?,
        (None, None) => anyhow::bail!("one of --tx-id or --tx-label is required"),
    };
    let recipient = Address::from_hex(&args.recipient)?;
    let voucher = Voucher::new(transaction_id, recipient, &args.uri);

    let key = load_key(config)?;
    let signed = VoucherIssuer::<S>::new().issue_voucher(voucher, key.expose())?;
    drop(key);

    tracing::info!(
        scheme = S::NAME,
        transaction_id = %transaction_id,
        recipient = %recipient,
        "voucher signed"
    );

    match &args.out {
        Some(path) => {
            let json = serde_json::to_string_pretty(&signed)?;
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(())
        }
        None => print_json(&signed),
    }
}

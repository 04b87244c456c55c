//! Command handlers.
//!
//! - [`issue`] — Authority-side commands (`identity`, `issue`)
//! - [`redeem`] — Verifier-side commands (`verify`, `mint`, `status`)

pub mod issue;
pub mod redeem;

use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use mintpass_crypto::{SecretKey, SignatureScheme};
use mintpass_types::SignedVoucher;
use serde::Serialize;

use crate::config::MintpassConfig;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the authority identity controlled by the injected key.
    Identity,
    /// Issue and sign a voucher.
    Issue(issue::IssueArgs),
    /// Check a signed voucher's signature without consuming it.
    Verify(redeem::VerifyArgs),
    /// Verify a signed voucher and consume it against the local ledger.
    Mint(redeem::MintArgs),
    /// Show whether a transaction id has been consumed.
    Status(redeem::StatusArgs),
}

/// Run a command under scheme `S`.
pub fn run<S: SignatureScheme>(command: Command, config: &MintpassConfig) -> anyhow::Result<()> {
    match command {
        Command::Identity => issue::identity::<S>(config),
        Command::Issue(args) => issue::issue::<S>(&args, config),
        Command::Verify(args) => redeem::verify::<S>(&args),
        Command::Mint(args) => redeem::mint::<S>(&args, config),
        Command::Status(args) => redeem::status::<S>(&args, config),
    }
}

/// Load the authority key from its configured source.
///
/// The returned key is zeroized when the caller drops it.
fn load_key(config: &MintpassConfig) -> anyhow::Result<SecretKey> {
    let authority = &config.authority;
    let key = if authority.key_file.is_empty() {
        SecretKey::from_env(&authority.key_env)?
    } else {
        SecretKey::from_file(Path::new(&authority.key_file))?
    };
    Ok(key)
}

/// Parse a hex-encoded authority identity.
fn parse_authority<S: SignatureScheme>(encoded: &str) -> anyhow::Result<S::Identity> {
    let digits = encoded.strip_prefix("0x").unwrap_or(encoded);
    let bytes = hex::decode(digits).context("authority is not valid hex")?;
    Ok(S::parse_identity(&bytes)?)
}

fn read_voucher(path: &Path) -> anyhow::Result<SignedVoucher> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read voucher {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a signed voucher", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! mintpass: issue, verify and redeem signed mint vouchers.
//!
//! The authority key is injected per invocation from an environment variable
//! or a key file and dropped when the command finishes. JSON results go to
//! stdout; logs go to stderr.

mod commands;
mod config;

use std::path::PathBuf;

use clap::Parser;
use mintpass_crypto::{Ed25519Blake3, Eip191Secp256k1, SchemeKind};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::MintpassConfig;

#[derive(Debug, Parser)]
#[command(name = "mintpass", version, about = "Signed single-use mint vouchers")]
struct Cli {
    /// Configuration file. Defaults to $MINTPASS_DATA_DIR/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Signature scheme: eip191-secp256k1 or ed25519-blake3.
    #[arg(long, global = true)]
    scheme: Option<SchemeKind>,

    /// File holding the hex-encoded authority key. Overrides the configured key source.
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = MintpassConfig::load(cli.config.as_deref())?;
    if let Some(scheme) = cli.scheme {
        config.authority.scheme = scheme;
    }
    if let Some(key_file) = cli.key_file {
        config.authority.key_file = key_file.to_string_lossy().into_owned();
    }

    init_tracing(&config.logging.level)?;
    tracing::debug!(scheme = %config.authority.scheme, "configuration loaded");

    match config.authority.scheme {
        SchemeKind::Eip191Secp256k1 => commands::run::<Eip191Secp256k1>(cli.command, &config),
        SchemeKind::Ed25519Blake3 => commands::run::<Ed25519Blake3>(cli.command, &config),
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("mintpass={level}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

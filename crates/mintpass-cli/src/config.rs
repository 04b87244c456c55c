//! Configuration file management.

use std::path::{Path, PathBuf};

use mintpass_crypto::SchemeKind;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MINTPASS_DATA_DIR";

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintpassConfig {
    /// Authority key settings.
    #[serde(default)]
    pub authority: AuthorityConfig,
    /// Ledger storage settings.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the authority key comes from and how it signs.
///
/// The key itself never lives in this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityConfig {
    #[serde(default)]
    pub scheme: SchemeKind,
    /// Environment variable holding the hex-encoded private key.
    #[serde(default = "default_key_env")]
    pub key_env: String,
    /// Path to a file holding the hex-encoded private key. Takes precedence
    /// over `key_env` when set.
    #[serde(default)]
    pub key_file: String,
}

/// Ledger configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// SQLite database path. Empty = $data_dir/ledger.db.
    #[serde(default)]
    pub db_path: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "trace" | "debug" | "info" | "warn" | "error". `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_key_env() -> String {
    "MINTPASS_AUTHORITY_KEY".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::default(),
            key_env: default_key_env(),
            key_file: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl MintpassConfig {
    /// Load configuration from `path`, or from the default location.
    ///
    /// Falls back to defaults if the file does not exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir().join("config.toml"));
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: MintpassConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolved ledger database path.
    pub fn db_path(&self) -> PathBuf {
        if self.ledger.db_path.is_empty() {
            data_dir().join("ledger.db")
        } else {
            PathBuf::from(&self.ledger.db_path)
        }
    }
}

/// Data directory: `$MINTPASS_DATA_DIR`, else `$HOME/.mintpass`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".mintpass"))
        .unwrap_or_else(|_| PathBuf::from(".mintpass"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MintpassConfig::default();
        assert_eq!(config.authority.scheme, SchemeKind::Eip191Secp256k1);
        assert_eq!(config.authority.key_env, "MINTPASS_AUTHORITY_KEY");
        assert!(config.authority.key_file.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = MintpassConfig::default();
        let toml_str = toml::to_string(&config).expect("serialize");
        let parsed: MintpassConfig = toml::from_str(&toml_str).expect("parse");
        assert_eq!(parsed.authority.scheme, config.authority.scheme);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: MintpassConfig = toml::from_str(
            r#"
            [authority]
            scheme = "ed25519-blake3"

            [ledger]
            db_path = "/var/lib/mintpass/ledger.db"
            "#,
        )
        .expect("parse");
        assert_eq!(parsed.authority.scheme, SchemeKind::Ed25519Blake3);
        assert_eq!(parsed.authority.key_env, "MINTPASS_AUTHORITY_KEY");
        assert_eq!(parsed.db_path(), PathBuf::from("/var/lib/mintpass/ledger.db"));
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let result: Result<MintpassConfig, _> = toml::from_str(
            r#"
            [authority]
            scheme = "rsa"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config =
            MintpassConfig::load(Some(&dir.path().join("absent.toml"))).expect("load");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").expect("write");
        let config = MintpassConfig::load(Some(&path)).expect("load");
        assert_eq!(config.logging.level, "debug");
    }
}

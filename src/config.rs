// src/config.rs
//! Configuration — TOML file with env override and built-in dev defaults
//!
//! The config is loaded once at startup and handed to the pipeline by
//! value; in particular the field key ends up owned by the `FieldCipher`,
//! never read from ambient state after construction.

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// Dev-only key — real deployments set `keys.field_key` in the config file.
pub const DEFAULT_FIELD_KEY: &str = "7N9h_wGOukG95KCRwA7y3PHVJqYFCJKJKZgnN2MlQeE=";

pub const DEFAULT_DATABASE_PATH: &str = "transaction_database.db";
pub const DEFAULT_OUTPUT_PATH: &str = "processed_transactions.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub keys: Keys,
    pub paths: Paths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Keys {
    /// base64url-encoded 32-byte AES key for the encrypted record fields
    pub field_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub database: String,
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keys: Keys {
                field_key: DEFAULT_FIELD_KEY.into(),
            },
            paths: Paths {
                database: DEFAULT_DATABASE_PATH.into(),
                output: DEFAULT_OUTPUT_PATH.into(),
            },
        }
    }
}

/// Load config from `LEDGER_ETL_CONFIG` (default `etl-config.toml`),
/// falling back to built-in dev defaults when the file is missing.
pub fn load() -> Result<Config> {
    let config_path =
        std::env::var("LEDGER_ETL_CONFIG").unwrap_or_else(|_| "etl-config.toml".to_string());

    if Path::new(&config_path).exists() {
        let content = std::fs::read_to_string(&config_path)?;
        Ok(toml::from_str(&content)?)
    } else {
        Ok(Config::default())
    }
}

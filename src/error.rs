// src/error.rs
//! Error types for the whole crate
//!
//! Two layers: `EtlError` is fatal and halts the run, `RejectReason` is the
//! per-record outcome the Transformer hands back instead of aborting a batch.

use std::path::PathBuf;
use thiserror::Error;

use crate::cipher::CipherError;

pub type Result<T> = std::result::Result<T, EtlError>;

/// Fatal pipeline errors. Per-file and per-record trouble never reaches
/// this type; it is logged and absorbed at the component that saw it.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("{} is not a valid folder", .0.display())]
    InvalidInputDir(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Cipher setup failed: {0}")]
    Cipher(#[from] CipherError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Output serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single record was dropped. Rejections are logged and counted;
/// sibling records in the same or other batches are unaffected.
#[derive(Error, Debug)]
pub enum RejectReason {
    #[error("missing key in record: `{0}`")]
    MissingField(&'static str),

    #[error("error decrypting `{field}`: {source}")]
    Decryption {
        field: &'static str,
        source: CipherError,
    },

    #[error("decrypted amount `{0}` is not a finite number")]
    AmountParse(String),
}

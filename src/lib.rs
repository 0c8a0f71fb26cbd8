// src/lib.rs
//! ledger-etl — batch ETL for directories of encrypted transaction ledgers
//!
//! Pipeline stages:
//! - Extract: enumerate `.json` ledger files, one batch per file
//! - Transform: decrypt `sender`, `receiver`, `amount` on each record
//! - Load: insert into SQLite, rejecting duplicate transaction IDs
//! - Materialize: write the accepted records as a plaintext JSON artifact
//!
//! Per-file and per-record failures are logged and skipped; only a bad
//! input directory, a store failure, or a failed output write is fatal.

pub mod cipher;
pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod record;
pub mod store;
pub mod transform;

// Re-export everything users need at the crate root
pub use cipher::{CipherError, FieldCipher};
pub use config::{load as load_config, Config};
pub use error::{EtlError, RejectReason, Result};
pub use extract::{FileBatch, LedgerFiles};
pub use load::{load_transactions, write_output, LoadOutcome};
pub use pipeline::{Pipeline, RunSummary, Stage};
pub use record::{RawRecord, Transaction};
pub use store::{InsertOutcome, TransactionStore};
pub use transform::{transform_batch, transform_record, TransformOutcome};

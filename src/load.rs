// src/load.rs
//! Loading — sequential inserts with duplicate triage, plus the output artifact
//!
//! The first record seen with a given `transaction_id` wins; later ones are
//! warned about and dropped. A failed insert drops only that record. The
//! output artifact holds exactly the records accepted in this run, in
//! insertion order, overwriting any previous run's file.

use std::path::Path;

use tracing::{error, info, warn};

use crate::error::Result;
use crate::record::Transaction;
use crate::store::{InsertOutcome, TransactionStore};

#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Records committed to the store this run, in insertion order
    pub accepted: Vec<Transaction>,
    pub duplicates: usize,
    pub failed: usize,
}

/// Insert transactions one at a time.
pub fn load_transactions(
    store: &TransactionStore,
    transactions: Vec<Transaction>,
) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for transaction in transactions {
        match store.insert(&transaction) {
            Ok(InsertOutcome::Accepted) => outcome.accepted.push(transaction),
            Ok(InsertOutcome::DuplicateId) => {
                warn!("duplicate transaction ID: {}", transaction.transaction_id);
                outcome.duplicates += 1;
            }
            Err(err) => {
                error!(
                    "error inserting record {}: {err}",
                    transaction.transaction_id
                );
                outcome.failed += 1;
            }
        }
    }

    outcome
}

/// Write the accepted records as a pretty-printed JSON array.
pub fn write_output(path: &Path, accepted: &[Transaction]) -> Result<()> {
    let json = serde_json::to_string_pretty(accepted)?;
    std::fs::write(path, json)?;
    info!("final processed file saved to: {}", path.display());
    Ok(())
}

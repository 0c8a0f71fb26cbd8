// src/pipeline.rs
//! Orchestration — sequence the stages and report a run summary

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cipher::FieldCipher;
use crate::config::Config;
use crate::error::{EtlError, Result};
use crate::extract::LedgerFiles;
use crate::load::{load_transactions, write_output};
use crate::store::TransactionStore;
use crate::transform::transform_batch;

/// Pipeline stages. Partial failures (bad file, bad record, duplicate) are
/// absorbed inside their stage; `Failed` is reached only from an invalid
/// input directory, a store failure, or a failed output write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Extracting,
    Transforming,
    Loading,
    Materializing,
    Done,
    Failed,
}

/// Counts from one complete run — the human-readable success signal.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_extracted: usize,
    pub files_skipped: usize,
    pub records_decrypted: usize,
    pub records_rejected: usize,
    pub records_accepted: usize,
    pub duplicates: usize,
    pub insert_failures: usize,
    pub output_path: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ETL process completed: {} file(s) extracted, {} skipped",
            self.files_extracted, self.files_skipped
        )?;
        writeln!(
            f,
            "  {} record(s) decrypted, {} rejected",
            self.records_decrypted, self.records_rejected
        )?;
        writeln!(
            f,
            "  {} record(s) loaded, {} duplicate(s), {} insert failure(s)",
            self.records_accepted, self.duplicates, self.insert_failures
        )?;
        write!(f, "Final processed file saved to: {}", self.output_path.display())
    }
}

pub struct Pipeline {
    cipher: FieldCipher,
    database_path: PathBuf,
    output_path: PathBuf,
    stage: Stage,
}

impl Pipeline {
    pub fn new(cipher: FieldCipher, config: &Config) -> Self {
        Self {
            cipher,
            database_path: PathBuf::from(&config.paths.database),
            output_path: PathBuf::from(&config.paths.output),
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the full pipeline over `input_dir`. On a fatal error the stage
    /// is left at `Failed`; rows already inserted stay persisted.
    pub fn run(&mut self, input_dir: &Path) -> Result<RunSummary> {
        match self.execute(input_dir) {
            Ok(summary) => {
                self.stage = Stage::Done;
                Ok(summary)
            }
            Err(err) => {
                self.stage = Stage::Failed;
                Err(err)
            }
        }
    }

    fn execute(&mut self, input_dir: &Path) -> Result<RunSummary> {
        if !input_dir.is_dir() {
            return Err(EtlError::InvalidInputDir(input_dir.to_path_buf()));
        }

        let mut summary = RunSummary {
            output_path: self.output_path.clone(),
            ..RunSummary::default()
        };

        self.stage = Stage::Extracting;
        info!("extracting data from {}", input_dir.display());
        let mut files = LedgerFiles::open(input_dir)?;
        let mut batches = Vec::new();
        for batch in &mut files {
            batches.push(batch);
        }
        summary.files_extracted = files.files_extracted();
        summary.files_skipped = files.files_skipped();

        self.stage = Stage::Transforming;
        info!("decrypting {} batch(es)", batches.len());
        let mut transactions = Vec::new();
        for batch in &batches {
            let outcome = transform_batch(&self.cipher, &batch.records);
            summary.records_rejected += outcome.rejected;
            transactions.extend(outcome.transactions);
        }
        summary.records_decrypted = transactions.len();

        self.stage = Stage::Loading;
        info!("loading {} record(s) into the database", transactions.len());
        let store = TransactionStore::open(&self.database_path)?;
        let outcome = load_transactions(&store, transactions);
        store.close()?;
        summary.records_accepted = outcome.accepted.len();
        summary.duplicates = outcome.duplicates;
        summary.insert_failures = outcome.failed;

        self.stage = Stage::Materializing;
        write_output(&self.output_path, &outcome.accepted)?;

        Ok(summary)
    }
}

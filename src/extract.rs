// src/extract.rs
//! Extraction — enumerate a ledger directory, one batch per `.json` file
//!
//! Files that fail to read or parse are logged and skipped; a bad file
//! never stops the sweep. Directory order is platform-dependent, so the
//! paths are sorted up front to make the traversal (and therefore the
//! first-insert-wins duplicate tie-break) deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::record::{parse_batch, RawRecord};

/// File extension treated as a ledger file
pub const LEDGER_EXTENSION: &str = "json";

/// The records extracted from one input file.
#[derive(Debug)]
pub struct FileBatch {
    pub file_name: String,
    pub records: Vec<RawRecord>,
}

/// Lazy, single-pass iterator over a ledger directory's batches.
pub struct LedgerFiles {
    paths: std::vec::IntoIter<PathBuf>,
    files_extracted: usize,
    files_skipped: usize,
}

impl LedgerFiles {
    /// Snapshot the directory listing. The caller is responsible for having
    /// verified that `dir` exists and is a directory.
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension().and_then(|ext| ext.to_str()) == Some(LEDGER_EXTENSION)
            })
            .collect();
        paths.sort();

        Ok(Self {
            paths: paths.into_iter(),
            files_extracted: 0,
            files_skipped: 0,
        })
    }

    /// Files successfully parsed so far.
    pub fn files_extracted(&self) -> usize {
        self.files_extracted
    }

    /// Files skipped because of a read or parse failure so far.
    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }
}

impl Iterator for LedgerFiles {
    type Item = FileBatch;

    fn next(&mut self) -> Option<FileBatch> {
        loop {
            let path = self.paths.next()?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    error!("error reading file {file_name}: {err}");
                    self.files_skipped += 1;
                    continue;
                }
            };

            match parse_batch(&content) {
                Ok(records) => {
                    info!("successfully extracted: {file_name}");
                    self.files_extracted += 1;
                    return Some(FileBatch { file_name, records });
                }
                Err(err) => {
                    error!("error parsing file {file_name}: {err}");
                    self.files_skipped += 1;
                }
            }
        }
    }
}

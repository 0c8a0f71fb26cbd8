// src/store.rs
//! SQLite store adapter for decrypted transactions
//!
//! The `transaction_id` UNIQUE constraint is the deduplication mechanism:
//! a constraint violation on insert is a normal `DuplicateId` outcome, not
//! an error. Inserts run in autocommit mode, so anything inserted before a
//! later failure stays persisted.

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode};

use crate::error::Result;
use crate::record::Transaction;

/// Outcome of a single insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Accepted,
    DuplicateId,
}

pub struct TransactionStore {
    conn: Connection,
}

impl TransactionStore {
    /// Open (creating if absent) the store at `path` and ensure the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path.as_ref())?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// In-memory store, mainly for tests and tooling.
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the table and indexes if absent. Safe to call on every run.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS Transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                transaction_id TEXT UNIQUE,
                sender TEXT,
                receiver TEXT,
                amount REAL,
                timestamp TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_transaction_id ON Transactions (transaction_id);
            CREATE INDEX IF NOT EXISTS idx_sender ON Transactions (sender);
            CREATE INDEX IF NOT EXISTS idx_receiver ON Transactions (receiver);
            "#,
        )?;
        Ok(())
    }

    /// Attempt to insert one transaction. A violation of the
    /// `transaction_id` uniqueness constraint yields `DuplicateId`; any
    /// other failure is returned to the caller to triage.
    pub fn insert(&self, transaction: &Transaction) -> Result<InsertOutcome> {
        let result = self.conn.execute(
            "INSERT INTO Transactions (transaction_id, sender, receiver, amount, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                transaction.transaction_id,
                transaction.sender,
                transaction.receiver,
                transaction.amount,
                transaction.timestamp,
            ],
        );

        match result {
            Ok(_) => Ok(InsertOutcome::Accepted),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Ok(InsertOutcome::DuplicateId)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Indexed lookup by transaction ID.
    pub fn find(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT transaction_id, sender, receiver, amount, timestamp
             FROM Transactions WHERE transaction_id = ?1",
        )?;
        let mut rows = stmt.query_map([transaction_id], row_to_transaction)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Indexed lookup of every transaction sent by `sender`, oldest row first.
    pub fn find_by_sender(&self, sender: &str) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT transaction_id, sender, receiver, amount, timestamp
             FROM Transactions WHERE sender = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([sender], row_to_transaction)?;
        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?);
        }
        Ok(transactions)
    }

    /// Total row count.
    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM Transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Explicitly release the connection. Dropping the store releases it
    /// too; this variant surfaces a failed final commit as an error.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_conn, err)| err.into())
    }
}

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        transaction_id: row.get(0)?,
        sender: row.get(1)?,
        receiver: row.get(2)?,
        amount: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

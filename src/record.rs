// src/record.rs
//! Record shapes on both sides of the transform boundary

use serde::{Deserialize, Serialize};

/// One record as it appears in a ledger file, before any validation.
/// Every field is optional here; the Transformer is the single place that
/// requires them all, so a missing key rejects one record — not the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub transaction_id: Option<String>,
    /// ciphertext token
    pub sender: Option<String>,
    /// ciphertext token
    pub receiver: Option<String>,
    /// ciphertext token; decrypts to a decimal string
    pub amount: Option<String>,
    pub timestamp: Option<String>,
}

// A ledger file holds either a single record object or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchShape {
    Many(Vec<RawRecord>),
    One(RawRecord),
}

/// Parse one file's content into a batch of raw records.
pub fn parse_batch(content: &str) -> std::result::Result<Vec<RawRecord>, serde_json::Error> {
    Ok(match serde_json::from_str::<BatchShape>(content)? {
        BatchShape::Many(records) => records,
        BatchShape::One(record) => vec![record],
    })
}

/// The canonical decrypted transaction. Built once by the Transformer,
/// immutable afterwards; either persisted and written to the output
/// artifact, or dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
    pub timestamp: String,
}

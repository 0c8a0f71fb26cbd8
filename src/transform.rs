// src/transform.rs
//! Transformation — decrypt raw records into canonical transactions
//!
//! All five keys must be present, three of them must decrypt, and the
//! decrypted amount must parse as a finite number. Each rejection is scoped
//! to its own record.

use tracing::error;

use crate::cipher::FieldCipher;
use crate::error::RejectReason;
use crate::record::{RawRecord, Transaction};

fn require<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, RejectReason> {
    value.as_deref().ok_or(RejectReason::MissingField(field))
}

fn decrypt_field(
    cipher: &FieldCipher,
    token: &str,
    field: &'static str,
) -> Result<String, RejectReason> {
    cipher
        .decrypt(token)
        .map_err(|source| RejectReason::Decryption { field, source })
}

/// Decrypt one raw record into a `Transaction`, or reject it.
///
/// `transaction_id` and `timestamp` pass through verbatim; `sender`,
/// `receiver` and `amount` are decrypted. Negative and zero amounts are
/// accepted — only non-finite or non-numeric amounts reject.
pub fn transform_record(
    cipher: &FieldCipher,
    raw: &RawRecord,
) -> Result<Transaction, RejectReason> {
    let transaction_id = require(&raw.transaction_id, "transaction_id")?.to_owned();
    let sender_token = require(&raw.sender, "sender")?;
    let receiver_token = require(&raw.receiver, "receiver")?;
    let amount_token = require(&raw.amount, "amount")?;
    let timestamp = require(&raw.timestamp, "timestamp")?.to_owned();

    let sender = decrypt_field(cipher, sender_token, "sender")?;
    let receiver = decrypt_field(cipher, receiver_token, "receiver")?;
    let amount_plain = decrypt_field(cipher, amount_token, "amount")?;

    let amount: f64 = amount_plain
        .trim()
        .parse()
        .map_err(|_| RejectReason::AmountParse(amount_plain.clone()))?;
    if !amount.is_finite() {
        return Err(RejectReason::AmountParse(amount_plain));
    }

    Ok(Transaction {
        transaction_id,
        sender,
        receiver,
        amount,
        timestamp,
    })
}

#[derive(Debug, Default)]
pub struct TransformOutcome {
    pub transactions: Vec<Transaction>,
    pub rejected: usize,
}

/// Transform a whole batch; rejected records are logged and counted, and
/// never affect their siblings.
pub fn transform_batch(cipher: &FieldCipher, records: &[RawRecord]) -> TransformOutcome {
    let mut outcome = TransformOutcome {
        transactions: Vec::with_capacity(records.len()),
        rejected: 0,
    };

    for raw in records {
        match transform_record(cipher, raw) {
            Ok(transaction) => outcome.transactions.push(transaction),
            Err(reason) => {
                error!("rejected record: {reason}");
                outcome.rejected += 1;
            }
        }
    }

    outcome
}

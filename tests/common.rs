// tests/common.rs
//! Shared test fixtures — a temp ledger directory wired to an ETL config

use std::fs;
use std::path::PathBuf;

use ledger_etl::config::{Config, Keys, Paths};
use ledger_etl::{FieldCipher, Pipeline};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Fixed key for deterministic fixtures (base64url, 32 bytes)
pub const TEST_KEY: &str = "N_g-0sQH_C1onBjYJ3A8cyWKtVk_Z9B3OX5OpdrV0UA=";

/// A key that differs from `TEST_KEY` in its first byte
#[allow(dead_code)]
pub const WRONG_KEY: &str = "M_g-0sQH_C1onBjYJ3A8cyWKtVk_Z9B3OX5OpdrV0UA=";

/// Temp workspace: a ledger directory, a database path and an output path,
/// all isolated per test.
#[allow(dead_code)] // Not every suite builds the full fixture
pub struct TestLedger {
    dir: TempDir,
    pub cipher: FieldCipher,
}

#[allow(dead_code)] // Each suite uses the helpers it needs
impl TestLedger {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        fs::create_dir_all(dir.path().join("ledger")).expect("create ledger dir");
        let cipher = FieldCipher::from_base64_key(TEST_KEY).expect("test key");
        Self { dir, cipher }
    }

    pub fn ledger_dir(&self) -> PathBuf {
        self.dir.path().join("ledger")
    }

    pub fn database_path(&self) -> PathBuf {
        self.dir.path().join("transaction_database.db")
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("processed_transactions.json")
    }

    pub fn config(&self) -> Config {
        Config {
            keys: Keys {
                field_key: TEST_KEY.into(),
            },
            paths: Paths {
                database: self.database_path().to_string_lossy().into_owned(),
                output: self.output_path().to_string_lossy().into_owned(),
            },
        }
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.cipher.clone(), &self.config())
    }

    /// A well-formed record with its three sensitive fields encrypted.
    pub fn encrypted_record(
        &self,
        id: &str,
        sender: &str,
        receiver: &str,
        amount: &str,
        timestamp: &str,
    ) -> Value {
        json!({
            "transaction_id": id,
            "sender": self.cipher.encrypt(sender).expect("encrypt sender"),
            "receiver": self.cipher.encrypt(receiver).expect("encrypt receiver"),
            "amount": self.cipher.encrypt(amount).expect("encrypt amount"),
            "timestamp": timestamp,
        })
    }

    pub fn write_file(&self, name: &str, value: &Value) {
        fs::write(
            self.ledger_dir().join(name),
            serde_json::to_string_pretty(value).expect("serialize fixture"),
        )
        .expect("write ledger file");
    }

    pub fn write_raw(&self, name: &str, content: &str) {
        fs::write(self.ledger_dir().join(name), content).expect("write ledger file");
    }

    /// Read the output artifact back as a JSON value.
    pub fn read_output(&self) -> Value {
        let content = fs::read_to_string(self.output_path()).expect("read output artifact");
        serde_json::from_str(&content).expect("output artifact is JSON")
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}

// src/bin/ledger_etl.rs
//! CLI entry point — run the ETL pipeline over one ledger directory

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use ledger_etl::{load_config, FieldCipher, Pipeline};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let input_dir: PathBuf = std::env::args_os()
        .nth(1)
        .context("usage: ledger-etl <folder-with-json-ledgers>")?
        .into();

    // Precondition: must halt before any processing begins
    if !input_dir.is_dir() {
        bail!("Error: {} is not a valid folder", input_dir.display());
    }

    let config = load_config().context("failed to load configuration")?;
    let cipher = FieldCipher::from_base64_key(&config.keys.field_key)
        .context("invalid `keys.field_key` in configuration")?;

    let mut pipeline = Pipeline::new(cipher, &config);
    let summary = pipeline.run(&input_dir)?;

    println!("{summary}");
    Ok(())
}

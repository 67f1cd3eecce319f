use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::wprintln;
use crate::storage::engine::RecoveredStore;
use crate::storage::sqlite::{BlobEncoding, SqliteItemTableExtractor};
use crate::LsrError;

/// Options for the `lsrec sqlite` subcommand.
pub struct SqliteOptions {
    /// Path to the store file.
    pub file: String,
    /// Blob decoding policy.
    pub encoding: BlobEncoding,
    /// Emit output as JSON.
    pub json: bool,
}

/// Top-level JSON output for the ItemTable extraction.
#[derive(Serialize)]
struct SqliteReport<'a> {
    file: &'a str,
    encoding: BlobEncoding,
    entry_count: usize,
    entries: &'a RecoveredStore,
}

pub fn execute(opts: &SqliteOptions, writer: &mut dyn Write) -> Result<(), LsrError> {
    let extractor = SqliteItemTableExtractor::open_with_encoding(&opts.file, opts.encoding)?;
    let store = extractor.read_all()?;

    if opts.json {
        let report = SqliteReport {
            file: &opts.file,
            encoding: opts.encoding,
            entry_count: store.len(),
            entries: &store,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| LsrError::Parse(format!("JSON serialization failed: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(writer, "Store: {}", opts.file.bold())?;
    wprintln!(writer)?;
    for (key, value) in store.iter() {
        wprintln!(writer, "  {} = {}", key.cyan(), value)?;
    }
    wprintln!(writer)?;
    wprintln!(
        writer,
        "Extracted {} row(s)",
        store.len().to_string().green()
    )?;
    Ok(())
}

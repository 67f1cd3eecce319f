use std::io::Write;
use std::path::Path;

use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

use crate::cli::{create_progress_bar, wprintln};
use crate::storage::engine::{LogRecoveryEngine, RecoveredStore, RecoveryProvider};
use crate::storage::locator::OriginPrefix;
use crate::storage::selector::StoreLayout;
use crate::storage::sqlite::SqliteItemTableExtractor;
use crate::util::fs::read_file;
use crate::LsrError;

/// Options for the `lsrec recover` subcommand.
pub struct RecoverOptions {
    /// Path to the legacy store directory.
    pub store: String,
    /// Origin whose keys to recover.
    pub origin: String,
    /// Restrict recovery to these keys (targeted mode).
    pub keys: Option<Vec<String>>,
    /// Show layout detection and per-file detail.
    pub verbose: bool,
    /// Emit output as JSON.
    pub json: bool,
}

/// Top-level JSON output for the recovery report.
#[derive(Serialize)]
struct RecoverReport<'a> {
    store: &'a str,
    layout: &'static str,
    origin: &'a str,
    files_scanned: usize,
    entry_count: usize,
    entries: &'a RecoveredStore,
}

pub fn execute(opts: &RecoverOptions, writer: &mut dyn Write) -> Result<(), LsrError> {
    let root = Path::new(&opts.store);
    let prefix = OriginPrefix::for_origin(&opts.origin);
    let layout = StoreLayout::detect(root);

    let (store, files_scanned) = match &layout {
        StoreLayout::Sqlite(path) => {
            if opts.verbose && !opts.json {
                wprintln!(writer, "Found SQLite store: {}", path.display())?;
            }
            let store = SqliteItemTableExtractor::open(path)
                .map(|mut extractor| extractor.recover())
                .unwrap_or_default();
            (store, 1)
        }
        StoreLayout::LevelDb(files) => {
            if opts.verbose && !opts.json {
                wprintln!(writer, "Found LevelDB store ({} files)", files.len())?;
                for file in files {
                    wprintln!(writer, "  {}", file.display())?;
                }
            }
            scan_log_files(files, &prefix, opts)
        }
        StoreLayout::Absent => (RecoveredStore::new(), 0),
    };

    if opts.json {
        let report = RecoverReport {
            store: &opts.store,
            layout: layout.label(),
            origin: &opts.origin,
            files_scanned,
            entry_count: store.len(),
            entries: &store,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| LsrError::Parse(format!("JSON serialization failed: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(
        writer,
        "Store: {} (layout: {})",
        opts.store.bold(),
        layout.label()
    )?;
    if matches!(layout, StoreLayout::Absent) {
        wprintln!(
            writer,
            "{}",
            "No legacy store found — nothing to recover".dimmed()
        )?;
        return Ok(());
    }

    wprintln!(writer)?;
    for (key, value) in store.iter() {
        wprintln!(writer, "  {} = {}", key.cyan(), value)?;
    }
    wprintln!(writer)?;
    wprintln!(
        writer,
        "Recovered {} key(s) from {} file(s)",
        store.len().to_string().green(),
        files_scanned
    )?;
    Ok(())
}

/// Scan a store's log files in parallel, then merge oldest-first.
///
/// The merge order is what gives later files their overwrite priority, so
/// the parallel scan only produces per-file partial stores; combining them
/// stays sequential.
fn scan_log_files(
    files: &[std::path::PathBuf],
    prefix: &OriginPrefix,
    opts: &RecoverOptions,
) -> (RecoveredStore, usize) {
    let engine = LogRecoveryEngine::new(prefix.clone());
    let pb =
        (!opts.json && files.len() > 1).then(|| create_progress_bar(files.len() as u64, "files"));

    let partials: Vec<Option<RecoveredStore>> = files
        .par_iter()
        .map(|path| {
            let partial = match read_file(path) {
                Ok(buf) => Some(engine.recover_log(&buf, opts.keys.as_deref())),
                Err(e) => {
                    // One unreadable file drops out; the rest still merge.
                    eprintln!("Warning: {}", e);
                    None
                }
            };
            if let Some(ref pb) = pb {
                pb.inc(1);
            }
            partial
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let mut store = RecoveredStore::new();
    let mut scanned = 0;
    for partial in partials.into_iter().flatten() {
        store.merge(partial);
        scanned += 1;
    }
    (store, scanned)
}

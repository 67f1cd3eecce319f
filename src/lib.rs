//! Legacy WebView localStorage recovery toolkit.
//!
//! The `localstore-utils` crate (library name `lsr`) recovers key-value
//! pairs written by legacy Cordova/Crosswalk WebViews — either the
//! Chromium-style LevelDB localStorage log or the older Crosswalk SQLite
//! store — without linking the original storage engines. The LevelDB path
//! is pure heuristics: record boundaries are inferred from content shape
//! (origin-prefix patterns, bracket/quote balance, digit runs, null
//! padding) under partially corrupt or truncated input, with hard scan
//! ceilings against runaway work.
//!
//! # CLI Reference
//!
//! Install the `lsrec` binary and use its subcommands to work with legacy
//! store files from the command line.
//!
//! ```text
//! cargo install localstore-utils
//! ```
//!
//! ## Subcommands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`lsrec recover`](cli::app::Commands::Recover) | Recover a store directory (auto-detects SQLite vs LevelDB) |
//! | [`lsrec log`](cli::app::Commands::Log) | Scan a single LevelDB log/table file for one origin's keys |
//! | [`lsrec sqlite`](cli::app::Commands::Sqlite) | Extract rows from a Crosswalk `ItemTable` store |
//! | [`lsrec dump`](cli::app::Commands::Dump) | Hex dump raw log bytes, optionally around each prefix match |
//!
//! ## Global options
//!
//! All subcommands accept `--color <auto|always|never>`, `--output <file>`,
//! and `--threads <n>`. Data-producing subcommands accept `--json` for
//! machine-readable output.
//!
//! See the [`cli`] module for full details.
//!
//! # Library API
//!
//! Add `lsr` as a dependency to use the recovery library directly:
//!
//! ```toml
//! [dependencies]
//! lsr = { package = "localstore-utils", version = "1" }
//! ```
//!
//! ## Quick example
//!
//! ```no_run
//! use lsr::storage::engine::LogRecoveryEngine;
//! use lsr::storage::locator::OriginPrefix;
//!
//! // Scan one raw log buffer for everything the file:// origin stored.
//! let log = std::fs::read("000003.log").unwrap();
//! let engine = LogRecoveryEngine::new(OriginPrefix::legacy_file());
//! let store = engine.recover(&[log], None);
//!
//! for (key, value) in store.iter() {
//!     println!("{key} = {value}");
//! }
//! ```
//!
//! ## Key entry points
//!
//! | Type / Function | Purpose |
//! |-----------------|---------|
//! | [`recover_store`](storage::selector::recover_store) | One-call recovery of a store directory |
//! | [`LogRecoveryEngine`](storage::engine::LogRecoveryEngine) | Scan ordered log buffers, last-write-wins merge |
//! | [`RecoveredStore`](storage::engine::RecoveredStore) | Insertion-ordered `key → value` result map |
//! | [`OriginPrefix`](storage::locator::OriginPrefix) | Search pattern isolating one origin's keys |
//! | [`extract_value`](storage::value::extract_value) | Encoding detection and exact span extraction |
//! | [`SqliteItemTableExtractor`](storage::sqlite::SqliteItemTableExtractor) | Fixed-schema `ItemTable` reader |
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`storage::scan`] | Byte-pattern search primitives |
//! | [`storage::value`] | Value encoding disambiguation, span extraction, scan ceilings |
//! | [`storage::locator`] | Targeted and discovery record location, reserved-key filtering |
//! | [`storage::engine`] | Multi-file orchestration, `RecoveryProvider` seam |
//! | [`storage::sqlite`] | Crosswalk `ItemTable` extraction |
//! | [`storage::selector`] | Per-store layout detection and strategy choice |
//! | [`storage::constants`] | On-disk framing constants and scan bounds |

#[cfg(all(feature = "cli", not(target_arch = "wasm32")))]
pub mod cli;
pub mod storage;
pub mod util;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use thiserror::Error;

/// Errors returned by `lsr` operations.
#[derive(Error, Debug)]
pub enum LsrError {
    /// An I/O error occurred (file open, read, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// A parse error occurred (malformed data or unexpected values).
    #[error("Parse error: {0}")]
    Parse(String),

    /// An invalid argument was supplied (bad offset, bad option, etc.).
    #[error("Invalid argument: {0}")]
    Argument(String),
}

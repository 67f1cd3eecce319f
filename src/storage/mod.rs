//! Legacy localStorage recovery.
//!
//! This module contains the format heuristics for pulling key-value pairs
//! out of legacy WebView storage without the original engines: byte-pattern
//! search over LevelDB-style log files ([`scan`], [`value`], [`locator`],
//! [`engine`]) and a fixed-schema reader for the older Crosswalk SQLite
//! store ([`sqlite`]). [`selector`] picks the right path per store
//! directory.
//!
//! Start with [`selector::recover_store`] for a store directory, or
//! [`engine::LogRecoveryEngine`] when you already hold raw log bytes.

pub mod constants;
pub mod engine;
pub mod locator;
pub mod scan;
#[cfg(not(target_arch = "wasm32"))]
pub mod selector;
#[cfg(not(target_arch = "wasm32"))]
pub mod sqlite;
pub mod value;

//! WebAssembly bindings for legacy localStorage recovery.
//!
//! Each exported function accepts raw log file bytes as `&[u8]` (via
//! wasm-bindgen) and returns a JSON string with the results. These are thin
//! wrappers over the same library code used by the CLI subcommands, letting
//! a browser-based tool inspect uploaded log files without a native binary.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::storage::engine::{LogRecoveryEngine, RecoveredStore};
use crate::storage::locator::{discover, OriginPrefix};
use crate::storage::scan::find_first_from;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_json<T: Serialize>(val: &T) -> Result<String, JsValue> {
    serde_json::to_string(val).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ---------------------------------------------------------------------------
// scan_summary — quick census of one log buffer
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ScanSummary {
    file_size: usize,
    origin: String,
    prefix_matches: usize,
    recoverable_keys: usize,
}

/// Returns a census of the buffer as JSON.
///
/// Takes raw log bytes and an origin string (e.g. `"file://"`) and returns
/// a JSON object with fields: `file_size`, `origin`, `prefix_matches` (raw
/// occurrences of the origin prefix), and `recoverable_keys` (keys
/// discovery mode would return). Suitable for populating a file summary
/// panel before running a full recovery.
#[wasm_bindgen]
pub fn scan_summary(data: &[u8], origin: &str) -> Result<String, JsValue> {
    let prefix = OriginPrefix::for_origin(origin);

    let mut prefix_matches = 0;
    let mut from = 0;
    while let Some(at) = find_first_from(data, prefix.as_bytes(), from) {
        prefix_matches += 1;
        from = at + 1;
    }

    let summary = ScanSummary {
        file_size: data.len(),
        origin: origin.to_string(),
        prefix_matches,
        recoverable_keys: discover(data, &prefix).len(),
    };
    to_json(&summary)
}

// ---------------------------------------------------------------------------
// discover_entries — full discovery-mode recovery
// ---------------------------------------------------------------------------

/// Recovers every key under `origin` and returns the mapping as JSON.
///
/// The result is a JSON object whose property order is discovery order;
/// duplicate writes resolve to the most recent one.
#[wasm_bindgen]
pub fn discover_entries(data: &[u8], origin: &str) -> Result<String, JsValue> {
    let engine = LogRecoveryEngine::new(OriginPrefix::for_origin(origin));
    let store = engine.recover_log(data, None);
    to_json(&store)
}

// ---------------------------------------------------------------------------
// recover_keys — targeted-mode recovery
// ---------------------------------------------------------------------------

/// Recovers only the named keys and returns the mapping as JSON.
///
/// `keys` is a JavaScript array of key name strings; non-string elements
/// are ignored. Keys with no recoverable value are absent from the result.
#[wasm_bindgen]
pub fn recover_keys(data: &[u8], origin: &str, keys: js_sys::Array) -> Result<String, JsValue> {
    let keys: Vec<String> = keys.iter().filter_map(|k| k.as_string()).collect();
    let engine = LogRecoveryEngine::new(OriginPrefix::for_origin(origin));
    let store: RecoveredStore = engine.recover_log(data, Some(&keys));
    to_json(&store)
}

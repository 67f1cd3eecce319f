//! Record location: origin-prefixed key search over a raw log buffer.
//!
//! A legacy localStorage write lands in the log as the map key
//! `_<origin>\x00\x01<key>` followed (after separator bytes) by the encoded
//! value. The locator finds those map keys two ways: **targeted**, where the
//! caller names the keys it wants, and **discovery**, where every occurrence
//! of the origin prefix is inspected for a decodable key name.
//!
//! Both modes anchor value extraction at the *last* occurrence of
//! `prefix + key` in the buffer. The log is append-only, so the rightmost
//! match is the most recent write and everything earlier is a stale
//! overwrite.
//!
//! Origin filtering is structural: the prefix and key are concatenated
//! before searching, so keys under any other origin can never match — the
//! new WebView's own live data shares these log files and must not leak
//! into a recovery pass.

use std::collections::HashMap;

use crate::storage::constants::*;
use crate::storage::scan::{find_first_from, find_last};
use crate::storage::value::{extract_value, ExtractedValue};

/// The fixed byte pattern identifying one origin's keys in the log.
///
/// Built as `_<origin>\x00\x01`: the map-key marker, the origin text, the
/// origin terminator, and the key format tag. Exactly one prefix is used
/// per recovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPrefix {
    origin: String,
    bytes: Vec<u8>,
}

impl OriginPrefix {
    /// Build the search prefix for an origin string (e.g. `"file://"`).
    pub fn for_origin(origin: &str) -> Self {
        let mut bytes = Vec::with_capacity(origin.len() + 3);
        bytes.push(MAP_KEY_MARKER);
        bytes.extend_from_slice(origin.as_bytes());
        bytes.push(ORIGIN_TERMINATOR);
        bytes.push(KEY_FORMAT_TAG);
        OriginPrefix {
            origin: origin.to_string(),
            bytes,
        }
    }

    /// The prefix for the legacy `file://` origin, where Cordova/Crosswalk
    /// WebViews stored everything.
    pub fn legacy_file() -> Self {
        Self::for_origin(LEGACY_FILE_ORIGIN)
    }

    /// The origin text this prefix was built from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The raw search pattern.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The full search pattern for one key: `prefix ++ key`.
    pub fn key_pattern(&self, key: &str) -> Vec<u8> {
        let mut pattern = self.bytes.clone();
        pattern.extend_from_slice(key.as_bytes());
        pattern
    }
}

/// One key located in the log with its extracted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedEntry {
    pub key: String,
    pub value: ExtractedValue,
}

/// Targeted mode: look up an explicit set of key names.
///
/// For each key the full pattern `prefix ++ key` is searched for its last
/// occurrence; keys with no occurrence or no extractable value are omitted.
pub fn targeted(buf: &[u8], prefix: &OriginPrefix, keys: &[String]) -> Vec<LocatedEntry> {
    let mut entries = Vec::new();
    for key in keys {
        let pattern = prefix.key_pattern(key);
        if let Some(offset) = find_last(buf, &pattern) {
            if let Some(value) = extract_value(buf, offset + pattern.len()) {
                entries.push(LocatedEntry {
                    key: key.clone(),
                    value,
                });
            }
        }
    }
    entries
}

/// Discovery mode: find every recoverable key under the origin prefix.
///
/// Scans left to right for prefix occurrences, starting each successive
/// search one byte past the previous match so adjacent and overlapping
/// occurrences are not skipped. For each surviving candidate key the value
/// is taken from the key's *last* occurrence in the whole buffer, and a key
/// sighted more than once overwrites its earlier entry in place.
pub fn discover(buf: &[u8], prefix: &OriginPrefix) -> Vec<LocatedEntry> {
    let mut entries: Vec<LocatedEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    let mut from = 0;
    while let Some(at) = find_first_from(buf, prefix.as_bytes(), from) {
        from = at + 1;

        let key_start = at + prefix.as_bytes().len();
        let Some(key) = decode_candidate_key(buf, key_start) else {
            continue;
        };
        if key.starts_with(META_KEY_PREFIX) || key == VERSION_SENTINEL_KEY {
            continue;
        }

        // Re-anchor at the most recent write for this key, wherever it is.
        let pattern = prefix.key_pattern(&key);
        let Some(last) = find_last(buf, &pattern) else {
            continue;
        };
        let Some(value) = extract_value(buf, last + pattern.len()) else {
            continue;
        };

        match positions.get(&key) {
            Some(&i) => entries[i].value = value,
            None => {
                positions.insert(key.clone(), entries.len());
                entries.push(LocatedEntry { key, value });
            }
        }
    }
    entries
}

/// Decode the candidate key name starting at `start`.
///
/// The name is the run of printable ASCII bytes that are not value-start
/// bytes (digits, brackets, quotes mark where the encoded value begins),
/// capped at [`MAX_KEY_LEN`]. Returns `None` for an empty run.
pub fn decode_candidate_key(buf: &[u8], start: usize) -> Option<String> {
    if start >= buf.len() {
        return None;
    }
    let run = buf[start..]
        .iter()
        .take(MAX_KEY_LEN)
        .take_while(|&&b| is_key_byte(b))
        .count();
    if run == 0 {
        return None;
    }
    std::str::from_utf8(&buf[start..start + run])
        .ok()
        .map(str::to_string)
}

/// Bytes that can appear in a key name: printable ASCII minus the
/// value-start set.
fn is_key_byte(b: u8) -> bool {
    (0x20..=0x7e).contains(&b) && !matches!(b, b'0'..=b'9' | b'[' | b'{' | b'"')
}

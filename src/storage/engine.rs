//! Recovery orchestration over one logical store's log files.
//!
//! [`LogRecoveryEngine`] runs the record locator over an ordered sequence of
//! log buffers and merges the findings into a single [`RecoveredStore`].
//! Later files overwrite earlier ones for duplicate keys, matching the
//! filesystem ordering of rotated logs (oldest first). Recovery is
//! best-effort by contract: no files, no matches, and unreadable files all
//! degrade to a smaller or empty store, never an error.
//!
//! The [`RecoveryProvider`] trait is the substitution seam: the byte-scanning
//! engine, the SQLite `ItemTable` extractor, and any future strategy (such as
//! exporting through the legacy engine's own runtime) are interchangeable
//! behind the same `recover` contract.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::storage::locator::{discover, targeted, OriginPrefix};
use crate::util::fs::read_file;

/// The recovered `key → value` mapping for one logical store.
///
/// Iteration order is insertion order (discovery order, not alphabetical).
/// Inserting an existing key overwrites its value in place, keeping the
/// key's original position. Serializes as a JSON object in iteration order.
///
/// # Examples
///
/// ```
/// use lsr::storage::engine::RecoveredStore;
///
/// let mut store = RecoveredStore::new();
/// store.insert("b".into(), "1".into());
/// store.insert("a".into(), "2".into());
/// store.insert("b".into(), "3".into());
///
/// let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec!["b", "a"]);
/// assert_eq!(store.get("b"), Some("3"));
/// assert_eq!(serde_json::to_string(&store).unwrap(), r#"{"b":"3","a":"2"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveredStore {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl RecoveredStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, overwriting in place if it already exists.
    pub fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply all of `other`'s entries on top of this store.
    pub fn merge(&mut self, other: RecoveredStore) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }
}

impl Serialize for RecoveredStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A best-effort recovery strategy for one logical store.
///
/// Implementations never fail on content: anything unrecoverable is simply
/// absent from the returned store, and callers distinguish "nothing to
/// migrate" from "migration failed" by emptiness alone.
pub trait RecoveryProvider {
    fn recover(&mut self) -> RecoveredStore;
}

/// Scans raw log buffers for one origin's keys.
#[derive(Debug, Clone)]
pub struct LogRecoveryEngine {
    prefix: OriginPrefix,
}

impl LogRecoveryEngine {
    pub fn new(prefix: OriginPrefix) -> Self {
        LogRecoveryEngine { prefix }
    }

    pub fn prefix(&self) -> &OriginPrefix {
        &self.prefix
    }

    /// Recover key-value pairs from an ordered sequence of log buffers.
    ///
    /// With `keys` supplied the locator runs in targeted mode, otherwise in
    /// discovery mode. Files are scanned in the given order and merged with
    /// later-file-wins semantics. An empty input yields an empty store.
    ///
    /// # Examples
    ///
    /// ```
    /// use lsr::storage::engine::LogRecoveryEngine;
    /// use lsr::storage::locator::OriginPrefix;
    ///
    /// let engine = LogRecoveryEngine::new(OriginPrefix::legacy_file());
    /// let log = b"_file://\x00\x01counter5_file://\x00\x01items[1,2,3]".to_vec();
    /// let store = engine.recover(&[log], None);
    /// assert_eq!(store.get("counter"), Some("5"));
    /// assert_eq!(store.get("items"), Some("[1,2,3]"));
    /// ```
    pub fn recover<B: AsRef<[u8]>>(&self, logs: &[B], keys: Option<&[String]>) -> RecoveredStore {
        let mut store = RecoveredStore::new();
        for log in logs {
            store.merge(self.recover_log(log.as_ref(), keys));
        }
        store
    }

    /// Recover from a single log buffer.
    pub fn recover_log(&self, log: &[u8], keys: Option<&[String]>) -> RecoveredStore {
        let entries = match keys {
            Some(keys) => targeted(log, &self.prefix, keys),
            None => discover(log, &self.prefix),
        };
        let mut store = RecoveredStore::new();
        for entry in entries {
            store.insert(entry.key, entry.value.value);
        }
        store
    }
}

/// [`RecoveryProvider`] over a logical store's log files on disk.
///
/// Files are read one at a time; a file that cannot be read drops out of the
/// merge without affecting the others.
pub struct LogStoreProvider {
    engine: LogRecoveryEngine,
    files: Vec<PathBuf>,
    keys: Option<Vec<String>>,
}

impl LogStoreProvider {
    pub fn new(prefix: OriginPrefix, files: Vec<PathBuf>, keys: Option<Vec<String>>) -> Self {
        LogStoreProvider {
            engine: LogRecoveryEngine::new(prefix),
            files,
            keys,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl RecoveryProvider for LogStoreProvider {
    fn recover(&mut self) -> RecoveredStore {
        let mut store = RecoveredStore::new();
        for path in &self.files {
            let Ok(buf) = read_file(path) else {
                continue;
            };
            store.merge(self.engine.recover_log(&buf, self.keys.as_deref()));
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn engine() -> LogRecoveryEngine {
        LogRecoveryEngine::new(OriginPrefix::legacy_file())
    }

    #[test]
    fn test_store_insert_preserves_first_seen_order() {
        let mut store = RecoveredStore::new();
        store.insert("x".into(), "1".into());
        store.insert("y".into(), "2".into());
        store.insert("x".into(), "9".into());
        let entries: Vec<_> = store.iter().collect();
        assert_eq!(entries, vec![("x", "9"), ("y", "2")]);
    }

    #[test]
    fn test_store_merge_overwrites() {
        let mut a = RecoveredStore::new();
        a.insert("k".into(), "old".into());
        a.insert("only_a".into(), "1".into());
        let mut b = RecoveredStore::new();
        b.insert("k".into(), "new".into());
        a.merge(b);
        assert_eq!(a.get("k"), Some("new"));
        assert_eq!(a.get("only_a"), Some("1"));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_store_serializes_in_insertion_order() {
        let mut store = RecoveredStore::new();
        store.insert("zeta".into(), "1".into());
        store.insert("alpha".into(), "2".into());
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn test_recover_no_files_is_empty() {
        let store = engine().recover::<Vec<u8>>(&[], None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_recover_later_file_wins() {
        let old = b"_file://\x00\x01cfg\x00\x01{\"v\":1}".to_vec();
        let new = b"_file://\x00\x01cfg\x00\x01{\"v\":2}".to_vec();
        let store = engine().recover(&[old, new], None);
        assert_eq!(store.get("cfg"), Some("{\"v\":2}"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_recover_targeted_mode() {
        let log = b"_file://\x00\x01a\x00\x011_file://\x00\x01b\x00\x012".to_vec();
        let keys = vec!["b".to_string()];
        let store = engine().recover(&[log], Some(&keys));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some("2"));
    }

    #[test]
    fn test_recover_is_idempotent() {
        let log = b"_file://\x00\x01counter5_file://\x00\x01items[1,2,3]".to_vec();
        let logs = vec![log];
        let first = engine().recover(&logs, None);
        let second = engine().recover(&logs, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_provider_skips_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("000003.log");
        let mut f = std::fs::File::create(&good).unwrap();
        f.write_all(b"_file://\x00\x01k\x00\x01[1]").unwrap();
        let missing = dir.path().join("000004.log");

        let mut provider =
            LogStoreProvider::new(OriginPrefix::legacy_file(), vec![good, missing], None);
        let store = provider.recover();
        assert_eq!(store.get("k"), Some("[1]"));
        assert_eq!(store.len(), 1);
    }
}

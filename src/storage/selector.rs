//! Per-store strategy selection.
//!
//! A legacy store directory holds either the Crosswalk SQLite file or a
//! LevelDB log directory, never meaningfully both. [`StoreLayout::detect`]
//! probes the conventional paths (SQLite first, matching the original
//! migration order) and [`recover_store`] runs the matching provider.
//! Absence of legacy data is a normal outcome: every failure mode degrades
//! to an empty store.

use std::path::{Path, PathBuf};

use crate::storage::constants::{LEVELDB_DIR, SQLITE_STORE_FILE};
use crate::storage::engine::{LogStoreProvider, RecoveredStore, RecoveryProvider};
use crate::storage::locator::OriginPrefix;
use crate::storage::sqlite::SqliteItemTableExtractor;
use crate::util::fs::find_log_files;

/// The storage format detected for one legacy store directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLayout {
    /// Crosswalk SQLite store (`file__0.localstorage`).
    Sqlite(PathBuf),
    /// LevelDB log directory; files ordered oldest first.
    LevelDb(Vec<PathBuf>),
    /// No legacy data present.
    Absent,
}

impl StoreLayout {
    /// Probe `root` for a legacy store.
    ///
    /// Checks the SQLite file first; a present but empty file is ignored.
    /// Otherwise looks for LevelDB log files in `<root>/leveldb/`, falling
    /// back to `root` itself for callers that point directly at a log
    /// directory.
    pub fn detect(root: &Path) -> StoreLayout {
        let sqlite = root.join(SQLITE_STORE_FILE);
        if std::fs::metadata(&sqlite).map(|m| m.len() > 0).unwrap_or(false) {
            return StoreLayout::Sqlite(sqlite);
        }

        let leveldb = root.join(LEVELDB_DIR);
        let log_dir = if leveldb.is_dir() {
            leveldb
        } else {
            root.to_path_buf()
        };
        if let Ok(files) = find_log_files(&log_dir) {
            if !files.is_empty() {
                return StoreLayout::LevelDb(files);
            }
        }

        StoreLayout::Absent
    }

    /// Short label for CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            StoreLayout::Sqlite(_) => "sqlite",
            StoreLayout::LevelDb(_) => "leveldb",
            StoreLayout::Absent => "absent",
        }
    }
}

/// Recover one logical store, whatever its format.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use lsr::storage::locator::OriginPrefix;
/// use lsr::storage::selector::recover_store;
///
/// let store = recover_store(
///     Path::new("app_webview/Default/Local Storage"),
///     &OriginPrefix::legacy_file(),
///     None,
/// );
/// for (key, value) in store.iter() {
///     println!("{key} = {value}");
/// }
/// ```
pub fn recover_store(
    root: &Path,
    prefix: &OriginPrefix,
    keys: Option<&[String]>,
) -> RecoveredStore {
    match StoreLayout::detect(root) {
        StoreLayout::Sqlite(path) => SqliteItemTableExtractor::open(&path)
            .map(|mut extractor| extractor.recover())
            .unwrap_or_default(),
        StoreLayout::LevelDb(files) => {
            LogStoreProvider::new(prefix.clone(), files, keys.map(<[String]>::to_vec)).recover()
        }
        StoreLayout::Absent => RecoveredStore::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf16le(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    #[test]
    fn test_detect_absent() {
        let dir = TempDir::new().unwrap();
        assert_eq!(StoreLayout::detect(dir.path()), StoreLayout::Absent);
    }

    #[test]
    fn test_detect_missing_root_is_absent() {
        assert_eq!(
            StoreLayout::detect(Path::new("/nonexistent/store")),
            StoreLayout::Absent
        );
    }

    #[test]
    fn test_detect_empty_sqlite_file_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SQLITE_STORE_FILE), b"").unwrap();
        assert_eq!(StoreLayout::detect(dir.path()), StoreLayout::Absent);
    }

    #[test]
    fn test_detect_sqlite_preferred_over_leveldb() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SQLITE_STORE_FILE), b"not empty").unwrap();
        let ldb = dir.path().join(LEVELDB_DIR);
        fs::create_dir(&ldb).unwrap();
        fs::write(ldb.join("000003.log"), b"data").unwrap();

        match StoreLayout::detect(dir.path()) {
            StoreLayout::Sqlite(path) => assert!(path.ends_with(SQLITE_STORE_FILE)),
            other => panic!("expected sqlite layout, got {:?}", other),
        }
    }

    #[test]
    fn test_detect_leveldb_subdir_files_sorted() {
        let dir = TempDir::new().unwrap();
        let ldb = dir.path().join(LEVELDB_DIR);
        fs::create_dir(&ldb).unwrap();
        fs::write(ldb.join("000010.log"), b"").unwrap();
        fs::write(ldb.join("000003.log"), b"").unwrap();
        fs::write(ldb.join("000005.ldb"), b"").unwrap();
        fs::write(ldb.join("MANIFEST-000002"), b"").unwrap();

        match StoreLayout::detect(dir.path()) {
            StoreLayout::LevelDb(files) => {
                let names: Vec<_> = files
                    .iter()
                    .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
                    .collect();
                assert_eq!(names, vec!["000003.log", "000005.ldb", "000010.log"]);
            }
            other => panic!("expected leveldb layout, got {:?}", other),
        }
    }

    #[test]
    fn test_detect_root_as_log_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("000003.log"), b"").unwrap();
        assert!(matches!(
            StoreLayout::detect(dir.path()),
            StoreLayout::LevelDb(_)
        ));
    }

    #[test]
    fn test_recover_store_absent_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = recover_store(dir.path(), &OriginPrefix::legacy_file(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_recover_store_leveldb_end_to_end() {
        let dir = TempDir::new().unwrap();
        let ldb = dir.path().join(LEVELDB_DIR);
        fs::create_dir(&ldb).unwrap();
        fs::write(ldb.join("000003.log"), b"_file://\x00\x01cfg\x00\x01{\"v\":1}").unwrap();
        fs::write(ldb.join("000007.log"), b"_file://\x00\x01cfg\x00\x01{\"v\":2}").unwrap();

        let store = recover_store(dir.path(), &OriginPrefix::legacy_file(), None);
        assert_eq!(store.get("cfg"), Some("{\"v\":2}"));
    }

    #[test]
    fn test_recover_store_sqlite_end_to_end() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SQLITE_STORE_FILE);
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute("CREATE TABLE ItemTable (key TEXT UNIQUE, value BLOB)", [])
            .unwrap();
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES ('token', ?1)",
            rusqlite::params![utf16le("abc")],
        )
        .unwrap();
        drop(conn);

        let store = recover_store(dir.path(), &OriginPrefix::legacy_file(), None);
        assert_eq!(store.get("token"), Some("abc"));
    }
}

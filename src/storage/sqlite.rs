//! Crosswalk SQLite localStorage extraction.
//!
//! Older Crosswalk WebViews kept localStorage in a SQLite file
//! (`file__0.localstorage`) with a single `ItemTable` of
//! `(key TEXT UNIQUE, value BLOB)` rows — a fixed schema, so no heuristics
//! are needed on this path. Values are text blobs, almost always UTF-16LE;
//! the decoding policy is fixed per extractor rather than guessed per row.

use byteorder::{ByteOrder, LittleEndian};
use rusqlite::{Connection, OpenFlags};
use serde::Serialize;

use crate::storage::constants::ITEM_TABLE;
use crate::storage::engine::{RecoveredStore, RecoveryProvider};
use crate::LsrError;

/// Fixed blob decoding policy for `ItemTable` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlobEncoding {
    /// UTF-16 little-endian, the WebKit/Crosswalk default.
    Utf16Le,
    /// Plain UTF-8, seen in some vendor builds.
    Utf8,
}

impl BlobEncoding {
    /// Decode a value blob, trimming whitespace and stripping embedded NULs.
    ///
    /// Returns `None` when the blob does not decode under this policy.
    pub fn decode(&self, blob: &[u8]) -> Option<String> {
        let text = match self {
            BlobEncoding::Utf16Le => {
                // A trailing odd byte is padding from a truncated write.
                let units: Vec<u16> = blob.chunks_exact(2).map(LittleEndian::read_u16).collect();
                String::from_utf16(&units).ok()?
            }
            BlobEncoding::Utf8 => std::str::from_utf8(blob).ok()?.to_string(),
        };
        Some(text.trim().replace('\u{0}', ""))
    }
}

/// Read-only extractor over a Crosswalk `ItemTable`.
pub struct SqliteItemTableExtractor {
    conn: Connection,
    encoding: BlobEncoding,
}

impl SqliteItemTableExtractor {
    /// Open a store file read-only with the default UTF-16LE policy.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, LsrError> {
        Self::open_with_encoding(path, BlobEncoding::Utf16Le)
    }

    /// Open a store file read-only with an explicit decoding policy.
    pub fn open_with_encoding<P: AsRef<std::path::Path>>(
        path: P,
        encoding: BlobEncoding,
    ) -> Result<Self, LsrError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| LsrError::Io(format!("Cannot open {}: {}", path.display(), e)))?;
        Ok(SqliteItemTableExtractor { conn, encoding })
    }

    pub fn encoding(&self) -> BlobEncoding {
        self.encoding
    }

    /// Read every `ItemTable` row into a store.
    ///
    /// A row whose key or blob cannot be read, or whose blob does not decode
    /// under the fixed policy, is skipped; one corrupt row never aborts the
    /// rest of the scan.
    pub fn read_all(&self) -> Result<RecoveredStore, LsrError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT key, value FROM {ITEM_TABLE}"))
            .map_err(|e| LsrError::Parse(format!("Cannot query {ITEM_TABLE}: {}", e)))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| LsrError::Parse(format!("Cannot query {ITEM_TABLE}: {}", e)))?;

        let mut store = RecoveredStore::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| LsrError::Parse(format!("Row cursor failed: {}", e)))?
        {
            let key: String = match row.get(0) {
                Ok(k) => k,
                Err(_) => continue,
            };
            let blob: Vec<u8> = match row.get(1) {
                Ok(b) => b,
                Err(_) => continue,
            };
            if let Some(value) = self.encoding.decode(&blob) {
                store.insert(key, value);
            }
        }
        Ok(store)
    }
}

impl RecoveryProvider for SqliteItemTableExtractor {
    fn recover(&mut self) -> RecoveredStore {
        self.read_all().unwrap_or_default()
    }
}

/// Legacy localStorage on-disk constants.
///
/// These values are derived from the storage layouts written by legacy
/// Cordova/Crosswalk WebViews:
/// - Chromium's localStorage LevelDB map-key framing (`_<origin>\x00\x01<key>`)
/// - the Crosswalk SQLite store (`file__0.localstorage` with an `ItemTable`)
// Map-key framing in the LevelDB log
pub const MAP_KEY_MARKER: u8 = b'_'; // leading byte of every per-origin map key
pub const ORIGIN_TERMINATOR: u8 = 0x00; // ends the origin text
pub const KEY_FORMAT_TAG: u8 = 0x01; // Latin-1 key format marker

/// Origin of data written by legacy file-scheme WebViews. Everything a
/// Cordova app stored before the WebView switch lives under this origin.
pub const LEGACY_FILE_ORIGIN: &str = "file://";

// Reserved names never surfaced by discovery
pub const META_KEY_PREFIX: &str = "META:";
pub const VERSION_SENTINEL_KEY: &str = "VERSION";

/// Candidate key names longer than this are treated as corrupt and skipped.
pub const MAX_KEY_LEN: usize = 128;

/// How far past the key a value-start byte may appear.
pub const VALUE_SCAN_WINDOW: usize = 100;

// Scan-length ceilings. These bound worst-case CPU on corrupt or hostile
// input; hitting one drops the value rather than returning a truncation.
pub const MAX_UTF8_SCAN: usize = 500_000;
pub const MAX_UTF16_SCAN: usize = 1_000_000;

// Conventional file names inside a legacy store directory
pub const SQLITE_STORE_FILE: &str = "file__0.localstorage";
pub const LEVELDB_DIR: &str = "leveldb";
pub const ITEM_TABLE: &str = "ItemTable";

/// Extensions of LevelDB files worth scanning (write-ahead logs and
/// compacted tables; values survive verbatim in both).
pub const LOG_FILE_EXTENSIONS: &[&str] = &["log", "ldb"];

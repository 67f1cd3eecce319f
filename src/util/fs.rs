//! Filesystem helpers for log file discovery and loading.
//!
//! Provides [`find_log_files`] to collect a LevelDB directory's scannable
//! files and [`read_file`] to pull one fully into memory — the scanner works
//! on complete buffers, never streams.

use std::path::{Path, PathBuf};

use crate::storage::constants::LOG_FILE_EXTENSIONS;
use crate::LsrError;

/// Find LevelDB log and table files in a directory, oldest first.
///
/// Matches `*.log` and `*.ldb`. LevelDB names files by zero-padded sequence
/// number, so a lexicographic sort is oldest-first — the order the recovery
/// merge relies on for later-write-wins.
pub fn find_log_files(dir: &Path) -> Result<Vec<PathBuf>, LsrError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| LsrError::Io(format!("Cannot read directory {}: {}", dir.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| LsrError::Io(format!("Cannot read directory entry: {}", e)))?;
        let path = entry.path();
        if path.is_file() && has_log_extension(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| LOG_FILE_EXTENSIONS.iter().any(|e| ext == *e))
}

/// Read a file fully into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>, LsrError> {
    std::fs::read(path).map_err(|e| LsrError::Io(format!("Cannot read {}: {}", path.display(), e)))
}

/// A loaded log file: either an owned buffer or a memory mapping.
///
/// Mapped loads avoid copying multi-megabyte logs the scanner will only
/// walk once; the OS faults pages in as they are touched.
#[cfg(feature = "cli")]
pub enum LogBuffer {
    Buffered(Vec<u8>),
    Mapped(memmap2::Mmap),
}

#[cfg(feature = "cli")]
impl std::ops::Deref for LogBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            LogBuffer::Buffered(v) => v,
            LogBuffer::Mapped(m) => m,
        }
    }
}

/// Load a log file, memory-mapped when `use_mmap` is set.
///
/// The mapping is read-only; as with any `mmap(2)` of a live file, the file
/// must not be rewritten by another process while mapped. Legacy stores are
/// only scanned after the writing WebView is gone, so this holds in
/// practice.
#[cfg(feature = "cli")]
pub fn load_log(path: &Path, use_mmap: bool) -> Result<LogBuffer, LsrError> {
    if !use_mmap {
        return read_file(path).map(LogBuffer::Buffered);
    }

    let file = std::fs::File::open(path)
        .map_err(|e| LsrError::Io(format!("Cannot open {}: {}", path.display(), e)))?;
    let mmap = unsafe {
        memmap2::Mmap::map(&file)
            .map_err(|e| LsrError::Io(format!("Cannot mmap {}: {}", path.display(), e)))?
    };
    Ok(LogBuffer::Mapped(mmap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_empty_dir() {
        let dir = TempDir::new().unwrap();
        let files = find_log_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("000010.log"), b"").unwrap();
        fs::write(dir.path().join("000004.ldb"), b"").unwrap();
        fs::write(dir.path().join("000003.log"), b"").unwrap();
        fs::write(dir.path().join("CURRENT"), b"").unwrap();
        fs::write(dir.path().join("LOCK"), b"").unwrap();

        let files = find_log_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["000003.log", "000004.ldb", "000010.log"]);
    }

    #[test]
    fn test_find_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("lost.log")).unwrap();
        fs::write(dir.path().join("000003.log"), b"").unwrap();

        let files = find_log_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_find_nonexistent_dir() {
        assert!(find_log_files(Path::new("/nonexistent/dir")).is_err());
    }

    #[test]
    fn test_read_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("000003.log");
        fs::write(&path, b"\x00\x01raw bytes").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"\x00\x01raw bytes");
    }

    #[test]
    fn test_load_log_mmap_matches_buffered() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("000003.log");
        fs::write(&path, b"_file://\x00\x01k\x00\x01[1]").unwrap();

        let buffered = load_log(&path, false).unwrap();
        let mapped = load_log(&path, true).unwrap();
        assert_eq!(&buffered[..], &mapped[..]);
    }
}

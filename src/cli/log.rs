use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{wprint, wprintln};
use crate::storage::locator::{discover, targeted, LocatedEntry, OriginPrefix};
use crate::storage::value::ValueEncoding;
use crate::util::fs::load_log;
use crate::LsrError;

/// Options for the `lsrec log` subcommand.
pub struct LogOptions {
    /// Path to the log file.
    pub file: String,
    /// Origin whose keys to recover.
    pub origin: String,
    /// Restrict recovery to these keys (targeted mode).
    pub keys: Option<Vec<String>>,
    /// Show value offsets and detected encodings.
    pub verbose: bool,
    /// Emit output as JSON.
    pub json: bool,
    /// Use memory-mapped I/O.
    pub mmap: bool,
}

/// Top-level JSON output for a single-file scan.
#[derive(Serialize)]
struct LogReport<'a> {
    file: &'a str,
    file_size: usize,
    origin: &'a str,
    mode: &'static str,
    entry_count: usize,
    entries: Vec<EntryInfo>,
}

/// One recovered entry with its extraction detail.
#[derive(Serialize)]
struct EntryInfo {
    key: String,
    value: String,
    encoding: ValueEncoding,
    start: usize,
    end: usize,
}

pub fn execute(opts: &LogOptions, writer: &mut dyn Write) -> Result<(), LsrError> {
    let buf = load_log(Path::new(&opts.file), opts.mmap)?;
    let prefix = OriginPrefix::for_origin(&opts.origin);

    let (mode, entries): (&'static str, Vec<LocatedEntry>) = match &opts.keys {
        Some(keys) => ("targeted", targeted(&buf, &prefix, keys)),
        None => ("discovery", discover(&buf, &prefix)),
    };

    if opts.json {
        let report = LogReport {
            file: &opts.file,
            file_size: buf.len(),
            origin: &opts.origin,
            mode,
            entry_count: entries.len(),
            entries: entries
                .into_iter()
                .map(|e| EntryInfo {
                    key: e.key,
                    value: e.value.value,
                    encoding: e.value.encoding,
                    start: e.value.start,
                    end: e.value.end,
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| LsrError::Parse(format!("JSON serialization failed: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(
        writer,
        "File: {} ({} bytes, {} mode)",
        opts.file.bold(),
        buf.len(),
        mode
    )?;
    wprintln!(writer)?;
    for entry in &entries {
        wprint!(writer, "  {} = ", entry.key.cyan())?;
        wprintln!(writer, "{}", entry.value.value)?;
        if opts.verbose {
            wprintln!(
                writer,
                "    {}",
                format!(
                    "{}, bytes {}..{}",
                    entry.value.encoding.label(),
                    entry.value.start,
                    entry.value.end
                )
                .dimmed()
            )?;
        }
    }
    wprintln!(writer)?;
    wprintln!(
        writer,
        "Recovered {} key(s)",
        entries.len().to_string().green()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_log(contents: &[u8]) -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("000003.log");
        fs::write(&path, contents).unwrap();
        let path_str = path.to_str().unwrap().to_string();
        (dir, path_str)
    }

    #[test]
    fn test_log_discovery_json() {
        let (_dir, path) = write_log(b"_file://\x00\x01counter5_file://\x00\x01items[1,2,3]");
        let mut out = Vec::new();
        execute(
            &LogOptions {
                file: path,
                origin: "file://".to_string(),
                keys: None,
                verbose: false,
                json: true,
                mmap: false,
            },
            &mut out,
        )
        .unwrap();

        let report: serde_json::Value = serde_json::from_str(std::str::from_utf8(&out).unwrap()).unwrap();
        assert_eq!(report["mode"], "discovery");
        assert_eq!(report["entry_count"], 2);
        assert_eq!(report["entries"][0]["key"], "counter");
        assert_eq!(report["entries"][0]["encoding"], "utf8-number");
        assert_eq!(report["entries"][1]["value"], "[1,2,3]");
    }

    #[test]
    fn test_log_targeted_human_output() {
        let (_dir, path) = write_log(b"_file://\x00\x01name\x00\x01\"old\"__file://\x00\x01name\x00\x01\"new\"");
        let mut out = Vec::new();
        execute(
            &LogOptions {
                file: path,
                origin: "file://".to_string(),
                keys: Some(vec!["name".to_string()]),
                verbose: true,
                json: false,
                mmap: false,
            },
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"new\""));
        assert!(!text.contains("\"old\""));
        assert!(text.contains("utf-8 string"));
    }

    #[test]
    fn test_log_missing_file_is_error() {
        let mut out = Vec::new();
        let result = execute(
            &LogOptions {
                file: "/nonexistent/000003.log".to_string(),
                origin: "file://".to_string(),
                keys: None,
                verbose: false,
                json: false,
                mmap: false,
            },
            &mut out,
        );
        assert!(result.is_err());
    }
}

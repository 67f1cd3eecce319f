use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::cli::wprintln;
use crate::storage::locator::{decode_candidate_key, OriginPrefix};
use crate::storage::scan::find_first_from;
use crate::util::fs::read_file;
use crate::util::hex::{format_offset, hex_dump};
use crate::LsrError;

/// Bytes shown around each match in `--matches` mode.
const MATCH_WINDOW: usize = 96;

/// Default dump length in offset mode.
const DEFAULT_LENGTH: usize = 256;

/// Options for the `lsrec dump` subcommand.
pub struct DumpOptions {
    /// Path to the log file.
    pub file: String,
    /// Absolute byte offset to start dumping.
    pub offset: Option<u64>,
    /// Number of bytes to dump.
    pub length: Option<usize>,
    /// Dump a window around each origin-prefix match instead.
    pub matches: bool,
    /// Origin prefix to search for in `--matches` mode.
    pub origin: String,
}

pub fn execute(opts: &DumpOptions, writer: &mut dyn Write) -> Result<(), LsrError> {
    let buf = read_file(Path::new(&opts.file))?;

    if opts.matches {
        return dump_matches(&buf, opts, writer);
    }

    let offset = opts.offset.unwrap_or(0) as usize;
    if offset >= buf.len() {
        return Err(LsrError::Argument(format!(
            "Offset {} beyond end of file ({} bytes)",
            offset,
            buf.len()
        )));
    }
    let length = opts.length.unwrap_or(DEFAULT_LENGTH).min(buf.len() - offset);

    wprintln!(
        writer,
        "File: {} ({} bytes)",
        opts.file.bold(),
        buf.len()
    )?;
    wprintln!(writer)?;
    wprintln!(writer, "{}", hex_dump(&buf[offset..offset + length], offset as u64))?;
    Ok(())
}

/// Dump a window of bytes starting at each origin-prefix occurrence.
fn dump_matches(buf: &[u8], opts: &DumpOptions, writer: &mut dyn Write) -> Result<(), LsrError> {
    let prefix = OriginPrefix::for_origin(&opts.origin);
    let window = opts.length.unwrap_or(MATCH_WINDOW);

    wprintln!(
        writer,
        "File: {} ({} bytes), origin {}",
        opts.file.bold(),
        buf.len(),
        opts.origin
    )?;

    let mut count = 0;
    let mut from = 0;
    while let Some(at) = find_first_from(buf, prefix.as_bytes(), from) {
        from = at + 1;
        count += 1;

        wprintln!(writer)?;
        // Label the match with the key name the framing implies, when one
        // decodes; raw prefix hits with no key are still shown.
        match decode_candidate_key(buf, at + prefix.as_bytes().len()) {
            Some(key) => wprintln!(
                writer,
                "Match {} at {}  key: {}",
                count,
                format_offset(at as u64).cyan(),
                key
            )?,
            None => wprintln!(writer, "Match {} at {}", count, format_offset(at as u64).cyan())?,
        }

        let end = (at + window).min(buf.len());
        wprintln!(writer, "{}", hex_dump(&buf[at..end], at as u64))?;
    }

    wprintln!(writer)?;
    wprintln!(writer, "{} match(es)", count.to_string().green())?;
    Ok(())
}

//! Value encoding detection and exact span extraction.
//!
//! A located key tells us where a value *starts*, but the log carries no
//! usable length prefix, so the value's end must be inferred from its shape.
//! Legacy WebViews wrote localStorage values in one of several ad-hoc text
//! representations: UTF-8 JSON (object/array), UTF-8 numeric scalars, UTF-8
//! JSON strings, and UTF-16LE JSON. [`extract_value`] tries the UTF-8 shapes
//! first; the UTF-16LE path runs only when no UTF-8 value start appears
//! within the lookahead window, or when the start byte carries the zero
//! high byte that marks ASCII-in-UTF-16.
//!
//! Every scan is bounded: [`MAX_UTF8_SCAN`] and [`MAX_UTF16_SCAN`] cap how
//! far a single boundary scan may walk. Hitting a ceiling drops the value
//! entirely — a truncated value would be indistinguishable from a complete
//! one to the caller.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::storage::constants::*;

/// Encoding shape detected for an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueEncoding {
    /// Pure ASCII digit run (e.g. a counter).
    Utf8Number,
    /// Bracket-balanced JSON object or array in UTF-8.
    Utf8Json,
    /// Double-quoted JSON string in UTF-8, quotes included in the span.
    Utf8String,
    /// Bracket-balanced JSON in UTF-16LE code units.
    Utf16Le,
}

impl ValueEncoding {
    /// Human-readable label for CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            ValueEncoding::Utf8Number => "utf-8 number",
            ValueEncoding::Utf8Json => "utf-8 json",
            ValueEncoding::Utf8String => "utf-8 string",
            ValueEncoding::Utf16Le => "utf-16le json",
        }
    }
}

/// A decoded value and the exact byte span it occupied in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedValue {
    /// The decoded value text. JSON values keep their exact source bytes
    /// (quotes, whitespace, escapes) — no re-serialization happens here.
    pub value: String,
    /// Detected encoding shape.
    pub encoding: ValueEncoding,
    /// Offset of the first value byte in the scanned buffer.
    pub start: usize,
    /// Offset one past the last value byte.
    pub end: usize,
}

/// Extract the value that follows a matched key at `start`.
///
/// `start` points immediately past the key pattern. Returns `None` when no
/// decodable value shape is found — a normal outcome for keys whose record
/// was truncated, compacted away, or corrupted, never an error.
///
/// # Examples
///
/// ```
/// use lsr::storage::value::{extract_value, ValueEncoding};
///
/// let buf = b"\x00\x01[1,2,3]trailing";
/// let v = extract_value(buf, 0).unwrap();
/// assert_eq!(v.value, "[1,2,3]");
/// assert_eq!(v.encoding, ValueEncoding::Utf8Json);
/// ```
pub fn extract_value(buf: &[u8], start: usize) -> Option<ExtractedValue> {
    // Skip inter-field separator bytes between key and value.
    let mut pos = start;
    while pos < buf.len() && (buf[pos] == 0x00 || buf[pos] == 0x01) {
        pos += 1;
    }

    // Look for a UTF-8 value start within the lookahead window.
    let window_end = (pos + VALUE_SCAN_WINDOW).min(buf.len());
    let value_start = buf[pos..window_end]
        .iter()
        .position(|&b| matches!(b, b'[' | b'{' | b'"' | b'0'..=b'9'))
        .map(|off| pos + off);

    match value_start {
        // A bracket with a zero high byte is ASCII-in-UTF-16, not UTF-8:
        // decoding it bytewise would interleave NULs through the value.
        Some(vs) if matches!(buf[vs], b'[' | b'{') && buf.get(vs + 1) == Some(&0x00) => {
            extract_utf16le(buf, vs)
        }
        Some(vs) => extract_utf8(buf, vs),
        // No UTF-8 shape in the window: the value may still be UTF-16LE.
        None => extract_utf16le(buf, pos),
    }
}

/// Dispatch on the UTF-8 value-start byte and extract the span.
fn extract_utf8(buf: &[u8], vs: usize) -> Option<ExtractedValue> {
    let (end, encoding) = match buf[vs] {
        b'0'..=b'9' => {
            let run = buf[vs..].iter().take_while(|b| b.is_ascii_digit()).count();
            (vs + run, ValueEncoding::Utf8Number)
        }
        b'"' => (scan_quoted(buf, vs)?, ValueEncoding::Utf8String),
        _ => (scan_balanced(buf, vs)?, ValueEncoding::Utf8Json),
    };

    let value = std::str::from_utf8(&buf[vs..end]).ok()?.to_string();
    Some(ExtractedValue {
        value,
        encoding,
        start: vs,
        end,
    })
}

/// Walk a bracketed UTF-8 span until nesting depth returns to zero.
///
/// Brackets inside string literals do not count toward the depth; a `"` not
/// preceded by an unescaped backslash toggles the in-string flag. Returns
/// the end offset (exclusive), or `None` if the span never balances within
/// [`MAX_UTF8_SCAN`] bytes.
fn scan_balanced(buf: &[u8], vs: usize) -> Option<usize> {
    let limit = buf.len().min(vs + MAX_UTF8_SCAN);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in buf[vs..limit].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'[' | b'{' => depth += 1,
                b']' | b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(vs + i + 1);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// Walk a double-quoted UTF-8 string span, honoring backslash escapes.
fn scan_quoted(buf: &[u8], vs: usize) -> Option<usize> {
    let limit = buf.len().min(vs + MAX_UTF8_SCAN);
    let mut escaped = false;

    for (i, &b) in buf[vs + 1..limit].iter().enumerate() {
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b'"' {
            return Some(vs + 1 + i + 1);
        }
    }
    None
}

/// UTF-16LE fallback: locate and walk a bracketed span two bytes at a time.
///
/// A code unit whose low byte is `[` or `{` with a zero high byte marks the
/// value start (pure ASCII encoded as UTF-16). Every subsequent unit must
/// also have a zero high byte; anything else aborts the scan — the
/// heuristic only handles ASCII-in-UTF-16 payloads.
fn extract_utf16le(buf: &[u8], from: usize) -> Option<ExtractedValue> {
    let window_end = (from + VALUE_SCAN_WINDOW).min(buf.len());
    let mut vs = None;
    let mut i = from;
    while i + 2 <= window_end {
        if buf[i + 1] == 0x00 && matches!(buf[i], b'[' | b'{') {
            vs = Some(i);
            break;
        }
        i += 2;
    }
    let vs = vs?;

    let limit = buf.len().min(vs + MAX_UTF16_SCAN);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;
    let mut i = vs;
    while i + 2 <= limit {
        let lo = buf[i];
        if buf[i + 1] != 0x00 {
            return None;
        }
        if in_string {
            if escaped {
                escaped = false;
            } else if lo == b'\\' {
                escaped = true;
            } else if lo == b'"' {
                in_string = false;
            }
        } else {
            match lo {
                b'"' => in_string = true,
                b'[' | b'{' => depth += 1,
                b']' | b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        end = Some(i + 2);
                        break;
                    }
                }
                _ => {}
            }
        }
        i += 2;
    }
    let end = end?;

    let units: Vec<u16> = buf[vs..end]
        .chunks_exact(2)
        .map(LittleEndian::read_u16)
        .collect();
    let value = String::from_utf16(&units).ok()?;
    Some(ExtractedValue {
        value,
        encoding: ValueEncoding::Utf16Le,
        start: vs,
        end,
    })
}

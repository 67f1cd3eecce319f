//! Hex dump formatting for log inspection.
//!
//! The `dump` subcommand renders raw log bytes with an ASCII sidebar tuned
//! to the map-key framing: the 0x00/0x01 separator bytes that delimit
//! origins, keys, and values are shown as `·`, so record boundaries stand
//! out from ordinary unprintable noise.

const BYTES_PER_LINE: usize = 16;

/// Format a byte offset as "0xhex (decimal)".
pub fn format_offset(offset: u64) -> String {
    format!("0x{offset:x} ({offset})")
}

/// Sidebar rendering for one byte: printable ASCII verbatim, the framing
/// separators as `·`, everything else as `.`.
fn sidebar_char(b: &u8) -> char {
    match *b {
        0x00 | 0x01 => '·',
        b if b.is_ascii_graphic() || b == b' ' => b as char,
        _ => '.',
    }
}

/// Produce a hex dump of `data` with the given `base_offset`.
///
/// 16 bytes per line in two groups of eight, with the framing-aware ASCII
/// sidebar:
///
/// ```text
/// 00000000  5f 66 69 6c 65 3a 2f 2f  00 01 63 6f 75 6e 74 65  |_file://··counte|
/// ```
pub fn hex_dump(data: &[u8], base_offset: u64) -> String {
    let mut lines = Vec::new();

    for (i, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let split = hex.len().min(BYTES_PER_LINE / 2);
        let ascii: String = chunk.iter().map(sidebar_char).collect();

        lines.push(format!(
            "{:08x}  {:<23}  {:<23}  |{:<16}|",
            base_offset + (i * BYTES_PER_LINE) as u64,
            hex[..split].join(" "),
            hex[split..].join(" "),
            ascii,
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(255), "0xff (255)");
        assert_eq!(format_offset(0), "0x0 (0)");
    }

    #[test]
    fn test_hex_dump_full_line() {
        let data: Vec<u8> = (0..16).collect();
        let output = hex_dump(&data, 0);
        assert!(output.starts_with("00000000  "));
        assert!(output.contains("00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f"));
        // 0x00 and 0x01 render as separators, the rest as noise.
        assert!(output.contains("|··.............."));
    }

    #[test]
    fn test_hex_dump_partial_line_pads_columns() {
        let data = vec![0x48, 0x65, 0x6c, 0x6c, 0x6f]; // "Hello"
        let output = hex_dump(&data, 0x100);
        assert!(output.starts_with("00000100  "));
        assert!(output.contains("48 65 6c 6c 6f"));
        assert!(output.contains("|Hello           |"));
    }

    #[test]
    fn test_hex_dump_map_key_framing() {
        let data = b"_file://\x00\x01counter";
        let output = hex_dump(data, 0);
        assert!(output.contains("|_file://··counte"));
    }

    #[test]
    fn test_hex_dump_empty_input() {
        assert_eq!(hex_dump(&[], 0), "");
    }
}

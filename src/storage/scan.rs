//! Byte-pattern search primitives.
//!
//! The recovery engine never trusts record framing in the scanned buffer, so
//! everything upstream reduces to two exact-match searches: the leftmost
//! occurrence of a pattern at or after an offset, and the rightmost
//! occurrence in the whole buffer. The rightmost search is what gives the
//! engine its last-write-wins behavior over an append-only log.

/// Find the leftmost exact match of `pattern` in `buf` at or after `from`.
///
/// Returns the offset of the first matching byte, or `None` when the pattern
/// is empty, `from` is out of range, or no match exists.
///
/// # Examples
///
/// ```
/// use lsr::storage::scan::find_first_from;
///
/// let buf = b"abcabc";
/// assert_eq!(find_first_from(buf, b"abc", 0), Some(0));
/// assert_eq!(find_first_from(buf, b"abc", 1), Some(3));
/// assert_eq!(find_first_from(buf, b"abc", 4), None);
/// ```
pub fn find_first_from(buf: &[u8], pattern: &[u8], from: usize) -> Option<usize> {
    if pattern.is_empty() || from >= buf.len() || buf.len() - from < pattern.len() {
        return None;
    }
    buf[from..]
        .windows(pattern.len())
        .position(|w| w == pattern)
        .map(|pos| from + pos)
}

/// Find the rightmost exact match of `pattern` anywhere in `buf`.
///
/// In an append-only log the rightmost match for a key is the most recent
/// write, so this is the anchor used for value extraction.
///
/// # Examples
///
/// ```
/// use lsr::storage::scan::find_last;
///
/// assert_eq!(find_last(b"abcabc", b"abc"), Some(3));
/// assert_eq!(find_last(b"abcabc", b"xyz"), None);
/// ```
pub fn find_last(buf: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() || buf.len() < pattern.len() {
        return None;
    }
    buf.windows(pattern.len()).rposition(|w| w == pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_from_start() {
        assert_eq!(find_first_from(b"hello world", b"world", 0), Some(6));
        assert_eq!(find_first_from(b"hello world", b"hello", 0), Some(0));
    }

    #[test]
    fn test_find_first_from_offset_skips_earlier_match() {
        let buf = b"key=1;key=2";
        assert_eq!(find_first_from(buf, b"key", 0), Some(0));
        assert_eq!(find_first_from(buf, b"key", 1), Some(6));
        assert_eq!(find_first_from(buf, b"key", 7), None);
    }

    #[test]
    fn test_find_first_from_overlapping_matches() {
        // Successive searches starting one byte past the previous match must
        // still see overlapping occurrences.
        let buf = b"aaaa";
        assert_eq!(find_first_from(buf, b"aa", 0), Some(0));
        assert_eq!(find_first_from(buf, b"aa", 1), Some(1));
        assert_eq!(find_first_from(buf, b"aa", 2), Some(2));
        assert_eq!(find_first_from(buf, b"aa", 3), None);
    }

    #[test]
    fn test_find_first_from_empty_pattern() {
        assert_eq!(find_first_from(b"abc", b"", 0), None);
    }

    #[test]
    fn test_find_first_from_out_of_range() {
        assert_eq!(find_first_from(b"abc", b"a", 3), None);
        assert_eq!(find_first_from(b"abc", b"abcd", 0), None);
        assert_eq!(find_first_from(b"", b"a", 0), None);
    }

    #[test]
    fn test_find_first_pattern_with_interior_nulls() {
        let buf = b"x\x00\x01y\x00\x01";
        assert_eq!(find_first_from(buf, b"\x00\x01", 0), Some(1));
        assert_eq!(find_first_from(buf, b"\x00\x01", 2), Some(4));
    }

    #[test]
    fn test_find_last_picks_rightmost() {
        assert_eq!(find_last(b"abcabcabc", b"abc"), Some(6));
        assert_eq!(find_last(b"abc", b"abc"), Some(0));
    }

    #[test]
    fn test_find_last_no_match() {
        assert_eq!(find_last(b"abc", b"zzz"), None);
        assert_eq!(find_last(b"ab", b"abc"), None);
        assert_eq!(find_last(b"", b"a"), None);
    }

    #[test]
    fn test_find_last_empty_pattern() {
        assert_eq!(find_last(b"abc", b""), None);
    }

    #[test]
    fn test_find_last_at_buffer_end() {
        assert_eq!(find_last(b"xxabc", b"abc"), Some(2));
    }
}

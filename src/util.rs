//! Text helpers shared across the crate.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from a `<meta charset>` or the
///    caller)
/// 3. Falls back to Windows-1252 (common in pasted legacy markup)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the charset named by a `<meta charset=...>` tag near the start of
/// an HTML document.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(1024);
    let prefix = &bytes[..check_len];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let after = &prefix[pos + 8..];
    let after = after.strip_prefix(b"\"").or_else(|| after.strip_prefix(b"'")).unwrap_or(after);
    let end = after
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b' ' | b'>' | b'/' | b';'))
        .unwrap_or(after.len());

    std::str::from_utf8(&after[..end]).ok().filter(|s| !s.is_empty())
}

/// Number of chars (Unicode scalar values) in a string.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the `chars`-th char, clamped to the string length.
pub fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

/// Whitespace-only (or empty) text, using the Unicode White_Space property.
pub fn is_whitespace_only(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

//! Byte decoding helpers for input pages.

use std::borrow::Cow;

/// How far into a page to look for an encoding declaration.
const SNIFF_LEN: usize = 1024;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<meta charset>` or `<?xml encoding="..."?>`)
/// 3. Falls back to Windows-1252 (common in old help-center exports)
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

/// Find the declared character encoding of an HTML or XHTML page.
///
/// Checks the XML declaration first, then `<meta charset=...>` and the
/// `charset=` parameter of a `<meta http-equiv="Content-Type">`.
pub fn sniff_charset(bytes: &[u8]) -> Option<&str> {
    extract_xml_encoding(bytes).or_else(|| extract_meta_charset(bytes))
}

/// Extract encoding from an XML declaration (`<?xml version="1.0" encoding="..."?>`).
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(100);
    let prefix = &bytes[..check_len];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    quoted_value(&after_xml[enc_pos + 9..])
}

/// Extract the `charset=` value from the first `<meta>` that declares one.
fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];

    let mut rest = prefix;
    while let Some(meta) = rest.windows(5).position(|w| w.eq_ignore_ascii_case(b"<meta")) {
        let tag = &rest[meta..];
        let end = tag.iter().position(|&b| b == b'>').unwrap_or(tag.len());
        let tag = &tag[..end];

        if let Some(pos) = tag
            .windows(8)
            .position(|w| w.eq_ignore_ascii_case(b"charset="))
        {
            let value = &tag[pos + 8..];
            return quoted_value(value).or_else(|| bare_value(value));
        }
        rest = &rest[meta + 5..];
    }
    None
}

fn quoted_value(bytes: &[u8]) -> Option<&str> {
    let quote = *bytes.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let len = bytes[1..].iter().position(|&b| b == quote)?;
    std::str::from_utf8(&bytes[1..1 + len]).ok()
}

fn bare_value(bytes: &[u8]) -> Option<&str> {
    let len = bytes
        .iter()
        .position(|&b| b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b';' | b'/' | b'>'))
        .unwrap_or(bytes.len());
    (len > 0)
        .then(|| std::str::from_utf8(&bytes[..len]).ok())
        .flatten()
}

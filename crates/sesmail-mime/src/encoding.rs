//! MIME transfer and header encodings.
//!
//! Supports Base64, Quoted-Printable, RFC 2047 header encoding and
//! RFC 2231 parameter values.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::Write as _;

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Maximum line length for Quoted-Printable encoding.
const MAX_LINE_LENGTH: usize = 76;

/// Encodes text using Quoted-Printable encoding (RFC 2045).
///
/// Line breaks in the input (`\n` or `\r\n`) are emitted as hard CRLF
/// breaks. Long lines are wrapped with `=` soft breaks, and whitespace at
/// the end of a line is escaped so transports cannot strip it.
#[must_use]
pub fn encode_quoted_printable(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        match line.strip_suffix('\n') {
            Some(line) => {
                let line = line.strip_suffix('\r').unwrap_or(line);
                encode_qp_line(line.as_bytes(), &mut result);
                result.push_str("\r\n");
            }
            // A CR with no LF after it is data, not a line break
            None => encode_qp_line(line.as_bytes(), &mut result),
        }
    }

    result
}

fn encode_qp_line(line: &[u8], out: &mut String) {
    let mut line_length = 0;

    for (index, byte) in line.iter().enumerate() {
        let last = index + 1 == line.len();
        let literal = match byte {
            b'!'..=b'<' | b'>'..=b'~' => true,
            b' ' | b'\t' => !last,
            _ => false,
        };
        let width = if literal { 1 } else { 3 };

        // Leave room for the trailing '=' of a soft break
        if line_length + width > MAX_LINE_LENGTH - 1 {
            out.push_str("=\r\n");
            line_length = 0;
        }

        if literal {
            out.push(char::from(*byte));
        } else {
            let _ = write!(out, "={byte:02X}");
        }
        line_length += width;
    }
}

/// Decodes Quoted-Printable text (RFC 2045).
///
/// # Errors
///
/// Returns an error if the input contains invalid escape sequences or
/// the decoded bytes are not UTF-8.
pub fn decode_quoted_printable(text: &str) -> Result<String> {
    let mut result = Vec::with_capacity(text.len());
    let mut bytes = text.bytes().peekable();

    while let Some(byte) = bytes.next() {
        if byte != b'=' {
            result.push(byte);
            continue;
        }

        // Soft line break
        if bytes.peek() == Some(&b'\r') {
            bytes.next();
            if bytes.peek() == Some(&b'\n') {
                bytes.next();
            }
            continue;
        } else if bytes.peek() == Some(&b'\n') {
            bytes.next();
            continue;
        }

        let hex: Vec<u8> = bytes.by_ref().take(2).collect();
        if hex.len() != 2 {
            return Err(Error::InvalidEncoding(
                "Incomplete escape sequence".to_string(),
            ));
        }
        let hex = std::str::from_utf8(&hex)
            .map_err(|e| Error::InvalidEncoding(format!("Invalid hex: {e}")))?;
        let decoded = u8::from_str_radix(hex, 16)
            .map_err(|e| Error::InvalidEncoding(format!("Invalid hex: {e}")))?;
        result.push(decoded);
    }

    String::from_utf8(result).map_err(Into::into)
}

/// Longest encoded word RFC 2047 allows.
const MAX_ENCODED_WORD: usize = 75;

/// Longest RFC 2231 continuation segment.
const MAX_PARAMETER_SEGMENT: usize = 60;

/// Encodes a header value using RFC 2047 encoding when it is not plain ASCII.
///
/// Format: `=?charset?B?encoded-text?=`. The text is split on character
/// boundaries so no word exceeds 75 characters; words are joined with
/// CRLF-space folding.
#[must_use]
pub fn encode_rfc2047(text: &str, charset: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    // "=?" + charset + "?B?" + "?="
    let overhead = charset.len() + 7;
    let max_bytes = (MAX_ENCODED_WORD.saturating_sub(overhead) / 4 * 3).max(4);

    let mut words = Vec::new();
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if index > start && index + c.len_utf8() - start > max_bytes {
            words.push(&text[start..index]);
            start = index;
        }
    }
    words.push(&text[start..]);

    words
        .iter()
        .map(|word| format!("=?{charset}?B?{}?=", encode_base64(word.as_bytes())))
        .collect::<Vec<_>>()
        .join("\r\n ")
}

const fn is_attribute_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
}

/// Percent-encodes a parameter value as RFC 2231 extended segments.
///
/// The first segment carries the `charset''` prefix. Escapes are never
/// split across segments, and each segment is at most 60 characters.
#[must_use]
pub fn encode_rfc2231(value: &str, charset: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = format!("{charset}''");
    let mut fresh = true;

    for byte in value.bytes() {
        let token = if is_attribute_char(byte) {
            char::from(byte).to_string()
        } else {
            format!("%{byte:02X}")
        };
        if !fresh && current.len() + token.len() > MAX_PARAMETER_SEGMENT {
            segments.push(std::mem::take(&mut current));
        }
        current.push_str(&token);
        fresh = false;
    }
    segments.push(current);

    segments
}

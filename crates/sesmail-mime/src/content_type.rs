//! MIME content type handling.

use crate::encoding::encode_rfc2231;
use std::fmt;

/// MIME content type with ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Main type (e.g., "text", "image", "multipart").
    pub main_type: String,
    /// Subtype (e.g., "plain", "html", "jpeg").
    pub sub_type: String,
    /// Parameters in render order (e.g., charset, boundary, name).
    pub parameters: Vec<(String, String)>,
}

impl ContentType {
    /// Creates a new content type.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: Vec::new(),
        }
    }

    /// Creates a content type from a caller-supplied `type/subtype` string.
    ///
    /// The value renders as given, even without a `/`. Only an empty
    /// string falls back to `application/octet-stream`.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim();
        if mime.is_empty() {
            return Self::new("application", "octet-stream");
        }
        mime.split_once('/')
            .map_or_else(|| Self::new(mime, ""), |(main, sub)| Self::new(main, sub))
    }

    /// `text/plain; charset="us-ascii"`.
    #[must_use]
    pub fn text_plain() -> Self {
        Self::new("text", "plain").with_parameter("charset", "us-ascii")
    }

    /// `text/html; charset="iso-8859-1"`.
    #[must_use]
    pub fn text_html() -> Self {
        Self::new("text", "html").with_parameter("charset", "iso-8859-1")
    }

    /// Creates a multipart/mixed content type with boundary.
    #[must_use]
    pub fn multipart_mixed(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "mixed").with_parameter("boundary", boundary)
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }
}

/// Renders one `key=value` parameter.
///
/// ASCII values are quoted. Anything else uses RFC 2231 extended notation,
/// split into `key*N*` continuations on folded lines when long.
pub(crate) fn format_parameter(key: &str, value: &str) -> String {
    if value.is_ascii() {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        return format!("{key}=\"{escaped}\"");
    }

    let segments = encode_rfc2231(value, "utf-8");
    if let [single] = segments.as_slice() {
        return format!("{key}*={single}");
    }
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| format!("{key}*{i}*={segment}"))
        .collect::<Vec<_>>()
        .join(";\r\n\t")
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = &self.main_type;
        let sub = &self.sub_type;
        if sub.is_empty() {
            write!(f, "{main}")?;
        } else {
            write!(f, "{main}/{sub}")?;
        }

        for (key, value) in &self.parameters {
            write!(f, "; {}", format_parameter(key, value))?;
        }

        Ok(())
    }
}

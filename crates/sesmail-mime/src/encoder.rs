//! Multipart MIME generation for [`Message`].

use crate::content_type::{ContentType, format_parameter};
use crate::encoding::{encode_base64, encode_quoted_printable, encode_rfc2047};
use crate::error::Result;
use crate::header::{Headers, sanitize_value};
use crate::message::{Attachment, Message};
use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;

/// Prefix of every generated multipart boundary.
pub const BOUNDARY_PREFIX: &str = "_Part_0_";

/// Base64 bodies are wrapped to this many characters per line.
const BASE64_LINE_LENGTH: usize = 76;

/// Formats a timestamp as RFC 1123 with a numeric zone
/// (`Mon, 02 Jan 2006 15:04:05 +0000`).
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}

/// Per-encoding inputs: the multipart boundary, the Message-ID token and
/// the timestamp stamped on attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeParams {
    boundary: String,
    message_id: String,
    timestamp: DateTime<Utc>,
}

impl EncodeParams {
    /// Creates parameters from explicit tokens.
    #[must_use]
    pub fn new(
        boundary_token: &str,
        message_id_token: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            boundary: format!("{BOUNDARY_PREFIX}{boundary_token}"),
            message_id: message_id_token.into(),
            timestamp,
        }
    }

    /// Creates parameters with two fresh random tokens and the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the system entropy source fails.
    pub fn generate() -> Result<Self> {
        let boundary_token = random_token()?;
        let message_id_token = random_token()?;
        Ok(Self::new(&boundary_token, message_id_token, Utc::now()))
    }

    /// The full boundary string, including [`BOUNDARY_PREFIX`].
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The `Message-ID` header value, `<token@message>`.
    #[must_use]
    pub fn message_id(&self) -> String {
        format!("<{}@message>", self.message_id)
    }

    /// The timestamp used for attachment dates.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Renders 16 bytes from the OS entropy source as a v4 UUID string.
fn random_token() -> Result<String> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string())
}

impl Message {
    /// Encodes the message as a `multipart/mixed` MIME document with a
    /// fresh boundary, Message-ID and timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error only if random identifier generation fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let params = EncodeParams::generate()?;
        Ok(self.encode(&params))
    }

    /// Encodes the message with caller-supplied parameters.
    ///
    /// Output is fully determined by the message and `params`.
    #[must_use]
    pub fn encode(&self, params: &EncodeParams) -> Vec<u8> {
        let boundary = params.boundary();
        let mut out = String::new();

        let headers = Headers::new()
            .with("From", encode_address(&sanitize_value(&self.from)))
            .with("To", encode_address(&sanitize_value(&self.to)))
            .with("Subject", encode_rfc2047(&sanitize_value(&self.subject), "utf-8"))
            .with("MIME-Version", "1.0")
            .with("Message-ID", params.message_id())
            .with("Content-Type", ContentType::multipart_mixed(boundary).to_string());
        out.push_str(&headers.to_string());
        out.push_str("\r\n");

        if !self.text.is_empty() {
            push_text_part(&mut out, boundary, ContentType::text_plain(), &self.text);
        }

        if !self.html.is_empty() {
            push_text_part(&mut out, boundary, ContentType::text_html(), &self.html);
        }

        let timestamp = format_timestamp(params.timestamp());
        for attachment in &self.attachments {
            push_attachment_part(&mut out, boundary, attachment, &timestamp);
        }

        // Closing delimiter without the trailing "--"
        push_delimiter(&mut out, boundary);

        out.into_bytes()
    }
}

/// RFC 2047 encodes the display name of a `Name <addr>` value when it is
/// not ASCII. The address itself is left alone.
fn encode_address(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    match value.rfind('<') {
        Some(index) if value.ends_with('>') => {
            let name = value[..index].trim().trim_matches('"');
            if name.is_empty() {
                value.to_string()
            } else {
                format!("{} {}", encode_rfc2047(name, "utf-8"), &value[index..])
            }
        }
        _ => value.to_string(),
    }
}

fn push_delimiter(out: &mut String, boundary: &str) {
    out.push_str("--");
    out.push_str(boundary);
    out.push_str("\r\n");
}

fn push_text_part(out: &mut String, boundary: &str, content_type: ContentType, body: &str) {
    push_delimiter(out, boundary);

    let headers = Headers::new()
        .with("Content-Type", content_type.to_string())
        .with("Content-Transfer-Encoding", "quoted-printable");
    out.push_str(&headers.to_string());
    out.push_str("\r\n");
    out.push_str(&encode_quoted_printable(body));
    out.push_str("\r\n\r\n");
}

fn push_attachment_part(out: &mut String, boundary: &str, attachment: &Attachment, timestamp: &str) {
    push_delimiter(out, boundary);

    let encoded = encode_base64(&attachment.content);
    let name = sanitize_value(&attachment.name);
    let content_type = ContentType::from_mime(&sanitize_value(&attachment.content_type))
        .with_parameter("name", name.clone());
    let disposition = format!(
        "attachment; {}; size={};\r\n\tcreation-date=\"{timestamp}\";\r\n\tmodification-date=\"{timestamp}\"",
        format_parameter("filename", &name),
        encoded.len(),
    );

    let headers = Headers::new()
        .with("Content-Type", content_type.to_string())
        .with("Content-Description", encode_rfc2047(&name, "utf-8"))
        .with("Content-Disposition", disposition)
        .with("Content-Transfer-Encoding", "base64");
    out.push_str(&headers.to_string());
    out.push_str("\r\n");

    // Base64 output is ASCII, so any byte index is a char boundary
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(BASE64_LINE_LENGTH));
        out.push_str(line);
        out.push_str("\r\n");
        rest = tail;
    }
    out.push_str("\r\n");
}

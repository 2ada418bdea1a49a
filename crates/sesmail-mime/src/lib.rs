//! # sesmail-mime
//!
//! MIME generation for raw outgoing email.
//!
//! ## Features
//!
//! - **Message model**: sender, recipient, subject, text/HTML bodies, attachments
//! - **Multipart generation**: `multipart/mixed` documents with random boundaries
//! - **Encoding**: Base64, Quoted-Printable, RFC 2047 header encoding
//!
//! ## Quick Start
//!
//! ```ignore
//! use sesmail_mime::{Attachment, Message};
//!
//! let report = Attachment::new(std::fs::read("report.pdf")?, "application/pdf", "report.pdf");
//!
//! let message = Message::new(
//!     "sender@example.com",
//!     "recipient@example.com",
//!     "Monthly report",
//!     "<p>Report attached.</p>",
//!     "Report attached.",
//!     [report],
//! );
//!
//! // Fresh boundary and Message-ID on every call
//! let raw: Vec<u8> = message.to_bytes()?;
//! ```
//!
//! ### Reproducible output
//!
//! ```ignore
//! use sesmail_mime::EncodeParams;
//!
//! let params = EncodeParams::new("boundary-token", "id-token", chrono::Utc::now());
//! let raw = message.encode(&params);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod encoder;
mod error;
mod header;
mod message;

pub mod encoding;

pub use content_type::ContentType;
pub use encoder::{BOUNDARY_PREFIX, EncodeParams, format_timestamp};
pub use error::{Error, Result};
pub use header::Headers;
pub use message::{Attachment, Message};

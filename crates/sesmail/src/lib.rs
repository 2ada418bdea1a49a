//! # sesmail
//!
//! Client for the `SendRawEmail` action of an SES-style email API.
//!
//! ## Features
//!
//! - **MIME generation**: re-exports [`Message`] and [`Attachment`] from `sesmail-mime`
//! - **Signing**: `AWS3-HTTPS` HMAC-SHA256 authorization header
//! - **Transport**: signed form POST over `reqwest`, optional timeout and cancellation
//! - **Responses**: success receipts and service `ErrorResponse` documents
//!
//! ## Quick Start
//!
//! ```ignore
//! use sesmail::{Config, Credentials, Message, SesClient};
//!
//! #[tokio::main]
//! async fn main() -> sesmail::Result<()> {
//!     let credentials = Credentials::new("AKIDEXAMPLE", "secret");
//!     let config = Config::builder(Config::regional_endpoint("us-east-1"), credentials)
//!         .timeout(std::time::Duration::from_secs(30))
//!         .build()?;
//!     let client = SesClient::new(config)?;
//!
//!     let message = Message::new("a@example.com", "b@example.com", "Hi", "", "hello", []);
//!     let receipt = client.send(&message).await?;
//!     println!("Accepted as {:?}", receipt.message_id);
//!     Ok(())
//! }
//! ```
//!
//! ### One-shot sending
//!
//! ```ignore
//! sesmail::send(&message, "https://email.us-east-1.amazonaws.com/", "AKID", "secret").await?;
//! ```
//!
//! ## Request Flow
//!
//! ```text
//! Message ──to_bytes()──→ MIME bytes ──base64 + form──→ POST (Date, X-Amzn-Authorization)
//!                                                        │
//!                                  SendReceipt / Error ←─┘ XML root element
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
pub mod config;
mod error;
pub mod response;
pub mod signing;

pub use client::{ACTION, FORM_CONTENT_TYPE, SesClient, form_body, send};
pub use config::{Config, ConfigBuilder, Credentials};
pub use error::{Error, Result};
pub use response::SendReceipt;
pub use sesmail_mime::{Attachment, EncodeParams, Message};
pub use tokio_util::sync::CancellationToken;

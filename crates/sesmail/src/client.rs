//! Raw-message transport client.

use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::response::{SendReceipt, parse_response};
use crate::signing::{self, AUTHORIZATION_HEADER};
use chrono::Utc;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, DATE};
use sesmail_mime::encoding::encode_base64;
use sesmail_mime::{Message, format_timestamp};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::form_urlencoded;

/// `Action` parameter of every request.
pub const ACTION: &str = "SendRawEmail";

/// Content type of the request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Builds the form body: `AWSAccessKeyId`, `Action`, `Timestamp`,
/// `RawMessage.Data`, in that order.
#[must_use]
pub fn form_body(access_key: &str, timestamp: &str, raw_message: &[u8]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("AWSAccessKeyId", access_key)
        .append_pair("Action", ACTION)
        .append_pair("Timestamp", timestamp)
        .append_pair("RawMessage.Data", &encode_base64(raw_message))
        .finish()
}

/// Client for the `SendRawEmail` endpoint.
///
/// Holds no per-send state; one client can serve concurrent sends.
#[derive(Debug, Clone)]
pub struct SesClient {
    config: Config,
    http_client: Client,
}

impl SesClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            config,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes and sends a message.
    ///
    /// Each call generates a new boundary, Message-ID and timestamp. No
    /// retry is attempted on any failure.
    ///
    /// # Errors
    ///
    /// Returns an error if MIME generation, the HTTP exchange, or response
    /// parsing fails, or if the service rejects the message.
    pub async fn send(&self, message: &Message) -> Result<SendReceipt> {
        let raw = message.to_bytes()?;
        self.send_raw(&raw).await
    }

    /// Sends a message, giving up with [`Error::Cancelled`] as soon as
    /// `token` is cancelled.
    ///
    /// # Errors
    ///
    /// Same as [`SesClient::send`], plus [`Error::Cancelled`].
    pub async fn send_with_cancel(
        &self,
        message: &Message,
        token: &CancellationToken,
    ) -> Result<SendReceipt> {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("Send cancelled");
                Err(Error::Cancelled)
            }
            result = self.send(message) => result,
        }
    }

    /// Sends an already encoded MIME document.
    ///
    /// # Errors
    ///
    /// Returns an error if signing, the HTTP exchange, or response parsing
    /// fails, or if the service rejects the message.
    pub async fn send_raw(&self, raw_message: &[u8]) -> Result<SendReceipt> {
        // One timestamp for both the Date header and the signed parameter
        let timestamp = format_timestamp(Utc::now());
        let credentials = &self.config.credentials;
        let authorization = signing::sign(credentials, &timestamp)?;
        let body = form_body(credentials.access_key(), &timestamp, raw_message);

        debug!(
            endpoint = %self.config.endpoint,
            raw_size = raw_message.len(),
            body_size = body.len(),
            "Posting raw message"
        );

        let response = self
            .http_client
            .post(self.config.endpoint.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(DATE, timestamp.as_str())
            .header(AUTHORIZATION_HEADER, authorization)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        debug!(status, response_size = bytes.len(), "Received response");

        let result = parse_response(status, &bytes);
        match &result {
            Ok(receipt) => info!(
                status,
                message_id = receipt.message_id.as_deref().unwrap_or("-"),
                "Message accepted"
            ),
            Err(e) => warn!(status, error = %e, "Send failed"),
        }
        result
    }
}

/// Sends `message` to `endpoint` with a one-off client.
///
/// # Errors
///
/// Returns an error if the endpoint is invalid or the send fails.
pub async fn send(
    message: &Message,
    endpoint: &str,
    access_key: &str,
    secret_key: &str,
) -> Result<SendReceipt> {
    let config = Config::new(endpoint, Credentials::new(access_key, secret_key))?;
    SesClient::new(config)?.send(message).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sesmail_mime::encoding::decode_base64;

    const TIMESTAMP: &str = "Tue, 05 Mar 2024 09:07:01 +0000";

    fn form_pairs(body: &str) -> Vec<(String, String)> {
        form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_form_body_order() {
        let body = form_body("AKID", TIMESTAMP, b"raw");
        let keys: Vec<String> = form_pairs(&body).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            ["AWSAccessKeyId", "Action", "Timestamp", "RawMessage.Data"]
        );
        assert!(body.starts_with("AWSAccessKeyId=AKID&Action=SendRawEmail&Timestamp="));
    }

    #[test]
    fn test_form_body_escapes_values() {
        let body = form_body("AK+ID", TIMESTAMP, b"\xfb\xff");
        assert!(body.contains("AWSAccessKeyId=AK%2BID"));
        assert!(body.contains("Timestamp=Tue%2C+05+Mar+2024+09%3A07%3A01+%2B0000"));
        // "+/8=" once base64 encoded
        assert!(body.ends_with("RawMessage.Data=%2B%2F8%3D"));
    }

    #[test]
    fn test_form_body_round_trips_message() {
        let raw = b"From: a@x.com\r\n\r\nbody".to_vec();
        let pairs = form_pairs(&form_body("AKID", TIMESTAMP, &raw));
        assert_eq!(pairs[2].1, TIMESTAMP);
        assert_eq!(decode_base64(&pairs[3].1).unwrap(), raw);
    }

    #[test]
    fn test_client_new() {
        let config = Config::new("http://127.0.0.1:9/", Credentials::new("AKID", "secret")).unwrap();
        let client = SesClient::new(config).unwrap();
        assert_eq!(client.config().endpoint.as_str(), "http://127.0.0.1:9/");
    }

    #[tokio::test]
    async fn test_send_with_cancelled_token() {
        let config = Config::new("http://127.0.0.1:9/", Credentials::new("AKID", "secret")).unwrap();
        let client = SesClient::new(config).unwrap();
        let message = Message::new("a@x.com", "b@x.com", "Hi", "", "hello", []);

        let token = CancellationToken::new();
        token.cancel();

        let err = client.send_with_cancel(&message, &token).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}

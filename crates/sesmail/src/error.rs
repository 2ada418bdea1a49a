//! Error types for sending operations.

/// Result type alias for sending operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Sending error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// MIME generation failed.
    #[error("MIME error: {0}")]
    Mime(#[from] sesmail_mime::Error),

    /// Transport failure or error reading the response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The response body parsed but is not a complete XML document
    /// (no root element, or the root is never closed).
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The service answered with an `ErrorResponse` document.
    #[error("Service error {code} (HTTP {status}): {message}")]
    Service {
        /// Error code (e.g., `MessageRejected`).
        code: String,
        /// Human-readable message.
        message: String,
        /// Request ID reported by the service.
        request_id: Option<String>,
        /// HTTP status of the response.
        status: u16,
    },

    /// The response root element was neither a success nor an error document.
    #[error("Unexpected response root element: {0}")]
    UnexpectedResponse(String),

    /// The endpoint URL could not be parsed.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The secret key was rejected by the MAC primitive.
    #[error("Invalid signing key")]
    InvalidKey,

    /// The send was cancelled before a response arrived.
    #[error("Send cancelled")]
    Cancelled,
}

impl Error {
    /// Returns true if the service itself rejected the request.
    #[must_use]
    pub const fn is_service_error(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Returns true if the service reported throttling.
    #[must_use]
    pub fn is_throttling(&self) -> bool {
        match self {
            Self::Service { code, status, .. } => code == "Throttling" || *status == 429,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(code: &str, status: u16) -> Error {
        Error::Service {
            code: code.to_string(),
            message: "msg".to_string(),
            request_id: None,
            status,
        }
    }

    #[test]
    fn test_service_error_predicates() {
        assert!(service("MessageRejected", 400).is_service_error());
        assert!(!service("MessageRejected", 400).is_throttling());
        assert!(service("Throttling", 400).is_throttling());
        assert!(service("Other", 429).is_throttling());
        assert!(!Error::MalformedResponse("empty".to_string()).is_service_error());
        assert!(!Error::Cancelled.is_throttling());
    }

    #[test]
    fn test_service_error_display() {
        assert_eq!(
            service("MessageRejected", 400).to_string(),
            "Service error MessageRejected (HTTP 400): msg"
        );
    }
}

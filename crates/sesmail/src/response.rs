//! XML acknowledgment parsing.

use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Root element of a successful `SendRawEmail` response.
pub const SUCCESS_ROOT: &str = "SendRawEmailResponse";

/// Root element of a service error document.
pub const ERROR_ROOT: &str = "ErrorResponse";

/// Acknowledgment of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// HTTP status of the response.
    pub status: u16,
    /// Provider-assigned message ID, when reported.
    pub message_id: Option<String>,
    /// Provider request ID, when reported.
    pub request_id: Option<String>,
}

/// Fields pulled out of a response document. Only the first occurrence
/// of each leaf element is kept.
#[derive(Debug, Default)]
struct Document {
    root: String,
    message_id: Option<String>,
    request_id: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

impl Document {
    fn slot(&mut self, element: &str) -> Option<&mut Option<String>> {
        match element {
            "MessageId" => Some(&mut self.message_id),
            "RequestId" => Some(&mut self.request_id),
            "Code" => Some(&mut self.code),
            "Message" => Some(&mut self.message),
            _ => None,
        }
    }
}

fn element_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Reads the root element and the leaf fields of interest.
///
/// Parsing stops once the root element closes; anything after it is
/// ignored.
fn parse_document(body: &[u8]) -> Result<Document> {
    let mut reader = Reader::from_reader(body);
    let mut document = Document::default();
    let mut stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(e.local_name().as_ref());
                if stack.is_empty() {
                    document.root.clone_from(&name);
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                if stack.is_empty() {
                    document.root = element_name(e.local_name().as_ref());
                    break;
                }
            }
            Event::Text(t) => {
                let Some(current) = stack.last() else {
                    continue;
                };
                let current = current.clone();
                if let Some(slot) = document.slot(&current) {
                    if slot.is_none() {
                        let text = t
                            .unescape()
                            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
                        *slot = Some(text.trim().to_string());
                    }
                }
            }
            Event::End(_) => {
                stack.pop();
                if stack.is_empty() {
                    break;
                }
            }
            Event::Eof => {
                if document.root.is_empty() {
                    return Err(Error::MalformedResponse(
                        "no root element".to_string(),
                    ));
                }
                return Err(Error::MalformedResponse(format!(
                    "unexpected end of document inside <{}>",
                    stack.last().map_or(document.root.as_str(), String::as_str)
                )));
            }
            _ => {}
        }
    }

    Ok(document)
}

/// Interprets a response body.
///
/// The root element decides the outcome; `status` is only recorded.
///
/// # Errors
///
/// Returns an error if the body is not well-formed XML, if it is a
/// service `ErrorResponse`, or if its root element is unrecognised.
pub fn parse_response(status: u16, body: &[u8]) -> Result<SendReceipt> {
    let document = parse_document(body)?;

    match document.root.as_str() {
        SUCCESS_ROOT => Ok(SendReceipt {
            status,
            message_id: document.message_id,
            request_id: document.request_id,
        }),
        ERROR_ROOT => Err(Error::Service {
            code: document.code.unwrap_or_default(),
            message: document.message.unwrap_or_default(),
            request_id: document.request_id,
            status,
        }),
        _ => Err(Error::UnexpectedResponse(document.root)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SUCCESS: &str = r#"<?xml version="1.0"?>
<SendRawEmailResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <SendRawEmailResult>
    <MessageId>0100018e1a2b3c4d-example-000000</MessageId>
  </SendRawEmailResult>
  <ResponseMetadata>
    <RequestId>e0abcdfa-c866-11e0-b6d0-273d09173b49</RequestId>
  </ResponseMetadata>
</SendRawEmailResponse>"#;

    const FAILURE: &str = r#"<ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <Error>
    <Type>Sender</Type>
    <Code>MessageRejected</Code>
    <Message>Email address is not verified.</Message>
  </Error>
  <RequestId>a1b2c3</RequestId>
</ErrorResponse>"#;

    #[test]
    fn test_parse_success() {
        let receipt = parse_response(200, SUCCESS.as_bytes()).unwrap();
        assert_eq!(receipt.status, 200);
        assert_eq!(
            receipt.message_id.as_deref(),
            Some("0100018e1a2b3c4d-example-000000")
        );
        assert_eq!(
            receipt.request_id.as_deref(),
            Some("e0abcdfa-c866-11e0-b6d0-273d09173b49")
        );
    }

    #[test]
    fn test_parse_success_without_fields() {
        let receipt = parse_response(200, b"<SendRawEmailResponse/>").unwrap();
        assert!(receipt.message_id.is_none());
        assert!(receipt.request_id.is_none());
    }

    #[test]
    fn test_status_does_not_decide_outcome() {
        let receipt = parse_response(500, SUCCESS.as_bytes()).unwrap();
        assert_eq!(receipt.status, 500);
    }

    #[test]
    fn test_parse_error_response() {
        let err = parse_response(400, FAILURE.as_bytes()).unwrap_err();
        match err {
            Error::Service {
                code,
                message,
                request_id,
                status,
            } => {
                assert_eq!(code, "MessageRejected");
                assert_eq!(message, "Email address is not verified.");
                assert_eq!(request_id.as_deref(), Some("a1b2c3"));
                assert_eq!(status, 400);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_root() {
        let err = parse_response(200, b"<Other><x/></Other>").unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(ref root) if root == "Other"));
    }

    #[test]
    fn test_not_xml() {
        let err = parse_response(200, b"definitely not xml").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(
            parse_response(200, b""),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_mismatched_tags() {
        let err = parse_response(200, b"<SendRawEmailResponse></Other>").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }

    #[test]
    fn test_truncated_document() {
        let err = parse_response(200, b"<SendRawEmailResponse><SendRawEmailResult>").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_) | Error::Xml(_)));
    }

    #[test]
    fn test_trailing_content_ignored() {
        let body = format!("{SUCCESS}\n<!-- trailer -->");
        assert!(parse_response(200, body.as_bytes()).is_ok());
    }

    #[test]
    fn test_escaped_text() {
        let body = b"<ErrorResponse><Error><Code>X</Code><Message>a &amp; b</Message></Error></ErrorResponse>";
        let err = parse_response(400, body).unwrap_err();
        assert!(matches!(err, Error::Service { ref message, .. } if message == "a & b"));
    }
}

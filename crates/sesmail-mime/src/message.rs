//! Outgoing message model.

/// A file attached to a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// Raw attachment bytes.
    pub content: Vec<u8>,
    /// MIME type, e.g. `application/pdf`.
    pub content_type: String,
    /// File name shown to the recipient.
    pub name: String,
}

impl Attachment {
    /// Creates a new attachment.
    #[must_use]
    pub fn new(
        content: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
            name: name.into(),
        }
    }
}

/// An email to encode and send.
///
/// Empty `text` or `html` bodies are omitted from the encoded output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain text body.
    pub text: String,
    /// Attachments, encoded in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
        text: impl Into<String>,
        attachments: impl IntoIterator<Item = Attachment>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
            text: text.into(),
            attachments: attachments.into_iter().collect(),
        }
    }

    /// Appends an attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new() {
        let message = Message::new("a@x.com", "b@x.com", "Hi", "", "hello", []);
        assert_eq!(message.from, "a@x.com");
        assert_eq!(message.to, "b@x.com");
        assert_eq!(message.subject, "Hi");
        assert!(message.html.is_empty());
        assert_eq!(message.text, "hello");
        assert!(message.attachments.is_empty());
    }

    #[test]
    fn test_message_attachments_keep_order() {
        let message = Message::new(
            "a@x.com",
            "b@x.com",
            "Files",
            "",
            "",
            vec![
                Attachment::new(b"one".to_vec(), "text/plain", "1.txt"),
                Attachment::new(b"two".to_vec(), "text/plain", "2.txt"),
            ],
        )
        .with_attachment(Attachment::new(vec![3u8], "application/octet-stream", "3.bin"));

        let names: Vec<&str> = message.attachments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["1.txt", "2.txt", "3.bin"]);
    }
}

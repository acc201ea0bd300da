//! Outbound email messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// An address with an optional display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Email address
    pub email: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Mailbox {
    /// Address without a display name.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Address with a display name.
    #[must_use]
    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.email),
            None => f.write_str(&self.email),
        }
    }
}

/// What the provider should put in the message.
#[derive(Clone, Debug, PartialEq)]
pub enum EmailBody {
    /// Provider-hosted template populated with parameters.
    Templated {
        /// Provider template id
        template_id: u64,
        /// Template parameters
        params: Map<String, Value>,
    },
    /// Literal content rendered here.
    Inline {
        /// Subject line
        subject: String,
        /// HTML body
        html: String,
        /// Plain-text fallback body
        text: String,
    },
}

impl EmailBody {
    /// Short description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Templated { template_id, .. } => format!("template #{template_id}"),
            Self::Inline { subject, .. } => format!("inline \"{subject}\""),
        }
    }
}

/// A fully-addressed email ready for a provider.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundEmail {
    /// Sender identity
    pub sender: Mailbox,
    /// Recipients (at least one)
    pub to: Vec<Mailbox>,
    /// Where replies go
    pub reply_to: Option<Mailbox>,
    /// Content
    pub body: EmailBody,
}

impl OutboundEmail {
    /// Comma-separated recipient addresses, for logs.
    #[must_use]
    pub fn recipient_list(&self) -> String {
        self.to
            .iter()
            .map(|mailbox| mailbox.email.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// What the provider reported back for an accepted message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider message id, when the provider returns one
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailbox_display() {
        assert_eq!(Mailbox::new("host@example.com").to_string(), "host@example.com");
        assert_eq!(
            Mailbox::named("host@example.com", "Supper Club").to_string(),
            "Supper Club <host@example.com>"
        );
    }

    #[test]
    fn test_recipient_list() {
        let email = OutboundEmail {
            sender: Mailbox::new("from@example.com"),
            to: vec![Mailbox::new("a@example.com"), Mailbox::new("b@example.com")],
            reply_to: None,
            body: EmailBody::Inline {
                subject: "Hi".to_string(),
                html: "<p>Hi</p>".to_string(),
                text: "Hi".to_string(),
            },
        };

        assert_eq!(email.recipient_list(), "a@example.com, b@example.com");
        assert_eq!(email.body.describe(), "inline \"Hi\"");
    }
}

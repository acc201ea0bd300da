//! Brevo transactional email provider.
//!
//! Sends through `POST {api_url}/smtp/email` authenticated by the `api-key`
//! header. Templated messages carry `templateId` + `params`; inline messages
//! carry `subject`, `htmlContent` and `textContent`.

use crate::error::{EmailError, Result};
use crate::message::{DeliveryReceipt, EmailBody, Mailbox, OutboundEmail};
use crate::providers::EmailProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default Brevo API base URL.
pub const DEFAULT_API_URL: &str = "https://api.brevo.com/v3";

/// Brevo HTTP API provider.
///
/// # Examples
///
/// ```ignore
/// use supperclub_notifications::BrevoEmailProvider;
///
/// let provider = BrevoEmailProvider::new("xkeysib-...".to_string());
/// let receipt = provider.send(&email).await?;
/// ```
#[derive(Clone)]
pub struct BrevoEmailProvider {
    client: Client,
    api_key: String,
    api_url: String,
}

impl BrevoEmailProvider {
    /// Create a provider against the public Brevo API.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self::with_api_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create a provider against a specific base URL (self-hosted relay, tests).
    #[must_use]
    pub fn with_api_url(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl std::fmt::Debug for BrevoEmailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrevoEmailProvider")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Request body for `POST /smtp/email`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: &'a Mailbox,
    to: &'a [Mailbox],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a Mailbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_content: Option<&'a str>,
}

impl<'a> SendEmailRequest<'a> {
    fn from_email(email: &'a OutboundEmail) -> Self {
        let mut request = Self {
            sender: &email.sender,
            to: &email.to,
            reply_to: email.reply_to.as_ref(),
            template_id: None,
            params: None,
            subject: None,
            html_content: None,
            text_content: None,
        };

        match &email.body {
            EmailBody::Templated {
                template_id,
                params,
            } => {
                request.template_id = Some(*template_id);
                request.params = Some(params);
            }
            EmailBody::Inline {
                subject,
                html,
                text,
            } => {
                request.subject = Some(subject);
                request.html_content = Some(html);
                request.text_content = Some(text);
            }
        }

        request
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailResponse {
    message_id: Option<String>,
}

#[async_trait]
impl EmailProvider for BrevoEmailProvider {
    fn name(&self) -> &'static str {
        "brevo"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt> {
        if email.to.is_empty() {
            return Err(EmailError::InvalidAddress("no recipients".to_string()));
        }

        let response = self
            .client
            .post(format!("{}/smtp/email", self.api_url))
            .header("api-key", &self.api_key)
            .header("accept", "application/json")
            .json(&SendEmailRequest::from_email(email))
            .send()
            .await
            .map_err(|e| EmailError::Request(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(EmailError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let message_id = match serde_json::from_str::<SendEmailResponse>(&body) {
            Ok(parsed) => parsed.message_id,
            Err(e) => {
                tracing::warn!(
                    status = %status,
                    error = %e,
                    "Email accepted but response body was not understood"
                );
                None
            }
        };

        Ok(DeliveryReceipt { message_id })
    }
}

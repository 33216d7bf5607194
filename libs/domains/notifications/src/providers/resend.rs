//! Resend transactional API provider.

use super::{EmailProvider, OutgoingEmail, SentEmail};
use crate::config::ResendConfig;
use crate::error::DeliveryError;
use crate::models::DeliveryMethod;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

/// Production Resend API base URL.
const RESEND_API_URL: &str = "https://api.resend.com";

/// No timeout is mandated upstream; 15s keeps a stuck provider from
/// blocking the request indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Resend email provider.
pub struct ResendProvider {
    config: ResendConfig,
    client: Client,
    api_url: String,
}

impl ResendProvider {
    /// Create a new Resend provider.
    pub fn new(config: ResendConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            config,
            client,
            api_url: RESEND_API_URL.to_string(),
        }
    }

    /// Override the API base URL (for tests against a local server).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

// Resend API request/response structures

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl EmailProvider for ResendProvider {
    fn name(&self) -> DeliveryMethod {
        DeliveryMethod::Api
    }

    fn configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, DeliveryError> {
        let Some(api_key) = &self.config.api_key else {
            return Err(DeliveryError::transport(
                DeliveryMethod::Api,
                "RESEND_API_KEY is not set",
            ));
        };

        let request = SendEmailRequest {
            from: &self.config.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        debug!(to = %email.to, subject = %email.subject, "Sending email via Resend");

        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DeliveryError::transport(DeliveryMethod::Api, format!("Resend request failed: {}", e))
            })?;

        let status = response.status();

        if status.is_success() {
            let body: SendEmailResponse = response.json().await.map_err(|e| {
                DeliveryError::transport(
                    DeliveryMethod::Api,
                    format!("Failed to parse Resend response: {}", e),
                )
            })?;

            info!(to = %email.to, message_id = %body.id, "Email sent successfully via Resend");
            return Ok(SentEmail {
                message_id: Some(body.id),
            });
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(to = %email.to, status = %status, error = %error_body, "Failed to send email via Resend");

        // Resend error bodies carry a machine-readable `name`; everything
        // else is treated as a transport fault.
        match serde_json::from_str::<ResendErrorBody>(&error_body) {
            Ok(parsed) if parsed.name == "validation_error" => Err(DeliveryError::validation(
                DeliveryMethod::Api,
                parsed.message,
            )),
            Ok(parsed) if !parsed.message.is_empty() => Err(DeliveryError::transport(
                DeliveryMethod::Api,
                format!("Resend error ({}): {}", status, parsed.message),
            )),
            _ => Err(DeliveryError::transport(
                DeliveryMethod::Api,
                format!("Resend error ({}): {}", status, error_body),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    fn provider(api_key: Option<&str>) -> ResendProvider {
        ResendProvider::new(ResendConfig {
            api_key: api_key.map(|s| s.to_string()),
            from: "DentCare <onboarding@resend.dev>".to_string(),
        })
    }

    #[test]
    fn test_configured_requires_api_key() {
        assert!(provider(Some("re_test_key")).configured());
        assert!(!provider(None).configured());
    }

    #[tokio::test]
    async fn test_send_without_key_is_transport_error() {
        let err = provider(None)
            .send(&OutgoingEmail {
                to: "pat@example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.class, ErrorClass::Transport);
        assert!(err.detail.contains("RESEND_API_KEY"));
    }

    #[test]
    fn test_error_body_parsing() {
        let body = r#"{"statusCode":403,"name":"validation_error","message":"You can only send testing emails to your own email address"}"#;
        let parsed: ResendErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.name, "validation_error");
        assert!(parsed.message.contains("testing emails"));
    }
}

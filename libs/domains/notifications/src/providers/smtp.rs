//! SMTP relay provider using lettre.

use super::{EmailProvider, OutgoingEmail, SentEmail};
use crate::config::SmtpConfig;
use crate::error::{DeliveryError, NotificationError, NotificationResult};
use crate::models::DeliveryMethod;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{debug, error, info};

/// Standard encrypted SMTP submission port (implicit TLS).
const SMTPS_PORT: u16 = 465;

/// Bounded per-attempt timeout; the relay protocol has no other deadline.
const SEND_TIMEOUT: Duration = Duration::from_secs(20);

/// SMTP relay email provider.
///
/// The transport is only built when host, username and password are all
/// present; otherwise the adapter reports itself unconfigured.
pub struct SmtpProvider {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    config: SmtpConfig,
}

impl SmtpProvider {
    /// Create a new SMTP provider from resolved configuration.
    pub fn new(config: SmtpConfig) -> NotificationResult<Self> {
        let transport = if config.is_complete() {
            Some(Self::build_transport(&config)?)
        } else {
            None
        };

        Ok(Self { transport, config })
    }

    /// Build the relay transport.
    ///
    /// Port 465 gets an implicit-TLS connection; any other port uses a
    /// STARTTLS-capable connection.
    fn build_transport(
        config: &SmtpConfig,
    ) -> NotificationResult<AsyncSmtpTransport<Tokio1Executor>> {
        let host = config.host.as_deref().unwrap_or_default();
        let username = config.username.clone().unwrap_or_default();
        let password = config.password.clone().unwrap_or_default();

        let builder = if config.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| {
            NotificationError::Internal(format!("Failed to create SMTP transport: {}", e))
        })?;

        Ok(builder
            .port(config.port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(SEND_TIMEOUT))
            .build())
    }

    /// Build a lettre message with text and HTML alternative parts.
    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, DeliveryError> {
        let from: Mailbox = self.config.from.parse().map_err(|e| {
            DeliveryError::transport(DeliveryMethod::Smtp, format!("Invalid from address: {}", e))
        })?;

        let to: Mailbox = email.to.parse().map_err(|e| {
            DeliveryError::transport(DeliveryMethod::Smtp, format!("Invalid to address: {}", e))
        })?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html.clone()),
                    ),
            )
            .map_err(|e| {
                DeliveryError::transport(
                    DeliveryMethod::Smtp,
                    format!("Failed to build email message: {}", e),
                )
            })
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    fn name(&self) -> DeliveryMethod {
        DeliveryMethod::Smtp
    }

    fn configured(&self) -> bool {
        self.transport.is_some()
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, DeliveryError> {
        let Some(transport) = &self.transport else {
            return Err(DeliveryError::transport(
                DeliveryMethod::Smtp,
                "SMTP is not configured. Set SMTP_HOST, SMTP_USER and SMTP_PASS",
            ));
        };

        debug!(
            to = %email.to,
            subject = %email.subject,
            host = self.config.host.as_deref().unwrap_or_default(),
            port = self.config.port,
            "Sending email via SMTP"
        );

        let message = self.build_message(email)?;

        let response = transport.send(message).await.map_err(|e| {
            error!(to = %email.to, error = %e, "Failed to send email via SMTP");
            DeliveryError::transport(DeliveryMethod::Smtp, format!("SMTP send failed: {}", e))
        })?;

        let message_id = response.message().next().map(|s| s.to_string());

        info!(to = %email.to, message_id = ?message_id, "Email sent successfully via SMTP");

        Ok(SentEmail { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    fn config(host: Option<&str>, user: Option<&str>, pass: Option<&str>, port: u16) -> SmtpConfig {
        SmtpConfig {
            host: host.map(|s| s.to_string()),
            port,
            username: user.map(|s| s.to_string()),
            password: pass.map(|s| s.to_string()),
            from: "DentCare <noreply@dentcare.example>".to_string(),
        }
    }

    #[test]
    fn test_unconfigured_without_credentials() {
        let provider = SmtpProvider::new(config(Some("smtp.example.com"), None, None, 465)).unwrap();
        assert!(!provider.configured());

        let provider = SmtpProvider::new(config(None, None, None, 465)).unwrap();
        assert!(!provider.configured());
    }

    #[test]
    fn test_configured_with_full_credentials() {
        let provider =
            SmtpProvider::new(config(Some("smtp.example.com"), Some("u"), Some("p"), 465)).unwrap();
        assert!(provider.configured());
    }

    #[test]
    fn test_starttls_port_builds_transport() {
        let provider =
            SmtpProvider::new(config(Some("smtp.example.com"), Some("u"), Some("p"), 587)).unwrap();
        assert!(provider.configured());
    }

    #[tokio::test]
    async fn test_send_unconfigured_is_transport_error() {
        let provider = SmtpProvider::new(config(None, None, None, 465)).unwrap();
        let err = provider
            .send(&OutgoingEmail {
                to: "pat@example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.class, ErrorClass::Transport);
        assert!(err.detail.contains("not configured"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let provider =
            SmtpProvider::new(config(Some("smtp.example.com"), Some("u"), Some("p"), 465)).unwrap();
        let err = provider
            .build_message(&OutgoingEmail {
                to: "not-an-address".to_string(),
                subject: "s".to_string(),
                html: "<p>h</p>".to_string(),
                text: "t".to_string(),
            })
            .unwrap_err();
        assert!(err.detail.contains("Invalid to address"));
    }
}

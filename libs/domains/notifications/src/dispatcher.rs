//! Delivery orchestration: provider selection and fallback.

use crate::config::{DeliveryMode, EmailConfig};
use crate::error::{ErrorClass, NotificationError, NotificationResult};
use crate::models::{AttemptError, DeliveryResult};
use crate::providers::{EmailProvider, OutgoingEmail, ResendProvider, SmtpProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Orchestrates delivery across the two providers.
///
/// The API adapter is the primary; the SMTP relay is attempted as a
/// fallback after any API failure. Attempts are strictly sequential so a
/// recipient never receives duplicate notifications.
pub struct EmailDispatcher {
    api: Arc<dyn EmailProvider>,
    smtp: Arc<dyn EmailProvider>,
    mode: DeliveryMode,
}

impl EmailDispatcher {
    /// Create a dispatcher from explicit providers (used by tests to
    /// inject mocks).
    pub fn new(
        api: Arc<dyn EmailProvider>,
        smtp: Arc<dyn EmailProvider>,
        mode: DeliveryMode,
    ) -> Self {
        Self { api, smtp, mode }
    }

    /// Create a dispatcher with the production adapters.
    pub fn from_config(config: &EmailConfig) -> NotificationResult<Self> {
        let api = Arc::new(ResendProvider::new(config.resend.clone()));
        let smtp = Arc::new(SmtpProvider::new(config.smtp.clone())?);
        Ok(Self::new(api, smtp, config.mode))
    }

    /// Deliver one email, trying the API first and falling back to SMTP.
    ///
    /// Provider availability combines credentials with the mode override:
    /// `smtp` mode disables the API adapter, `api` mode disables the relay.
    pub async fn dispatch(&self, email: &OutgoingEmail) -> NotificationResult<DeliveryResult> {
        let api_available =
            !matches!(self.mode, DeliveryMode::Smtp) && self.api.configured();
        let smtp_available =
            !matches!(self.mode, DeliveryMode::Api) && self.smtp.configured();

        if !api_available && !smtp_available {
            warn!(to = %email.to, "No email provider configured, refusing dispatch");
            return Err(NotificationError::NoProviderConfigured);
        }

        let mut attempts: Vec<AttemptError> = Vec::new();

        if api_available {
            match self.api.send(email).await {
                Ok(sent) => {
                    return Ok(DeliveryResult {
                        method: self.api.name(),
                        message_id: sent.message_id,
                        attempts,
                    });
                }
                Err(api_err) => {
                    warn!(
                        to = %email.to,
                        error = %api_err.detail,
                        fallback = smtp_available,
                        "API delivery failed"
                    );

                    let api_class = api_err.class;
                    attempts.push(api_err.into());

                    if smtp_available {
                        match self.smtp.send(email).await {
                            Ok(sent) => {
                                info!(to = %email.to, "Delivered via SMTP fallback");
                                return Ok(DeliveryResult {
                                    method: self.smtp.name(),
                                    message_id: sent.message_id,
                                    attempts,
                                });
                            }
                            Err(smtp_err) => attempts.push(smtp_err.into()),
                        }
                    }

                    // A policy rejection with no working fallback gets its
                    // own outcome so callers can surface a remediation hint.
                    return Err(if api_class == ErrorClass::Validation {
                        NotificationError::PolicyRejected { attempts }
                    } else {
                        NotificationError::AllProvidersFailed { attempts }
                    });
                }
            }
        }

        // Only the relay is available
        match self.smtp.send(email).await {
            Ok(sent) => Ok(DeliveryResult {
                method: self.smtp.name(),
                message_id: sent.message_id,
                attempts,
            }),
            Err(smtp_err) => {
                warn!(to = %email.to, error = %smtp_err.detail, "SMTP delivery failed");
                let class = smtp_err.class;
                attempts.push(smtp_err.into());
                Err(if class == ErrorClass::Validation {
                    NotificationError::PolicyRejected { attempts }
                } else {
                    NotificationError::AllProvidersFailed { attempts }
                })
            }
        }
    }
}

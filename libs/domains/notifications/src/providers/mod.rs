//! Email provider implementations.
//!
//! This module contains the `EmailProvider` trait and the two production
//! adapters (Resend API, SMTP relay) plus a mock for tests.

mod mock;
mod resend;
mod smtp;

pub use mock::MockProvider;
pub use resend::ResendProvider;
pub use smtp::SmtpProvider;

use crate::error::DeliveryError;
use crate::models::DeliveryMethod;
use async_trait::async_trait;

/// A fully rendered email ready for sending.
///
/// The sender address is not part of the message: each adapter carries its
/// own resolved sender identity in its configuration.
#[derive(Debug, Clone, Default)]
pub struct OutgoingEmail {
    /// Recipient email address.
    pub to: String,
    /// Email subject.
    pub subject: String,
    /// HTML body content.
    pub html: String,
    /// Plain text body content.
    pub text: String,
}

/// Receipt for a sent email.
#[derive(Debug, Clone)]
pub struct SentEmail {
    /// Provider-specific message ID for tracking.
    pub message_id: Option<String>,
}

/// Trait for email sending providers.
///
/// The dispatcher depends only on this interface; branching between the two
/// production adapters never inspects provider-specific types.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// The delivery method this provider represents.
    fn name(&self) -> DeliveryMethod;

    /// Whether the required credentials are present.
    fn configured(&self) -> bool;

    /// Send an email, resolving with a receipt or a classified error.
    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, DeliveryError>;
}

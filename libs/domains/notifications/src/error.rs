//! Error types for the notifications domain.

use crate::models::{AttemptError, DeliveryMethod};
use thiserror::Error;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur in the notifications domain.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// No provider has usable credentials (after the mode override).
    #[error("No email provider is configured")]
    NoProviderConfigured,

    /// A provider refused delivery for policy reasons (unverified sender or
    /// sandboxed recipient) and no fallback succeeded.
    #[error("Email delivery rejected by provider policy")]
    PolicyRejected { attempts: Vec<AttemptError> },

    /// Every attempted provider failed with a transport-class error.
    #[error("All configured email providers failed")]
    AllProvidersFailed { attempts: Vec<AttemptError> },

    /// Template rendering error.
    #[error("Template rendering error: {0}")]
    Template(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<handlebars::RenderError> for NotificationError {
    fn from(err: handlebars::RenderError) -> Self {
        NotificationError::Template(err.to_string())
    }
}

impl From<serde_json::Error> for NotificationError {
    fn from(err: serde_json::Error) -> Self {
        NotificationError::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Classification of a failed provider attempt.
///
/// Drives the dispatcher's fallback branching: `Validation` means the
/// provider refused delivery as a matter of policy (not a transient fault),
/// which is surfaced as a distinct outcome when no fallback delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Policy rejection: unverified sender domain or sandboxed recipient.
    Validation,
    /// Network, authentication, or protocol failure.
    Transport,
}

/// Uniform error produced by every provider adapter.
///
/// The dispatcher branches on `class` only and never inspects
/// provider-specific payloads; the raw detail is carried for logging and
/// for the accumulated attempt log in the final result.
#[derive(Debug, Clone, Error)]
#[error("{provider} provider error: {detail}")]
pub struct DeliveryError {
    pub provider: DeliveryMethod,
    pub class: ErrorClass,
    pub detail: String,
}

impl DeliveryError {
    pub fn transport(provider: DeliveryMethod, detail: impl Into<String>) -> Self {
        Self {
            provider,
            class: ErrorClass::Transport,
            detail: detail.into(),
        }
    }

    pub fn validation(provider: DeliveryMethod, detail: impl Into<String>) -> Self {
        Self {
            provider,
            class: ErrorClass::Validation,
            detail: detail.into(),
        }
    }
}

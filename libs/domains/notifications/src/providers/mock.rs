//! Mock email provider for testing.

use super::{EmailProvider, OutgoingEmail, SentEmail};
use crate::error::{DeliveryError, ErrorClass};
use crate::models::DeliveryMethod;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock email provider that captures sent emails.
pub struct MockProvider {
    method: DeliveryMethod,
    configured: bool,
    failure: Option<(ErrorClass, String)>,
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a configured mock that accepts every send.
    pub fn succeeding(method: DeliveryMethod) -> Self {
        Self {
            method,
            configured: true,
            failure: None,
            sent: Arc::new(Mutex::new(Vec::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a configured mock that fails every send with the given
    /// classification.
    pub fn failing(method: DeliveryMethod, class: ErrorClass, detail: impl Into<String>) -> Self {
        Self {
            failure: Some((class, detail.into())),
            ..Self::succeeding(method)
        }
    }

    /// Create a mock with no credentials.
    pub fn unconfigured(method: DeliveryMethod) -> Self {
        Self {
            configured: false,
            ..Self::succeeding(method)
        }
    }

    /// Number of send attempts made against this provider.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All emails accepted by this provider.
    pub async fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().await.clone()
    }

    /// Check if an email was sent to a specific address.
    pub async fn was_sent_to(&self, email: &str) -> bool {
        self.sent.lock().await.iter().any(|e| e.to == email)
    }
}

#[async_trait]
impl EmailProvider for MockProvider {
    fn name(&self) -> DeliveryMethod {
        self.method
    }

    fn configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some((class, detail)) = &self.failure {
            return Err(DeliveryError {
                provider: self.method,
                class: *class,
                detail: detail.clone(),
            });
        }

        self.sent.lock().await.push(email.clone());

        Ok(SentEmail {
            message_id: Some(format!("mock-{}-{}", self.method, self.call_count())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_captures_sends() {
        let provider = MockProvider::succeeding(DeliveryMethod::Api);

        let email = OutgoingEmail {
            to: "test@example.com".to_string(),
            subject: "Test Subject".to_string(),
            ..Default::default()
        };

        let result = provider.send(&email).await.unwrap();
        assert!(result.message_id.is_some());
        assert_eq!(provider.call_count(), 1);
        assert!(provider.was_sent_to("test@example.com").await);
        assert!(!provider.was_sent_to("other@example.com").await);
    }

    #[tokio::test]
    async fn test_mock_provider_fails_with_classification() {
        let provider =
            MockProvider::failing(DeliveryMethod::Smtp, ErrorClass::Transport, "Simulated failure");

        let err = provider.send(&OutgoingEmail::default()).await.unwrap_err();
        assert_eq!(err.class, ErrorClass::Transport);
        assert_eq!(err.provider, DeliveryMethod::Smtp);
        assert!(err.detail.contains("Simulated failure"));
        assert_eq!(provider.sent_emails().await.len(), 0);
    }

    #[test]
    fn test_unconfigured_mock() {
        let provider = MockProvider::unconfigured(DeliveryMethod::Api);
        assert!(!provider.configured());
    }
}

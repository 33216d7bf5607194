//! Data models for the notifications domain.

use crate::error::DeliveryError;
use serde::{Deserialize, Serialize};

/// Default appointment type when the booking flow omits one.
pub const DEFAULT_APPOINTMENT_TYPE: &str = "General Checkup";
/// Default appointment duration.
pub const DEFAULT_DURATION: &str = "30 minutes";
/// Default consultation fee.
pub const DEFAULT_PRICE: &str = "$50";

/// Delivery method actually used (or attempted) for an email.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Transactional email API (Resend).
    Api,
    /// Direct SMTP relay.
    Smtp,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Api => write!(f, "api"),
            DeliveryMethod::Smtp => write!(f, "smtp"),
        }
    }
}

/// One appointment confirmation to be emailed to a patient.
///
/// Immutable once constructed; created per request and discarded after the
/// send completes.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentNotification {
    pub recipient_email: String,
    pub doctor_name: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub appointment_type: String,
    pub duration: String,
    pub price: String,
}

impl AppointmentNotification {
    /// Create a notification, filling the documented defaults for any
    /// omitted optional field.
    pub fn new(
        recipient_email: impl Into<String>,
        doctor_name: impl Into<String>,
        appointment_date: impl Into<String>,
        appointment_time: impl Into<String>,
        appointment_type: Option<String>,
        duration: Option<String>,
        price: Option<String>,
    ) -> Self {
        Self {
            recipient_email: recipient_email.into(),
            doctor_name: doctor_name.into(),
            appointment_date: appointment_date.into(),
            appointment_time: appointment_time.into(),
            appointment_type: appointment_type
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_APPOINTMENT_TYPE.to_string()),
            duration: duration
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            price: price
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PRICE.to_string()),
        }
    }
}

/// A recorded provider failure from one delivery attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptError {
    /// Provider that was attempted.
    pub provider: DeliveryMethod,
    /// Raw provider error detail.
    pub message: String,
}

impl From<DeliveryError> for AttemptError {
    fn from(err: DeliveryError) -> Self {
        Self {
            provider: err.provider,
            message: err.detail,
        }
    }
}

/// Outcome of a successful dispatch.
///
/// Failed dispatches are expressed as `NotificationError` variants carrying
/// the same ordered attempt log.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryResult {
    /// Provider that delivered the email.
    pub method: DeliveryMethod,
    /// Provider-specific message identifier, when the provider returns one.
    pub message_id: Option<String>,
    /// Errors from providers attempted before the one that succeeded.
    pub attempts: Vec<AttemptError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults_applied() {
        let n = AppointmentNotification::new(
            "pat@example.com",
            "Dr. Lee",
            "2024-05-01",
            "10:00",
            None,
            None,
            None,
        );
        assert_eq!(n.appointment_type, "General Checkup");
        assert_eq!(n.duration, "30 minutes");
        assert_eq!(n.price, "$50");
    }

    #[test]
    fn test_notification_blank_optional_falls_back_to_default() {
        let n = AppointmentNotification::new(
            "pat@example.com",
            "Dr. Lee",
            "2024-05-01",
            "10:00",
            Some("  ".to_string()),
            Some("45 minutes".to_string()),
            None,
        );
        assert_eq!(n.appointment_type, "General Checkup");
        assert_eq!(n.duration, "45 minutes");
    }

    #[test]
    fn test_delivery_method_display() {
        assert_eq!(DeliveryMethod::Api.to_string(), "api");
        assert_eq!(DeliveryMethod::Smtp.to_string(), "smtp");
    }

    #[test]
    fn test_attempt_error_from_delivery_error() {
        let err = DeliveryError::transport(DeliveryMethod::Api, "boom");
        let attempt: AttemptError = err.into();
        assert_eq!(attempt.provider, DeliveryMethod::Api);
        assert_eq!(attempt.message, "boom");
    }
}

//! Appointment confirmation email endpoint.

use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain_notifications::{AppointmentNotification, NotificationError, OutgoingEmail};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

/// Request body for `POST /api/send-appointment-email`.
///
/// Required fields default to empty strings so that presence validation
/// happens in one place instead of through deserialization errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAppointmentEmailRequest {
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub doctor_name: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub appointment_time: String,
    pub appointment_type: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
}

impl SendAppointmentEmailRequest {
    fn missing_required_field(&self) -> bool {
        [
            &self.user_email,
            &self.doctor_name,
            &self.appointment_date,
            &self.appointment_time,
        ]
        .iter()
        .any(|f| f.trim().is_empty())
    }
}

/// Send an appointment confirmation email.
///
/// Validates the input, renders the confirmation template, and hands the
/// message to the dispatcher. Every outcome maps to a JSON response; no
/// error propagates past this handler.
pub async fn send_appointment_email(
    State(state): State<AppState>,
    Json(body): Json<SendAppointmentEmailRequest>,
) -> Response {
    if body.missing_required_field() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required fields" })),
        )
            .into_response();
    }

    let notification = AppointmentNotification::new(
        body.user_email,
        body.doctor_name,
        body.appointment_date,
        body.appointment_time,
        body.appointment_type,
        body.duration,
        body.price,
    );

    let rendered = match state
        .templates
        .render_appointment_confirmation(&notification, &state.app_url)
    {
        Ok(rendered) => rendered,
        Err(e) => {
            error!(error = %e, "Failed to render appointment confirmation");
            return internal_error();
        }
    };

    let email = OutgoingEmail {
        to: notification.recipient_email.clone(),
        subject: rendered.subject,
        html: rendered.html,
        text: rendered.text,
    };

    match state.dispatcher.dispatch(&email).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "message": "Email sent successfully",
                "emailId": result.message_id,
                "recipient": notification.recipient_email,
                "method": result.method.to_string(),
            })),
        )
            .into_response(),

        Err(NotificationError::PolicyRejected { attempts }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "Email rejected by provider policy",
                "details": attempts,
                "recipient": notification.recipient_email,
                "hint": "Verify a sending domain with your email provider, or configure the SMTP relay as a fallback.",
                "docs": "https://resend.com/docs/dashboard/domains/introduction",
            })),
        )
            .into_response(),

        Err(NotificationError::AllProvidersFailed { attempts }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to send email",
                "details": attempts,
                "recipient": notification.recipient_email,
            })),
        )
            .into_response(),

        Err(NotificationError::NoProviderConfigured) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Email service not configured",
                "hint": "Set RESEND_API_KEY, or SMTP_HOST, SMTP_USER and SMTP_PASS.",
            })),
        )
            .into_response(),

        Err(e) => {
            error!(error = %e, "Unexpected error sending appointment email");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use domain_notifications::{
        DeliveryMethod, DeliveryMode, EmailDispatcher, ErrorClass, MockProvider, TemplateEngine,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(api: Arc<MockProvider>, smtp: Arc<MockProvider>) -> Router {
        let state = AppState {
            templates: Arc::new(TemplateEngine::new().unwrap()),
            dispatcher: Arc::new(EmailDispatcher::new(api, smtp, DeliveryMode::Auto)),
            app_url: "https://dentcare.example".to_string(),
        };
        Router::new()
            .nest("/api", crate::api::routes())
            .with_state(state)
    }

    fn post_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/send-appointment-email")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn full_booking() -> Value {
        json!({
            "userEmail": "pat@example.com",
            "doctorName": "Dr. Lee",
            "appointmentDate": "2024-05-01",
            "appointmentTime": "10:00",
            "appointmentType": "Cleaning",
            "duration": "45 minutes",
            "price": "$75"
        })
    }

    #[tokio::test]
    async fn test_missing_fields_returns_400_without_provider_calls() {
        let api = Arc::new(MockProvider::succeeding(DeliveryMethod::Api));
        let smtp = Arc::new(MockProvider::succeeding(DeliveryMethod::Smtp));
        let app = test_app(api.clone(), smtp.clone());

        let response = app
            .oneshot(post_request(json!({ "userEmail": "pat@example.com" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Missing required fields");
        assert_eq!(api.call_count(), 0);
        assert_eq!(smtp.call_count(), 0);
    }

    #[tokio::test]
    async fn test_api_success_returns_200_with_method() {
        let api = Arc::new(MockProvider::succeeding(DeliveryMethod::Api));
        let smtp = Arc::new(MockProvider::succeeding(DeliveryMethod::Smtp));
        let app = test_app(api, smtp.clone());

        let response = app.oneshot(post_request(full_booking())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["method"], "api");
        assert_eq!(body["recipient"], "pat@example.com");
        assert!(body["emailId"].is_string());
        assert_eq!(smtp.call_count(), 0);
    }

    #[tokio::test]
    async fn test_smtp_only_end_to_end() {
        let api = Arc::new(MockProvider::unconfigured(DeliveryMethod::Api));
        let smtp = Arc::new(MockProvider::succeeding(DeliveryMethod::Smtp));
        let app = test_app(api, smtp.clone());

        let response = app.oneshot(post_request(full_booking())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["method"], "smtp");

        let sent = smtp.sent_emails().await;
        assert_eq!(sent.len(), 1);
        for needle in ["Dr. Lee", "Cleaning", "45 minutes", "$75"] {
            assert!(sent[0].html.contains(needle), "sent html missing {}", needle);
        }
    }

    #[tokio::test]
    async fn test_policy_rejection_returns_422_with_hint() {
        let api = Arc::new(MockProvider::failing(
            DeliveryMethod::Api,
            ErrorClass::Validation,
            "You can only send testing emails to your own email address",
        ));
        let smtp = Arc::new(MockProvider::unconfigured(DeliveryMethod::Smtp));
        let app = test_app(api, smtp);

        let response = app.oneshot(post_request(full_booking())).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["hint"].as_str().unwrap().contains("sending domain"));
        assert_eq!(body["details"][0]["provider"], "api");
    }

    #[tokio::test]
    async fn test_all_failed_returns_500_with_both_errors() {
        let api = Arc::new(MockProvider::failing(
            DeliveryMethod::Api,
            ErrorClass::Transport,
            "gateway timeout",
        ));
        let smtp = Arc::new(MockProvider::failing(
            DeliveryMethod::Smtp,
            ErrorClass::Transport,
            "connection refused",
        ));
        let app = test_app(api, smtp);

        let response = app.oneshot(post_request(full_booking())).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to send email");
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unconfigured_returns_500_with_config_hint() {
        let api = Arc::new(MockProvider::unconfigured(DeliveryMethod::Api));
        let smtp = Arc::new(MockProvider::unconfigured(DeliveryMethod::Smtp));
        let app = test_app(api, smtp);

        let response = app.oneshot(post_request(full_booking())).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Email service not configured");
        assert!(body["hint"].as_str().unwrap().contains("RESEND_API_KEY"));
    }
}

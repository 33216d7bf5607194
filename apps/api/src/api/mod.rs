use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub mod appointments;
pub mod health;

/// Creates the API routes, mounted under `/api` by main.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/send-appointment-email",
        post(appointments::send_appointment_email),
    )
}

/// Liveness endpoint, mounted at the root.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_handler))
}

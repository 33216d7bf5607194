//! Liveness check handler.

use axum::Json;
use serde_json::{json, Value};

/// Liveness check with app name/version.
///
/// Provider reachability is deliberately not probed here: a failing
/// provider triggers fallback at dispatch time instead of failing health.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

//! Application state management.

use domain_notifications::{EmailDispatcher, TemplateEngine};
use std::sync::Arc;

/// Shared application state.
///
/// Cloned for each request handler; all members are cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    /// Email template engine, built once at startup.
    pub templates: Arc<TemplateEngine>,
    /// Delivery orchestrator holding the provider adapters.
    pub dispatcher: Arc<EmailDispatcher>,
    /// Public base URL for email assets (logo, appointment link).
    pub app_url: String,
}

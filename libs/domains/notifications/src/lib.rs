//! Notifications Domain
//!
//! This module provides appointment confirmation emails for the DentCare
//! application.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   API Handler   │  ← Validates request, maps outcome to HTTP
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ TemplateEngine  │  ← Renders confirmation HTML + text
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ EmailDispatcher │  ← Picks a provider, falls back on failure
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Email Provider  │  ← Resend API, SMTP relay
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_notifications::{EmailConfig, EmailDispatcher, TemplateEngine};
//!
//! let config = EmailConfig::from_env()?;
//! let dispatcher = EmailDispatcher::from_config(&config)?;
//! let rendered = templates.render_appointment_confirmation(&notification, &config.app_url)?;
//! let result = dispatcher.dispatch(&email).await?;
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod providers;
pub mod templates;

// Re-export commonly used types
pub use config::{DeliveryMode, EmailConfig, ResendConfig, SmtpConfig};
pub use dispatcher::EmailDispatcher;
pub use error::{DeliveryError, ErrorClass, NotificationError, NotificationResult};
pub use models::{AppointmentNotification, AttemptError, DeliveryMethod, DeliveryResult};
pub use providers::{EmailProvider, MockProvider, OutgoingEmail, ResendProvider, SentEmail, SmtpProvider};
pub use templates::{RenderedEmail, TemplateEngine};

//! Email delivery configuration.
//!
//! All environment variables are resolved once at process startup; the
//! dispatcher and adapters receive the resulting structs and never read
//! ambient state themselves.

use core_config::{env_opt, env_or_default, ConfigError, FromEnv};

/// Fallback sender identity when no override is configured.
pub const DEFAULT_FROM: &str = "DentCare <onboarding@resend.dev>";

/// Which providers the dispatcher is allowed to use.
///
/// `Auto` (the default) uses whatever has credentials; the other modes
/// force a single provider regardless of what else is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Auto,
    Smtp,
    Api,
}

impl std::str::FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(DeliveryMode::Auto),
            "smtp" => Ok(DeliveryMode::Smtp),
            "api" => Ok(DeliveryMode::Api),
            other => Err(format!("expected 'auto', 'smtp' or 'api', got '{}'", other)),
        }
    }
}

/// Resend transactional API configuration.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API key; `None` means the provider is unavailable.
    pub api_key: Option<String>,
    /// Sender address used for API sends.
    pub from: String,
}

/// SMTP relay configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    /// Relay port; 465 (the default) uses implicit TLS, anything else STARTTLS.
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address used for relay sends.
    pub from: String,
}

impl SmtpConfig {
    /// Whether host, username and password are all present.
    pub fn is_complete(&self) -> bool {
        self.host.is_some() && self.username.is_some() && self.password.is_some()
    }
}

/// Process-wide email configuration.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub resend: ResendConfig,
    pub smtp: SmtpConfig,
    pub mode: DeliveryMode,
    /// Public base URL of the web application, used for logo and link
    /// assets in rendered emails. Opaque; may be empty.
    pub app_url: String,
}

impl FromEnv for EmailConfig {
    /// Environment variables:
    /// - `RESEND_API_KEY`, `RESEND_FROM`
    /// - `SMTP_HOST`, `SMTP_PORT` (default 465), `SMTP_USER`, `SMTP_PASS`, `SMTP_FROM`
    /// - `EMAIL_FROM`: generic sender override, used when the
    ///   provider-specific override is absent
    /// - `EMAIL_DELIVERY_MODE`: `auto` (default) | `smtp` | `api`
    /// - `APP_PUBLIC_URL`: base URL for email assets
    fn from_env() -> Result<Self, ConfigError> {
        let generic_from = env_opt("EMAIL_FROM");

        let resend = ResendConfig {
            api_key: env_opt("RESEND_API_KEY"),
            from: sender_address(env_opt("RESEND_FROM"), generic_from.as_deref()),
        };

        let port = env_or_default("SMTP_PORT", "465")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "SMTP_PORT".to_string(),
                details: format!("{}", e),
            })?;

        let smtp = SmtpConfig {
            host: env_opt("SMTP_HOST"),
            port,
            username: env_opt("SMTP_USER"),
            password: env_opt("SMTP_PASS"),
            from: sender_address(env_opt("SMTP_FROM"), generic_from.as_deref()),
        };

        let mode = env_or_default("EMAIL_DELIVERY_MODE", "auto")
            .parse()
            .map_err(|details| ConfigError::ParseError {
                key: "EMAIL_DELIVERY_MODE".to_string(),
                details,
            })?;

        Ok(Self {
            resend,
            smtp,
            mode,
            app_url: env_or_default("APP_PUBLIC_URL", ""),
        })
    }
}

/// Sender address precedence: provider-specific override, then the generic
/// override, then the hardcoded default.
fn sender_address(provider_override: Option<String>, generic: Option<&str>) -> String {
    provider_override
        .or_else(|| generic.map(|s| s.to_string()))
        .unwrap_or_else(|| DEFAULT_FROM.to_string())
}

use core_config::{server::ServerConfig, FromEnv};
use domain_notifications::EmailConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration.
/// Composes shared config components from the `core_config` library.
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub email: EmailConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let email = EmailConfig::from_env()?;

        Ok(Self {
            server,
            email,
            environment,
        })
    }
}

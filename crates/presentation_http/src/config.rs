//! Application configuration
//!
//! Loaded from defaults, an optional `config.toml`, and `TEMPBOX_`-prefixed
//! environment variables (e.g. `TEMPBOX_SERVER_PORT`).

use std::fmt;

use axum_extra::extract::cookie::Key;
use integration_mailtm::MailTmConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application environment (development or production)
///
/// Controls how strictly the session signing secret is validated at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - a missing secret falls back to a random key
    #[default]
    Development,
    /// Production environment - a missing or short secret is a startup error
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to derive the cookie signing key; required in production,
    /// must be at least 32 bytes. Never regenerated per process in a
    /// deployed setting.
    #[serde(default, skip_serializing)]
    pub cookie_secret: Option<SecretString>,

    /// Name of the session cookie
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Name of the flash-message cookie
    #[serde(default = "default_flash_cookie")]
    pub flash_cookie: String,
}

fn default_session_cookie() -> String {
    "tempbox_session".to_string()
}

fn default_flash_cookie() -> String {
    "tempbox_flash".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_secret: None,
            session_cookie: default_session_cookie(),
            flash_cookie: default_flash_cookie(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Temporary-mail provider settings
    #[serde(default)]
    pub provider: MailTmConfig,

    /// Session cookie settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Minimum length for the configured cookie secret
const MIN_SECRET_LEN: usize = 32;

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("provider.base_url", "https://api.mail.tm")?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., TEMPBOX_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("TEMPBOX")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Derive the cookie signing key from the configured secret
    ///
    /// In production a missing or short secret refuses to start. In
    /// development a random key is generated with a warning; sessions then
    /// do not survive a restart.
    ///
    /// # Errors
    ///
    /// Returns an error when the secret is absent or shorter than 32 bytes
    /// in a production environment.
    pub fn cookie_key(&self) -> Result<Key, config::ConfigError> {
        match &self.session.cookie_secret {
            Some(secret) if secret.expose_secret().len() >= MIN_SECRET_LEN => {
                Ok(Key::derive_from(secret.expose_secret().as_bytes()))
            }
            Some(_) => Err(config::ConfigError::Message(format!(
                "session.cookie_secret must be at least {MIN_SECRET_LEN} bytes"
            ))),
            None if self.environment == Environment::Production => {
                Err(config::ConfigError::Message(
                    "session.cookie_secret is required in production".to_string(),
                ))
            }
            None => {
                warn!("no session.cookie_secret configured, generating a per-process key");
                Ok(Key::generate())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.provider.base_url, "https://api.mail.tm");
        assert_eq!(config.session.session_cookie, "tempbox_session");
        assert_eq!(config.session.flash_cookie, "tempbox_flash");
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn development_without_secret_generates_a_key() {
        let config = AppConfig::default();
        assert!(config.cookie_key().is_ok());
    }

    #[test]
    fn production_without_secret_is_an_error() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.cookie_key().is_err());
    }

    #[test]
    fn short_secret_is_rejected() {
        let mut config = AppConfig::default();
        config.session.cookie_secret = Some(SecretString::from("too-short"));
        assert!(config.cookie_key().is_err());
    }

    #[test]
    fn long_secret_derives_a_stable_key() {
        let mut config = AppConfig::default();
        config.session.cookie_secret =
            Some(SecretString::from("an-adequately-long-signing-secret-value"));
        let a = config.cookie_key().unwrap();
        let b = config.cookie_key().unwrap();
        assert_eq!(a.master(), b.master());
    }
}

//! mail.tm HTTP client
//!
//! Four thin REST calls plus the one non-trivial sequencing decision in the
//! system: `provision`, which registers an account and exchanges the same
//! credentials for a bearer token, tolerating "account already exists".

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{DomainEntry, HydraCollection, MessageDetail, MessageSummary};

/// Provider client errors
#[derive(Debug, Error)]
pub enum MailTmError {
    /// Provider could not be reached at the transport level
    #[error("Provider unreachable: {0}")]
    Network(String),

    /// Provider answered with an unexpected non-2xx status
    #[error("Unexpected provider response: HTTP {status}")]
    Provider {
        /// HTTP status code returned by the provider
        status: u16,
    },

    /// Provider payload did not match the expected shape
    #[error("Malformed provider payload: {0}")]
    Decode(String),

    /// Credentials or bearer token rejected
    #[error("Credentials or token rejected by the provider")]
    Auth,

    /// Message id unknown to the provider
    #[error("Message not found: {0}")]
    NotFound(String),

    /// Both provisioning steps failed
    #[error("Registration failed ({register}); token exchange also failed ({token})")]
    Provision {
        /// Error from the registration attempt
        register: Box<MailTmError>,
        /// Error from the follow-up token attempt
        token: Box<MailTmError>,
    },
}

/// Outcome of an account registration attempt
///
/// A conflict is success-equivalent: token acquisition with the same
/// credentials is the idempotent proof of ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The provider created the account
    Created,
    /// The account already existed (conflict response)
    AlreadyExists,
}

/// Provider client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailTmConfig {
    /// mail.tm API base URL (default: <https://api.mail.tm>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.mail.tm".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for MailTmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Temporary-mail provider operations
#[async_trait]
pub trait TempMailClient: Send + Sync {
    /// List mail domains currently offered by the provider
    ///
    /// An empty list is returned as-is; callers must treat it as
    /// "no domains available" rather than proceeding.
    async fn list_domains(&self) -> Result<Vec<String>, MailTmError>;

    /// Register an account; a conflict is reported, not failed
    async fn register(
        &self,
        address: &str,
        password: &str,
    ) -> Result<RegisterOutcome, MailTmError>;

    /// Exchange credentials for a bearer token
    async fn obtain_token(&self, address: &str, password: &str) -> Result<String, MailTmError>;

    /// List the mailbox for the given token
    async fn list_messages(&self, token: &str) -> Result<Vec<MessageSummary>, MailTmError>;

    /// Fetch one message by id
    async fn fetch_message(&self, token: &str, id: &str) -> Result<MessageDetail, MailTmError>;

    /// Register-then-token sequence with fallback
    ///
    /// Registration conflicts proceed directly to token exchange. Any other
    /// registration error still gets exactly one token attempt, because the
    /// error may mean the account survived a prior partial attempt; only if
    /// that attempt also fails are both errors surfaced together.
    async fn provision(&self, address: &str, password: &str) -> Result<String, MailTmError> {
        match self.register(address, password).await {
            Ok(RegisterOutcome::Created) => {
                debug!(address, "account registered");
            }
            Ok(RegisterOutcome::AlreadyExists) => {
                debug!(address, "account already existed, proceeding to token exchange");
            }
            Err(register_err) => {
                warn!(address, error = %register_err, "registration failed, attempting token exchange anyway");
                return self.obtain_token(address, password).await.map_err(|token_err| {
                    MailTmError::Provision {
                        register: Box::new(register_err),
                        token: Box::new(token_err),
                    }
                });
            }
        }

        self.obtain_token(address, password).await
    }
}

/// Credentials payload for `/accounts` and `/token`
#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    address: &'a str,
    password: &'a str,
}

/// Response of `POST /token`
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// mail.tm HTTP client implementation
#[derive(Debug, Clone)]
pub struct MailTmClient {
    client: Client,
    config: MailTmConfig,
}

impl MailTmClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: MailTmConfig) -> Result<Self, MailTmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MailTmError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, MailTmError> {
        Self::new(MailTmConfig::default())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Map a non-2xx status to the error taxonomy
    fn status_error(status: StatusCode, message_id: Option<&str>) -> MailTmError {
        match (status, message_id) {
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => MailTmError::Auth,
            (StatusCode::NOT_FOUND, Some(id)) => MailTmError::NotFound(id.to_string()),
            _ => MailTmError::Provider {
                status: status.as_u16(),
            },
        }
    }
}

#[async_trait]
impl TempMailClient for MailTmClient {
    #[instrument(skip(self))]
    async fn list_domains(&self) -> Result<Vec<String>, MailTmError> {
        let response = self
            .client
            .get(self.url("/domains"))
            .send()
            .await
            .map_err(|e| MailTmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, None));
        }

        let collection: HydraCollection<DomainEntry> = response
            .json()
            .await
            .map_err(|e| MailTmError::Decode(e.to_string()))?;

        let domains: Vec<String> = collection
            .member
            .into_iter()
            .filter(|d| d.is_active)
            .map(|d| d.domain)
            .collect();

        debug!(count = domains.len(), "fetched provider domains");
        Ok(domains)
    }

    #[instrument(skip(self, password))]
    async fn register(
        &self,
        address: &str,
        password: &str,
    ) -> Result<RegisterOutcome, MailTmError> {
        let response = self
            .client
            .post(self.url("/accounts"))
            .json(&CredentialsRequest { address, password })
            .send()
            .await
            .map_err(|e| MailTmError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(RegisterOutcome::Created);
        }

        // mail.tm reports an existing account as 422; 409 covers other
        // deployments of the same contract
        if status == StatusCode::CONFLICT || status == StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(RegisterOutcome::AlreadyExists);
        }

        Err(Self::status_error(status, None))
    }

    #[instrument(skip(self, password))]
    async fn obtain_token(&self, address: &str, password: &str) -> Result<String, MailTmError> {
        let response = self
            .client
            .post(self.url("/token"))
            .json(&CredentialsRequest { address, password })
            .send()
            .await
            .map_err(|e| MailTmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, None));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| MailTmError::Decode(e.to_string()))?;

        Ok(body.token)
    }

    #[instrument(skip(self, token))]
    async fn list_messages(&self, token: &str) -> Result<Vec<MessageSummary>, MailTmError> {
        let response = self
            .client
            .get(self.url("/messages"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| MailTmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, None));
        }

        let collection: HydraCollection<MessageSummary> = response
            .json()
            .await
            .map_err(|e| MailTmError::Decode(e.to_string()))?;

        debug!(count = collection.member.len(), "fetched mailbox listing");
        Ok(collection.member)
    }

    #[instrument(skip(self, token))]
    async fn fetch_message(&self, token: &str, id: &str) -> Result<MessageDetail, MailTmError> {
        let response = self
            .client
            .get(self.url(&format!("/messages/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| MailTmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, Some(id)));
        }

        response
            .json()
            .await
            .map_err(|e| MailTmError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = MailTmConfig::default();
        assert_eq!(config.base_url, "https://api.mail.tm");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: MailTmConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, "https://api.mail.tm");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn status_error_maps_auth_statuses() {
        assert!(matches!(
            MailTmClient::status_error(StatusCode::UNAUTHORIZED, None),
            MailTmError::Auth
        ));
        assert!(matches!(
            MailTmClient::status_error(StatusCode::FORBIDDEN, Some("m1")),
            MailTmError::Auth
        ));
    }

    #[test]
    fn status_error_maps_not_found_only_for_message_lookups() {
        let err = MailTmClient::status_error(StatusCode::NOT_FOUND, Some("m1"));
        assert!(matches!(err, MailTmError::NotFound(id) if id == "m1"));

        // A 404 without a message id means the provider contract moved
        assert!(matches!(
            MailTmClient::status_error(StatusCode::NOT_FOUND, None),
            MailTmError::Provider { status: 404 }
        ));
    }

    #[test]
    fn status_error_maps_everything_else_to_provider() {
        assert!(matches!(
            MailTmClient::status_error(StatusCode::INTERNAL_SERVER_ERROR, None),
            MailTmError::Provider { status: 500 }
        ));
    }

    #[test]
    fn provision_error_display_carries_both_causes() {
        let err = MailTmError::Provision {
            register: Box::new(MailTmError::Provider { status: 400 }),
            token: Box::new(MailTmError::Auth),
        };
        let text = err.to_string();
        assert!(text.contains("HTTP 400"));
        assert!(text.contains("rejected"));
    }
}

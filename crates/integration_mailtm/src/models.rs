//! Response models for the mail.tm API
//!
//! List endpoints wrap their payload in a Hydra collection
//! (`hydra:member` / `hydra:totalItems`); item endpoints return the
//! resource directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Hydra collection wrapper used by every list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct HydraCollection<T> {
    /// Collection items
    #[serde(rename = "hydra:member", default = "Vec::new")]
    pub member: Vec<T>,

    /// Total item count across pages
    #[serde(rename = "hydra:totalItems", default)]
    pub total_items: u64,
}

/// One entry of `GET /domains`
#[derive(Debug, Clone, Deserialize)]
pub struct DomainEntry {
    /// Provider-side id
    pub id: String,
    /// The usable mail domain
    pub domain: String,
    /// Whether the domain currently accepts registrations
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// A mail participant as the provider reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Email address
    pub address: String,
    /// Display name, often empty
    #[serde(default)]
    pub name: String,
}

/// Message summary as returned by `GET /messages`
#[derive(Debug, Clone, Deserialize)]
pub struct MessageSummary {
    /// Provider-side message id
    pub id: String,

    /// Subject line; absent for subjectless mail
    #[serde(default)]
    pub subject: Option<String>,

    /// Senders; in practice zero or one entry
    #[serde(rename = "from", default, deserialize_with = "one_or_many")]
    pub from: Vec<Address>,

    /// First characters of the body
    #[serde(default)]
    pub intro: Option<String>,

    /// Whether the message was opened before
    #[serde(default)]
    pub seen: bool,

    /// When the provider received the message
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl MessageSummary {
    /// The first sender address, if the provider reported one
    pub fn sender(&self) -> Option<&str> {
        self.from.first().map(|a| a.address.as_str())
    }
}

/// Full message as returned by `GET /messages/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDetail {
    /// Provider-side message id
    pub id: String,

    /// Subject line
    #[serde(default)]
    pub subject: Option<String>,

    /// Senders
    #[serde(rename = "from", default, deserialize_with = "one_or_many")]
    pub from: Vec<Address>,

    /// Plain-text body
    #[serde(default)]
    pub text: Option<String>,

    /// HTML body; the provider sends one string or an array of fragments
    #[serde(default, deserialize_with = "joined_fragments")]
    pub html: String,

    /// When the provider received the message
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl MessageDetail {
    /// The first sender address, if the provider reported one
    pub fn sender(&self) -> Option<&str> {
        self.from.first().map(|a| a.address.as_str())
    }
}

/// Accept `from` as either a single object or an array of objects
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Address),
        Many(Vec<Address>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(addr)) => vec![addr],
        Some(OneOrMany::Many(addrs)) => addrs,
    })
}

/// Accept `html` as either a single string or an array of fragments
fn joined_fragments<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Fragments {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Fragments>::deserialize(deserializer)? {
        None => String::new(),
        Some(Fragments::One(s)) => s,
        Some(Fragments::Many(parts)) => parts.concat(),
    })
}

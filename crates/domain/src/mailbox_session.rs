//! Mailbox session state machine
//!
//! The browser session is either bound to a provisioned mailbox or it is not;
//! the tagged enum makes partially-populated states (an email without a token,
//! a token without a password) unrepresentable. There is no logout: the only
//! way out of `Active` is a new identity replacing the old one.

use serde::{Deserialize, Serialize};

use crate::value_objects::EmailAddress;

/// Credentials for a provisioned mailbox
///
/// `token` is the bearer credential required for every mailbox read. It stays
/// valid only for as long as the provider honors it; there is no refresh, so
/// once it expires the user regenerates the whole identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provisioned disposable address
    pub email: EmailAddress,
    /// Account password accepted by the provider
    pub password: String,
    /// Bearer token for mailbox reads
    pub token: String,
}

/// Per-browser session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MailboxSession {
    /// No mailbox has been provisioned in this session
    #[default]
    NoIdentity,
    /// A mailbox is bound; all fields were accepted by the provider together
    Active(Identity),
}

impl MailboxSession {
    /// Bind a freshly provisioned identity, replacing any previous one
    ///
    /// An old identity is abandoned at the provider, not deleted.
    pub fn bind(self, identity: Identity) -> Self {
        Self::Active(identity)
    }

    /// The bound identity, if any
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::NoIdentity => None,
            Self::Active(identity) => Some(identity),
        }
    }

    /// Whether a mailbox is currently bound
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

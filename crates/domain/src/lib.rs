//! Domain layer for tempbox
//!
//! Contains the mailbox session state machine, credential generation and
//! value objects. This layer has no I/O and no provider knowledge.

pub mod credentials;
pub mod errors;
pub mod mailbox_session;
pub mod value_objects;

pub use credentials::{generate_local_part, generate_password};
pub use errors::DomainError;
pub use mailbox_session::{Identity, MailboxSession};
pub use value_objects::EmailAddress;

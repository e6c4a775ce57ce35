//! mail.tm temporary-mail integration
//!
//! Wraps the provider's REST API: domain listing, account registration,
//! token exchange and mailbox reads. The provider owns all mail data;
//! nothing is cached on this side.

pub mod client;
pub mod models;

pub use client::{MailTmClient, MailTmConfig, MailTmError, RegisterOutcome, TempMailClient};
pub use models::{Address, HydraCollection, MessageDetail, MessageSummary};

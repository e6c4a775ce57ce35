//! User-facing error messages
//!
//! Every provider failure at the handler boundary becomes a short flash
//! string and a redirect; nothing here is fatal to the process.

use integration_mailtm::MailTmError;

/// Convert a provider error into the short message shown to the user
pub fn user_message(err: &MailTmError) -> String {
    match err {
        MailTmError::Network(_) => "The mail provider could not be reached.".to_string(),
        MailTmError::Provider { status } => {
            format!("The mail provider returned an unexpected response (HTTP {status}).")
        }
        MailTmError::Decode(_) => {
            "The mail provider returned an unreadable response.".to_string()
        }
        MailTmError::Auth => {
            "Your mailbox credentials are no longer valid. Generate a new address.".to_string()
        }
        MailTmError::NotFound(_) => "That message no longer exists.".to_string(),
        MailTmError::Provision { .. } => {
            "Could not set up a mailbox with the provider. Try again.".to_string()
        }
    }
}

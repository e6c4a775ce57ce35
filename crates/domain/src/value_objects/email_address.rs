//! Email address value object with validation
//!
//! Provides a validated email address type that ensures proper format.
//!
//! # Examples
//!
//! ```
//! use domain::EmailAddress;
//!
//! // Create a valid email address
//! let email = EmailAddress::new("user@example.com").unwrap();
//! assert_eq!(email.as_str(), "user@example.com");
//!
//! // Email addresses are normalized to lowercase
//! let email = EmailAddress::new("User@Example.COM").unwrap();
//! assert_eq!(email.as_str(), "user@example.com");
//!
//! // Invalid emails are rejected
//! assert!(EmailAddress::new("invalid").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated email address
///
/// # Examples
///
/// ```
/// use domain::EmailAddress;
///
/// let email = EmailAddress::new("user@example.com").unwrap();
/// assert_eq!(email.local_part(), "user");
/// assert_eq!(email.domain(), "example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Create a new email address, validating the format
    ///
    /// # Errors
    ///
    /// Returns an error if the email format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let value = email.into().trim().to_lowercase();

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidEmailAddress(e.to_string()))?;

        Ok(candidate)
    }

    /// Join a local part and a mail domain into a validated address
    ///
    /// # Errors
    ///
    /// Returns an error if the combined address is not a valid email.
    pub fn from_parts(local_part: &str, domain: &str) -> Result<Self, DomainError> {
        Self::new(format!("{local_part}@{domain}"))
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the local part (before @)
    pub fn local_part(&self) -> &str {
        self.value.split('@').next().unwrap_or("")
    }

    /// Get the domain part (after @)
    pub fn domain(&self) -> &str {
        self.value.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Strategy for generating valid email local parts
    fn valid_local_part() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9._-]{0,15}".prop_map(|s| s.to_lowercase())
    }

    /// Strategy for generating valid email domains
    fn valid_domain() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,10}\\.[a-z]{2,4}".prop_map(|s| s.to_lowercase())
    }

    proptest! {
        #[test]
        fn valid_emails_are_accepted(
            local in valid_local_part(),
            domain in valid_domain()
        ) {
            let email_str = format!("{local}@{domain}");
            if let Ok(email) = EmailAddress::new(&email_str) {
                prop_assert!(email.as_str().contains('@'));
                prop_assert!(!email.local_part().is_empty());
                prop_assert!(!email.domain().is_empty());
            }
        }

        #[test]
        fn email_is_always_lowercase(input in "[A-Za-z]+@[A-Za-z]+\\.[a-z]{2,3}") {
            if let Ok(email) = EmailAddress::new(&input) {
                prop_assert_eq!(email.as_str(), email.as_str().to_lowercase());
            }
        }

        #[test]
        fn from_parts_matches_manual_join(
            local in valid_local_part(),
            domain in valid_domain()
        ) {
            let joined = EmailAddress::from_parts(&local, &domain);
            let manual = EmailAddress::new(format!("{local}@{domain}"));
            match (joined, manual) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(_), Err(_)) => {},
                _ => prop_assert!(false, "from_parts and new disagree"),
            }
        }

        #[test]
        fn strings_without_at_are_rejected(s in "[a-zA-Z0-9.]+") {
            prop_assume!(!s.contains('@'));
            prop_assert!(EmailAddress::new(&s).is_err());
        }
    }
}

//! Random credential generation for disposable accounts
//!
//! The provider accepts any free local part on one of its domains, so the
//! local part and password are plain random strings over a small alphabet.

use rand::Rng;

/// Characters usable in generated local parts and passwords
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated mailbox local part
pub const LOCAL_PART_LEN: usize = 10;

/// Length of a generated account password
pub const PASSWORD_LEN: usize = 12;

fn random_string(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a random mailbox local part (10 lowercase alphanumeric chars)
pub fn generate_local_part() -> String {
    random_string(LOCAL_PART_LEN)
}

/// Generate a random account password (12 lowercase alphanumeric chars)
pub fn generate_password() -> String {
    random_string(PASSWORD_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_part_has_expected_length_and_charset() {
        let local = generate_local_part();
        assert_eq!(local.len(), LOCAL_PART_LEN);
        assert!(local.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn password_has_expected_length_and_charset() {
        let password = generate_password();
        assert_eq!(password.len(), PASSWORD_LEN);
        assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn successive_values_differ() {
        // 36^10 keyspace makes a collision here effectively impossible
        let a = generate_local_part();
        let b = generate_local_part();
        assert_ne!(a, b);
    }

    #[test]
    fn local_part_forms_a_valid_address() {
        let local = generate_local_part();
        let email = crate::EmailAddress::from_parts(&local, "example.com").unwrap();
        assert_eq!(email.local_part(), local);
    }
}

//! Input validation for identity fields.

use once_cell::sync::Lazy;
use regex::Regex;

// Compiled once at first use; the patterns are compile-time constants
// in practice.
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9-]{1,24}$").expect("hardcoded username regex is invalid")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid")
});

/// Validate username shape (1-24 characters, alphanumeric plus hyphen).
pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Validate email format (RFC 5322 simplified).
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_usernames() {
        assert!(validate_username("marion"));
        assert!(validate_username("user-42"));
        assert!(validate_username("A"));
    }

    #[test]
    fn rejects_invalid_usernames() {
        assert!(!validate_username(""));
        assert!(!validate_username("has space"));
        assert!(!validate_username("under_score"));
        assert!(!validate_username("this-name-is-far-too-long-to-fit"));
    }

    #[test]
    fn accepts_valid_emails() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("test.user+tag@sub.example.co.uk"));
    }

    #[test]
    fn rejects_invalid_emails() {
        assert!(!validate_email(""));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("missing@tld"));
    }
}

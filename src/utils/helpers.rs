//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Validate phone number format: exactly ten ASCII digits
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Check that trimmed text has at least `min` characters
pub fn has_min_chars(text: &str, min: usize) -> bool {
    text.trim().chars().count() >= min
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("nguyen.van.a@gmail.com"));
        assert!(!is_valid_email("nguyen.van.a"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@gmail."));
        assert!(!is_valid_email("a b@gmail.com"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("0987654321"));
        assert!(!is_valid_phone("098765432"));
        assert!(!is_valid_phone("09876543210"));
        assert!(!is_valid_phone("098765432a"));
    }

    #[test]
    fn test_has_min_chars() {
        assert!(has_min_chars("Li", 2));
        assert!(!has_min_chars(" A ", 2));
        assert!(has_min_chars("Đỗ", 2));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Mr.   John  Doe "), "Mr. John Doe");
    }
}

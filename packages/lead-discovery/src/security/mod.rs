//! Provider API keys.
//!
//! Keys are held as [`secrecy::SecretString`] so they never reach logs or
//! debug output. A blank value is treated the same as an absent one: the
//! provider stays unconfigured and discovery fails fast.

pub use secrecy::{ExposeSecret, SecretString};

/// Normalise a raw key from the environment or a caller.
///
/// Surrounding whitespace is stripped; an empty result yields `None`.
pub fn api_key(raw: Option<&str>) -> Option<SecretString> {
    raw.map(str::trim)
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        assert!(api_key(None).is_none());
    }

    #[test]
    fn test_blank_key_is_none() {
        assert!(api_key(Some("")).is_none());
        assert!(api_key(Some(" \t\n")).is_none());
    }

    #[test]
    fn test_key_is_trimmed() {
        let key = api_key(Some("  serp-0123456789abcdef\n")).unwrap();
        assert_eq!(key.expose_secret(), "serp-0123456789abcdef");
    }

    #[test]
    fn test_key_redacted_in_debug() {
        let key = api_key(Some("serp-0123456789abcdef")).unwrap();
        assert!(!format!("{:?}", key).contains("serp-0123456789abcdef"));
    }
}

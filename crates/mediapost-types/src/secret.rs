//! Redacting wrapper for credential values.
//!
//! [`SecretString`] holds app secrets, access tokens and session cookies
//! that arrive inside a request's credentials bag. The value is reachable
//! only through [`expose`](SecretString::expose); `Debug`, `Display` and
//! `Serialize` never reveal it.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A credential value that must not leak into logs or replies.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for building auth headers and request bodies.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the value is empty or whitespace only.
    ///
    /// Credential validation treats blank values the same as absent ones.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "\"\"")
        } else {
            write!(f, "\"[REDACTED]\"")
        }
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            f.write_str("[REDACTED]")
        }
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_redact() {
        let s = SecretString::new("wx-app-secret");
        assert_eq!(format!("{s:?}"), "\"[REDACTED]\"");
        assert_eq!(format!("{s}"), "[REDACTED]");
        assert!(!format!("{s:?}{s}").contains("wx-app-secret"));
    }

    #[test]
    fn empty_value_formats_empty() {
        let s = SecretString::default();
        assert_eq!(format!("{s:?}"), "\"\"");
        assert_eq!(format!("{s}"), "");
    }

    #[test]
    fn blank_detection() {
        assert!(SecretString::default().is_blank());
        assert!(SecretString::new("   \t").is_blank());
        assert!(!SecretString::new("x").is_blank());
    }

    #[test]
    fn serialize_never_emits_value() {
        let json = serde_json::to_string(&SecretString::new("SESSDATA-123")).unwrap();
        assert_eq!(json, "\"\"");
    }

    #[test]
    fn deserialize_plain_string() {
        let s: SecretString = serde_json::from_str("\"tok\"").unwrap();
        assert_eq!(s.expose(), "tok");
    }

    #[test]
    fn deserialize_rejects_non_string() {
        assert!(serde_json::from_str::<SecretString>("42").is_err());
    }
}

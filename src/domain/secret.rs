//! Secret string wrapper
//!
//! Keeps credentials out of `Debug` output, log lines and printed plans.

use std::fmt;

use serde::{Serialize, Serializer};

const MASK: &str = "********";

/// A credential that must never be displayed
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw value. Only call this when handing it to the consumer.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({MASK})")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_display_is_masked() {
        let secret = Secret::new("hunter2");
        assert_eq!(secret.to_string(), "********");
        assert!(!format!("{secret:?}").contains("hunter2"));
    }

    #[test]
    fn test_secret_expose() {
        assert_eq!(Secret::new("hunter2").expose(), "hunter2");
    }

    #[test]
    fn test_secret_serializes_masked() {
        let json = serde_json::to_string(&Secret::new("hunter2")).unwrap();
        assert_eq!(json, "\"********\"");
    }
}

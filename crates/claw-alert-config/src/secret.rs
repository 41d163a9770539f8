//! Secret values that must not be revealed when a config is written back out.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder written in place of every secret value.
pub const SECRET_TOKEN: &str = "<secret>";

/// The placeholder as a JSON string literal, computed once.
pub static SECRET_TOKEN_JSON: Lazy<String> =
    Lazy::new(|| serde_json::to_string(SECRET_TOKEN).unwrap_or_else(|_| unreachable!()));

/// Returns true if `s` is the placeholder, either bare or JSON-encoded.
#[must_use]
pub fn is_secret_token(s: &str) -> bool {
    s == SECRET_TOKEN || s == SECRET_TOKEN_JSON.as_str()
}

/// A string that serializes as [`SECRET_TOKEN`].
///
/// An empty secret counts as unset; config fields holding a `Secret` skip
/// serialization when it is empty.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if no value is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the value is the placeholder read back from a
    /// previously serialized config.
    #[must_use]
    pub fn is_redacted(&self) -> bool {
        is_secret_token(&self.0)
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Secret(\"\")")
        } else {
            write!(f, "Secret({SECRET_TOKEN})")
        }
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(SECRET_TOKEN)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}

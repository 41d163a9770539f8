//! URL and address value types used by receiver and global configs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ::url::Url;

use crate::error::{ConfigError, Result};
use crate::secret::{SECRET_TOKEN, is_secret_token};

/// An absolute `http` or `https` URL with a host.
///
/// Cloning yields an independent value, so normalizing a copy taken from the
/// global config never changes the global config itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HttpUrl(Url);

impl HttpUrl {
    /// Parses and checks a URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL does not parse, its scheme
    /// is not `http` or `https`, or it has no host.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: input.to_string(),
            reason,
        };

        let url = Url::parse(input).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme {:?} for URL", url.scheme())));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host for URL".to_string()));
        }
        Ok(Self(url))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the URL path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Returns the underlying [`Url`].
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }

    /// Appends a `/` to the path unless it already ends with one.
    pub fn ensure_trailing_slash(&mut self) {
        let path = self.0.path();
        if !path.ends_with('/') {
            let with_slash = format!("{path}/");
            self.0.set_path(&with_slash);
        }
    }

    /// Returns a copy whose path ends with `/`.
    #[must_use]
    pub fn with_trailing_slash(&self) -> Self {
        let mut copy = self.clone();
        copy.ensure_trailing_slash();
        copy
    }
}

impl FromStr for HttpUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HttpUrl {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<HttpUrl> for String {
    fn from(u: HttpUrl) -> Self {
        u.0.into()
    }
}

impl fmt::Display for HttpUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL that must not be revealed on output, such as a Slack webhook.
///
/// Serializes to [`SECRET_TOKEN`]. Decoding the placeholder yields
/// [`SecretUrl::Redacted`] rather than a URL parse error, so a previously
/// written config can be read back.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretUrl {
    /// The value was read back from a redacted document.
    Redacted,
    /// A real URL.
    Url(HttpUrl),
}

impl SecretUrl {
    /// Parses a URL, recognizing the placeholder.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` for anything that is neither the
    /// placeholder nor a valid http(s) URL.
    pub fn parse(input: &str) -> Result<Self> {
        if is_secret_token(input) {
            return Ok(Self::Redacted);
        }
        HttpUrl::parse(input).map(Self::Url)
    }

    /// Returns the URL unless this is the redacted sentinel.
    #[must_use]
    pub const fn url(&self) -> Option<&HttpUrl> {
        match self {
            Self::Redacted => None,
            Self::Url(u) => Some(u),
        }
    }

    /// Returns true for the redacted sentinel.
    #[must_use]
    pub const fn is_redacted(&self) -> bool {
        matches!(self, Self::Redacted)
    }
}

impl From<HttpUrl> for SecretUrl {
    fn from(u: HttpUrl) -> Self {
        Self::Url(u)
    }
}

impl fmt::Debug for SecretUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redacted => f.write_str("SecretUrl::Redacted"),
            Self::Url(_) => write!(f, "SecretUrl({SECRET_TOKEN})"),
        }
    }
}

impl Serialize for SecretUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(SECRET_TOKEN)
    }
}

impl<'de> Deserialize<'de> for SecretUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A `host:port` network address. Empty host and port mean unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostPort {
    /// Host name or IP address.
    pub host: String,
    /// Port number or service name.
    pub port: String,
}

impl HostPort {
    /// Parses a `host:port` string; the empty string is the unset address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHostPort` when the port is missing or
    /// empty, or the host is malformed.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }
        let invalid = |reason: &str| ConfigError::InvalidHostPort {
            address: input.to_string(),
            reason: reason.to_string(),
        };

        let (host, port) = if let Some(rest) = input.strip_prefix('[') {
            let (host, after) = rest
                .split_once(']')
                .ok_or_else(|| invalid("missing ']' in address"))?;
            let port = after
                .strip_prefix(':')
                .ok_or_else(|| invalid("missing port in address"))?;
            (host, port)
        } else {
            let (host, port) = input
                .rsplit_once(':')
                .ok_or_else(|| invalid("missing port in address"))?;
            if host.contains(':') {
                return Err(invalid("too many colons in address"));
            }
            (host, port)
        };

        if port.is_empty() {
            return Err(invalid("port cannot be empty"));
        }

        Ok(Self {
            host: host.to_string(),
            port: port.to_string(),
        })
    }

    /// Returns true if neither host nor port is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.port.is_empty()
    }
}

impl TryFrom<String> for HostPort {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<HostPort> for String {
    fn from(hp: HostPort) -> Self {
        hp.to_string()
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

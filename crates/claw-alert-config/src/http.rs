//! HTTP client settings shared by webhook-style notifiers.

use serde::{Deserialize, Serialize};

use crate::address::HttpUrl;
use crate::error::{ConfigError, Result};
use crate::secret::Secret;

/// HTTP basic authentication credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicAuth {
    /// User name.
    pub username: String,
    /// Password.
    #[serde(default, skip_serializing_if = "Secret::is_empty")]
    pub password: Secret,
}

/// TLS settings for outbound connections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TlsConfig {
    /// CA certificate used to validate the server certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
    /// Client certificate for mutual TLS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,
    /// Client key for mutual TLS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    /// Server name used for SNI and certificate verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    /// Disable server certificate verification.
    pub insecure_skip_verify: bool,
}

impl TlsConfig {
    /// Checks that a client certificate and key are given together.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHttpConfig` if only one of the two is set.
    pub fn validate(&self) -> Result<()> {
        match (&self.cert_file, &self.key_file) {
            (Some(_), None) => Err(ConfigError::InvalidHttpConfig {
                reason: "client cert file specified without client key file".to_string(),
            }),
            (None, Some(_)) => Err(ConfigError::InvalidHttpConfig {
                reason: "client key file specified without client cert file".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Settings for the HTTP client a notifier uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpClientConfig {
    /// Basic authentication credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    /// Bearer token sent in the `Authorization` header.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub bearer_token: Secret,
    /// File to read the bearer token from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token_file: Option<String>,
    /// Proxy to route requests through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<HttpUrl>,
    /// TLS settings.
    pub tls_config: TlsConfig,
}

impl HttpClientConfig {
    /// Checks that at most one authorization method is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHttpConfig` on conflicting settings.
    pub fn validate(&self) -> Result<()> {
        let has_token = !self.bearer_token.is_empty();
        let has_token_file = self.bearer_token_file.as_deref().is_some_and(|f| !f.is_empty());

        if has_token && has_token_file {
            return Err(ConfigError::InvalidHttpConfig {
                reason: "at most one of bearer_token & bearer_token_file must be configured"
                    .to_string(),
            });
        }
        if self.basic_auth.is_some() && (has_token || has_token_file) {
            return Err(ConfigError::InvalidHttpConfig {
                reason: "at most one of basic_auth, bearer_token & bearer_token_file must be configured"
                    .to_string(),
            });
        }
        self.tls_config.validate()
    }
}

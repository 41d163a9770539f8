//! Settings that apply to every receiver unless a channel config overrides them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::address::{HostPort, HttpUrl, SecretUrl};
use crate::duration::ConfigDuration;
use crate::error::Result;
use crate::http::HttpClientConfig;
use crate::secret::Secret;

/// Default PagerDuty events endpoint.
pub const DEFAULT_PAGERDUTY_URL: &str = "https://events.pagerduty.com/v2/enqueue";
/// Default OpsGenie API base.
pub const DEFAULT_OPSGENIE_API_URL: &str = "https://api.opsgenie.com/";
/// Default WeChat API base.
pub const DEFAULT_WECHAT_API_URL: &str = "https://qyapi.weixin.qq.com/cgi-bin/";
/// Default VictorOps REST endpoint.
pub const DEFAULT_VICTOROPS_API_URL: &str =
    "https://alert.victorops.com/integrations/generic/20131114/alert/";

static PAGERDUTY_URL: Lazy<HttpUrl> = Lazy::new(|| parse_builtin(DEFAULT_PAGERDUTY_URL));
static OPSGENIE_API_URL: Lazy<HttpUrl> = Lazy::new(|| parse_builtin(DEFAULT_OPSGENIE_API_URL));
static WECHAT_API_URL: Lazy<HttpUrl> = Lazy::new(|| parse_builtin(DEFAULT_WECHAT_API_URL));
static VICTOROPS_API_URL: Lazy<HttpUrl> = Lazy::new(|| parse_builtin(DEFAULT_VICTOROPS_API_URL));

fn parse_builtin(url: &str) -> HttpUrl {
    HttpUrl::parse(url).unwrap_or_else(|_| unreachable!())
}

/// Global configuration block.
///
/// Keys left out of a `global` block keep their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Time after which an alert is declared resolved if it was not updated.
    pub resolve_timeout: ConfigDuration,
    /// HTTP client settings inherited by channel configs.
    pub http_config: HttpClientConfig,

    /// Default sender address for email.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_from: String,
    /// Host name sent in the SMTP `HELO`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_hello: String,
    /// Default SMTP server.
    #[serde(skip_serializing_if = "HostPort::is_empty")]
    pub smtp_smarthost: HostPort,
    /// SMTP authentication user.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_auth_username: String,
    /// SMTP authentication password.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub smtp_auth_password: Secret,
    /// SMTP CRAM-MD5 secret.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub smtp_auth_secret: Secret,
    /// SMTP PLAIN identity.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smtp_auth_identity: String,
    /// Require STARTTLS.
    pub smtp_require_tls: bool,

    /// Default Slack webhook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_api_url: Option<SecretUrl>,
    /// Default PagerDuty endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagerduty_url: Option<HttpUrl>,
    /// Default OpsGenie API base.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opsgenie_api_url: Option<HttpUrl>,
    /// Default OpsGenie API key.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub opsgenie_api_key: Secret,
    /// Default WeChat API base.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_api_url: Option<HttpUrl>,
    /// Default WeChat API secret.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub wechat_api_secret: Secret,
    /// Default WeChat corporation id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wechat_api_corp_id: String,
    /// Default VictorOps endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victorops_api_url: Option<HttpUrl>,
    /// Default VictorOps API key.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub victorops_api_key: Secret,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            resolve_timeout: ConfigDuration::from_mins(5),
            http_config: HttpClientConfig::default(),
            smtp_from: String::new(),
            smtp_hello: "localhost".to_string(),
            smtp_smarthost: HostPort::default(),
            smtp_auth_username: String::new(),
            smtp_auth_password: Secret::default(),
            smtp_auth_secret: Secret::default(),
            smtp_auth_identity: String::new(),
            smtp_require_tls: true,
            slack_api_url: None,
            pagerduty_url: Some(PAGERDUTY_URL.clone()),
            opsgenie_api_url: Some(OPSGENIE_API_URL.clone()),
            opsgenie_api_key: Secret::default(),
            wechat_api_url: Some(WECHAT_API_URL.clone()),
            wechat_api_secret: Secret::default(),
            wechat_api_corp_id: String::new(),
            victorops_api_url: Some(VICTOROPS_API_URL.clone()),
            victorops_api_key: Secret::default(),
        }
    }
}

impl GlobalConfig {
    /// Checks the shared HTTP client settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHttpConfig` on conflicting settings.
    pub fn validate(&self) -> Result<()> {
        self.http_config.validate()
    }
}

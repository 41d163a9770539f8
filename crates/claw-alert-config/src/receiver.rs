//! Receivers and the notification channel configs they hold.
//!
//! A channel config is decoded with its documented defaults in place, then
//! [`Receiver::prepare`] checks its own required fields and fills the rest
//! from the [`GlobalConfig`]. Values taken from the global block are copies;
//! normalizing them never alters the global block.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::{HostPort, HttpUrl, SecretUrl};
use crate::duration::ConfigDuration;
use crate::error::{ConfigError, Result};
use crate::global::GlobalConfig;
use crate::http::{HttpClientConfig, TlsConfig};
use crate::secret::Secret;

fn template(name: &str) -> String {
    format!("{{{{ template \"{name}\" . }}}}")
}

/// Behaviour shared by every notification channel config.
pub trait ChannelConfig: Send + Sync + fmt::Debug {
    /// Channel kind as written in error messages, e.g. `email`.
    const KIND: &'static str;

    /// Returns true if resolved notifications are sent.
    fn send_resolved(&self) -> bool;

    /// Checks fields that have no global fallback and normalizes values in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidChannelConfig` for a missing required
    /// field, or the error of a nested value check.
    fn normalize(&mut self) -> Result<()>;

    /// Fills unset fields from the global block.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingGlobalDefault` when a required field is
    /// unset both here and in the global block.
    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()>;
}

fn inherit_http(slot: &mut Option<HttpClientConfig>, global: &GlobalConfig) {
    if slot.is_none() {
        *slot = Some(global.http_config.clone());
    }
}

fn check_http(slot: Option<&HttpClientConfig>) -> Result<()> {
    slot.map_or(Ok(()), HttpClientConfig::validate)
}

fn inherit_url(
    slot: &mut Option<HttpUrl>,
    global: Option<&HttpUrl>,
    provider: &'static str,
) -> Result<()> {
    if slot.is_none() {
        let url = global.ok_or(ConfigError::MissingGlobalDefault {
            provider,
            field: "URL",
        })?;
        *slot = Some(url.clone());
    }
    Ok(())
}

fn inherit_secret(
    slot: &mut Secret,
    global: &Secret,
    provider: &'static str,
    field: &'static str,
) -> Result<()> {
    if slot.is_empty() {
        if global.is_empty() {
            return Err(ConfigError::MissingGlobalDefault { provider, field });
        }
        slot.clone_from(global);
    }
    Ok(())
}

/// Turns a header name into its canonical form, e.g. `content-type` into
/// `Content-Type`.
fn canonical_header(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Email notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailConfig {
    /// Notify about resolved alerts.
    pub send_resolved: bool,
    /// Recipient address.
    pub to: String,
    /// Sender address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Host name sent in the SMTP `HELO`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hello: String,
    /// SMTP server.
    #[serde(skip_serializing_if = "HostPort::is_empty")]
    pub smarthost: HostPort,
    /// SMTP authentication user.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_username: String,
    /// SMTP authentication password.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub auth_password: Secret,
    /// SMTP CRAM-MD5 secret.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub auth_secret: Secret,
    /// SMTP PLAIN identity.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_identity: String,
    /// Extra message headers, keyed by canonical header name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// HTML body template.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub html: String,
    /// Plain text body template.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Require STARTTLS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_tls: Option<bool>,
    /// TLS settings for the SMTP connection.
    pub tls_config: TlsConfig,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            send_resolved: false,
            to: String::new(),
            from: String::new(),
            hello: String::new(),
            smarthost: HostPort::default(),
            auth_username: String::new(),
            auth_password: Secret::default(),
            auth_secret: Secret::default(),
            auth_identity: String::new(),
            headers: BTreeMap::new(),
            html: template("email.default.html"),
            text: String::new(),
            require_tls: None,
            tls_config: TlsConfig::default(),
        }
    }
}

impl ChannelConfig for EmailConfig {
    const KIND: &'static str = "email";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn normalize(&mut self) -> Result<()> {
        if self.to.is_empty() {
            return Err(ConfigError::channel(Self::KIND, "missing to address"));
        }

        let mut normalized = BTreeMap::new();
        for (name, value) in std::mem::take(&mut self.headers) {
            let canonical = canonical_header(&name);
            if normalized.contains_key(&canonical) {
                return Err(ConfigError::channel(
                    Self::KIND,
                    format!("duplicate header {canonical:?}"),
                ));
            }
            normalized.insert(canonical, value);
        }
        self.headers = normalized;

        self.tls_config.validate()
    }

    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()> {
        if self.smarthost.is_empty() {
            if global.smtp_smarthost.is_empty() {
                return Err(ConfigError::MissingGlobalDefault {
                    provider: "SMTP",
                    field: "smarthost",
                });
            }
            self.smarthost.clone_from(&global.smtp_smarthost);
        }
        if self.from.is_empty() {
            if global.smtp_from.is_empty() {
                return Err(ConfigError::MissingGlobalDefault {
                    provider: "SMTP",
                    field: "from",
                });
            }
            self.from.clone_from(&global.smtp_from);
        }
        if self.hello.is_empty() {
            self.hello.clone_from(&global.smtp_hello);
        }
        if self.auth_username.is_empty() {
            self.auth_username.clone_from(&global.smtp_auth_username);
        }
        if self.auth_password.is_empty() {
            self.auth_password.clone_from(&global.smtp_auth_password);
        }
        if self.auth_secret.is_empty() {
            self.auth_secret.clone_from(&global.smtp_auth_secret);
        }
        if self.auth_identity.is_empty() {
            self.auth_identity.clone_from(&global.smtp_auth_identity);
        }
        if self.require_tls.is_none() {
            self.require_tls = Some(global.smtp_require_tls);
        }
        Ok(())
    }
}

/// PagerDuty notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagerdutyConfig {
    /// Notify about resolved alerts.
    pub send_resolved: bool,
    /// HTTP client settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    /// Integration key for the Events API v1.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub service_key: Secret,
    /// Integration key for the Events API v2.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub routing_key: Secret,
    /// Events endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<HttpUrl>,
    /// Client name template.
    pub client: String,
    /// Client link template.
    pub client_url: String,
    /// Incident description template.
    pub description: String,
    /// Extra incident details.
    pub details: BTreeMap<String, String>,
    /// Incident severity.
    pub severity: String,
    /// Incident class.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class: String,
    /// Affected component.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub component: String,
    /// Logical group of components.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
}

fn default_pagerduty_details() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "firing".to_string(),
            "{{ template \"pagerduty.default.instances\" .Alerts.Firing }}".to_string(),
        ),
        (
            "resolved".to_string(),
            "{{ template \"pagerduty.default.instances\" .Alerts.Resolved }}".to_string(),
        ),
        (
            "num_firing".to_string(),
            "{{ .Alerts.Firing | len }}".to_string(),
        ),
        (
            "num_resolved".to_string(),
            "{{ .Alerts.Resolved | len }}".to_string(),
        ),
    ])
}

impl Default for PagerdutyConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            service_key: Secret::default(),
            routing_key: Secret::default(),
            url: None,
            client: template("pagerduty.default.client"),
            client_url: template("pagerduty.default.clientURL"),
            description: template("pagerduty.default.description"),
            details: default_pagerduty_details(),
            severity: "error".to_string(),
            class: String::new(),
            component: String::new(),
            group: String::new(),
        }
    }
}

impl ChannelConfig for PagerdutyConfig {
    const KIND: &'static str = "pagerduty";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn normalize(&mut self) -> Result<()> {
        if self.routing_key.is_empty() && self.service_key.is_empty() {
            return Err(ConfigError::channel(
                Self::KIND,
                "missing service or routing key",
            ));
        }
        for (key, value) in default_pagerduty_details() {
            self.details.entry(key).or_insert(value);
        }
        check_http(self.http_config.as_ref())
    }

    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()> {
        inherit_http(&mut self.http_config, global);
        inherit_url(&mut self.url, global.pagerduty_url.as_ref(), "PagerDuty")
    }
}

/// Slack notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlackConfig {
    /// Notify about resolved alerts.
    pub send_resolved: bool,
    /// HTTP client settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    /// Incoming webhook URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<SecretUrl>,
    /// Channel or user to post to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel: String,
    /// Name the message is posted as.
    pub username: String,
    /// Attachment color.
    pub color: String,
    /// Message title.
    pub title: String,
    /// Link behind the title.
    pub title_link: String,
    /// Text shown above the attachment.
    pub pretext: String,
    /// Attachment body.
    pub text: String,
    /// Attachment footer.
    pub footer: String,
    /// Plain text summary for clients without attachment support.
    pub fallback: String,
    /// Emoji used as the poster's icon.
    pub icon_emoji: String,
    /// Image used as the poster's icon.
    pub icon_url: String,
    /// Image shown in the attachment.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    /// Thumbnail shown in the attachment.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub thumb_url: String,
    /// Render fields side by side.
    pub short_fields: bool,
    /// Link channel and user names.
    pub link_names: bool,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            send_resolved: false,
            http_config: None,
            api_url: None,
            channel: String::new(),
            username: template("slack.default.username"),
            color: r#"{{ if eq .Status "firing" }}danger{{ else }}good{{ end }}"#.to_string(),
            title: template("slack.default.title"),
            title_link: template("slack.default.titlelink"),
            pretext: template("slack.default.pretext"),
            text: template("slack.default.text"),
            footer: template("slack.default.footer"),
            fallback: template("slack.default.fallback"),
            icon_emoji: template("slack.default.iconemoji"),
            icon_url: template("slack.default.iconurl"),
            image_url: String::new(),
            thumb_url: String::new(),
            short_fields: false,
            link_names: false,
        }
    }
}

impl ChannelConfig for SlackConfig {
    const KIND: &'static str = "slack";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn normalize(&mut self) -> Result<()> {
        check_http(self.http_config.as_ref())
    }

    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()> {
        inherit_http(&mut self.http_config, global);
        if self.api_url.is_none() {
            let url = global
                .slack_api_url
                .as_ref()
                .ok_or(ConfigError::MissingGlobalDefault {
                    provider: "Slack",
                    field: "API URL",
                })?;
            self.api_url = Some(url.clone());
        }
        Ok(())
    }
}

/// Generic webhook notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebhookConfig {
    /// Notify about resolved alerts.
    pub send_resolved: bool,
    /// HTTP client settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    /// Endpoint receiving the JSON payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<HttpUrl>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            url: None,
        }
    }
}

impl ChannelConfig for WebhookConfig {
    const KIND: &'static str = "webhook";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn normalize(&mut self) -> Result<()> {
        if self.url.is_none() {
            return Err(ConfigError::channel(Self::KIND, "missing URL"));
        }
        check_http(self.http_config.as_ref())
    }

    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()> {
        inherit_http(&mut self.http_config, global);
        Ok(())
    }
}

/// OpsGenie notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpsGenieConfig {
    /// Notify about resolved alerts.
    pub send_resolved: bool,
    /// HTTP client settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    /// API key.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub api_key: Secret,
    /// API base; always ends in `/` once prepared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<HttpUrl>,
    /// Alert message template.
    pub message: String,
    /// Alert description template.
    pub description: String,
    /// Alert source template.
    pub source: String,
    /// Extra alert details.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
    /// Teams responsible for the alert.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub teams: String,
    /// Comma separated tags.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tags: String,
    /// Additional note.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    /// Alert priority, `P1` to `P5`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub priority: String,
}

impl Default for OpsGenieConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            api_key: Secret::default(),
            api_url: None,
            message: template("opsgenie.default.message"),
            description: template("opsgenie.default.description"),
            source: template("opsgenie.default.source"),
            details: BTreeMap::new(),
            teams: String::new(),
            tags: String::new(),
            note: String::new(),
            priority: String::new(),
        }
    }
}

impl ChannelConfig for OpsGenieConfig {
    const KIND: &'static str = "opsgenie";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn normalize(&mut self) -> Result<()> {
        check_http(self.http_config.as_ref())
    }

    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()> {
        inherit_http(&mut self.http_config, global);
        inherit_url(&mut self.api_url, global.opsgenie_api_url.as_ref(), "OpsGenie")?;
        if let Some(url) = self.api_url.as_mut() {
            url.ensure_trailing_slash();
        }
        inherit_secret(&mut self.api_key, &global.opsgenie_api_key, "OpsGenie", "API Key")
    }
}

/// WeChat notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WechatConfig {
    /// Notify about resolved alerts.
    pub send_resolved: bool,
    /// HTTP client settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    /// API secret.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub api_secret: Secret,
    /// Corporation id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub corp_id: String,
    /// API base; always ends in `/` once prepared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<HttpUrl>,
    /// Message template.
    pub message: String,
    /// Recipient users.
    pub to_user: String,
    /// Recipient departments.
    pub to_party: String,
    /// Recipient tags.
    pub to_tag: String,
    /// Application id.
    pub agent_id: String,
}

impl Default for WechatConfig {
    fn default() -> Self {
        Self {
            send_resolved: false,
            http_config: None,
            api_secret: Secret::default(),
            corp_id: String::new(),
            api_url: None,
            message: template("wechat.default.message"),
            to_user: template("wechat.default.to_user"),
            to_party: template("wechat.default.to_party"),
            to_tag: template("wechat.default.to_tag"),
            agent_id: template("wechat.default.agent_id"),
        }
    }
}

impl ChannelConfig for WechatConfig {
    const KIND: &'static str = "wechat";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn normalize(&mut self) -> Result<()> {
        check_http(self.http_config.as_ref())
    }

    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()> {
        inherit_http(&mut self.http_config, global);
        inherit_url(&mut self.api_url, global.wechat_api_url.as_ref(), "Wechat")?;
        inherit_secret(&mut self.api_secret, &global.wechat_api_secret, "Wechat", "ApiSecret")?;
        if self.corp_id.is_empty() {
            if global.wechat_api_corp_id.is_empty() {
                return Err(ConfigError::MissingGlobalDefault {
                    provider: "Wechat",
                    field: "CorpID",
                });
            }
            self.corp_id.clone_from(&global.wechat_api_corp_id);
        }
        if let Some(url) = self.api_url.as_mut() {
            url.ensure_trailing_slash();
        }
        Ok(())
    }
}

/// Pushover notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushoverConfig {
    /// Notify about resolved alerts.
    pub send_resolved: bool,
    /// HTTP client settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    /// Recipient user key.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub user_key: Secret,
    /// Application token.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub token: Secret,
    /// Notification title template.
    pub title: String,
    /// Notification body template.
    pub message: String,
    /// Supplementary URL template.
    pub url: String,
    /// Priority template.
    pub priority: String,
    /// How often an emergency notification is retried.
    pub retry: ConfigDuration,
    /// How long an emergency notification is retried.
    pub expire: ConfigDuration,
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            user_key: Secret::default(),
            token: Secret::default(),
            title: template("pushover.default.title"),
            message: template("pushover.default.message"),
            url: template("pushover.default.url"),
            priority: r#"{{ if eq .Status "firing" }}2{{ else }}0{{ end }}"#.to_string(),
            retry: ConfigDuration::from_mins(1),
            expire: ConfigDuration::from_hours(1),
        }
    }
}

impl ChannelConfig for PushoverConfig {
    const KIND: &'static str = "pushover";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn normalize(&mut self) -> Result<()> {
        if self.user_key.is_empty() {
            return Err(ConfigError::channel(Self::KIND, "missing user key"));
        }
        if self.token.is_empty() {
            return Err(ConfigError::channel(Self::KIND, "missing token"));
        }
        check_http(self.http_config.as_ref())
    }

    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()> {
        inherit_http(&mut self.http_config, global);
        Ok(())
    }
}

/// VictorOps notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VictorOpsConfig {
    /// Notify about resolved alerts.
    pub send_resolved: bool,
    /// HTTP client settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpClientConfig>,
    /// API key.
    #[serde(skip_serializing_if = "Secret::is_empty")]
    pub api_key: Secret,
    /// REST endpoint; always ends in `/` once prepared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<HttpUrl>,
    /// Routing key selecting the escalation policy.
    pub routing_key: String,
    /// Incident type, e.g. `CRITICAL`.
    pub message_type: String,
    /// Long incident description template.
    pub state_message: String,
    /// Incident summary template.
    pub entity_display_name: String,
    /// Name of the reporting system.
    pub monitoring_tool: String,
}

impl Default for VictorOpsConfig {
    fn default() -> Self {
        Self {
            send_resolved: true,
            http_config: None,
            api_key: Secret::default(),
            api_url: None,
            routing_key: String::new(),
            message_type: "CRITICAL".to_string(),
            state_message: template("victorops.default.state_message"),
            entity_display_name: template("victorops.default.entity_display_name"),
            monitoring_tool: template("victorops.default.monitoring_tool"),
        }
    }
}

impl ChannelConfig for VictorOpsConfig {
    const KIND: &'static str = "victorops";

    fn send_resolved(&self) -> bool {
        self.send_resolved
    }

    fn normalize(&mut self) -> Result<()> {
        if self.routing_key.is_empty() {
            return Err(ConfigError::channel(Self::KIND, "missing routing key"));
        }
        check_http(self.http_config.as_ref())
    }

    fn apply_global(&mut self, global: &GlobalConfig) -> Result<()> {
        inherit_http(&mut self.http_config, global);
        inherit_url(&mut self.api_url, global.victorops_api_url.as_ref(), "VictorOps")?;
        if let Some(url) = self.api_url.as_mut() {
            url.ensure_trailing_slash();
        }
        inherit_secret(&mut self.api_key, &global.victorops_api_key, "VictorOps", "API Key")
    }
}

/// A named set of notification channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Receiver {
    /// Unique receiver name referenced by routes.
    #[serde(default)]
    pub name: String,
    /// Email channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_configs: Vec<EmailConfig>,
    /// PagerDuty channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pagerduty_configs: Vec<PagerdutyConfig>,
    /// Slack channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slack_configs: Vec<SlackConfig>,
    /// Webhook channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_configs: Vec<WebhookConfig>,
    /// OpsGenie channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opsgenie_configs: Vec<OpsGenieConfig>,
    /// WeChat channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wechat_configs: Vec<WechatConfig>,
    /// Pushover channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pushover_configs: Vec<PushoverConfig>,
    /// VictorOps channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub victorops_configs: Vec<VictorOpsConfig>,
}

fn prepare_all<C: ChannelConfig>(configs: &mut [C], global: &GlobalConfig) -> Result<()> {
    for config in configs {
        config.normalize()?;
        config.apply_global(global)?;
    }
    Ok(())
}

impl Receiver {
    /// Creates a receiver with no channels.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks every channel config and fills its unset fields from `global`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyReceiverName` for an unnamed receiver,
    /// otherwise the first channel error in declaration order.
    pub fn prepare(&mut self, global: &GlobalConfig) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyReceiverName);
        }

        prepare_all(&mut self.email_configs, global)?;
        prepare_all(&mut self.pagerduty_configs, global)?;
        prepare_all(&mut self.slack_configs, global)?;
        prepare_all(&mut self.webhook_configs, global)?;
        prepare_all(&mut self.opsgenie_configs, global)?;
        prepare_all(&mut self.wechat_configs, global)?;
        prepare_all(&mut self.pushover_configs, global)?;
        prepare_all(&mut self.victorops_configs, global)?;

        debug!(
            receiver = %self.name,
            integrations = self.integration_count(),
            "prepared receiver"
        );
        Ok(())
    }

    /// Returns the number of channel configs per kind, skipping empty kinds.
    #[must_use]
    pub fn integrations(&self) -> Vec<(&'static str, usize)> {
        [
            (EmailConfig::KIND, self.email_configs.len()),
            (PagerdutyConfig::KIND, self.pagerduty_configs.len()),
            (SlackConfig::KIND, self.slack_configs.len()),
            (WebhookConfig::KIND, self.webhook_configs.len()),
            (OpsGenieConfig::KIND, self.opsgenie_configs.len()),
            (WechatConfig::KIND, self.wechat_configs.len()),
            (PushoverConfig::KIND, self.pushover_configs.len()),
            (VictorOpsConfig::KIND, self.victorops_configs.len()),
        ]
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .collect()
    }

    /// Returns the total number of channel configs.
    #[must_use]
    pub fn integration_count(&self) -> usize {
        self.integrations().iter().map(|(_, n)| n).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receiver(yaml: &str) -> Receiver {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn global(yaml: &str) -> GlobalConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    mod defaults_tests {
        use super::*;

        #[test]
        fn channel_defaults() {
            assert!(!EmailConfig::default().send_resolved);
            assert!(PagerdutyConfig::default().send_resolved);
            assert_eq!(PagerdutyConfig::default().severity, "error");
            assert_eq!(PagerdutyConfig::default().details.len(), 4);
            assert!(!SlackConfig::default().send_resolved);
            assert!(WebhookConfig::default().send_resolved);
            assert!(OpsGenieConfig::default().send_resolved);
            assert!(!WechatConfig::default().send_resolved);
            assert_eq!(PushoverConfig::default().retry, ConfigDuration::from_mins(1));
            assert_eq!(PushoverConfig::default().expire, ConfigDuration::from_hours(1));
            assert_eq!(VictorOpsConfig::default().message_type, "CRITICAL");
        }

        #[test]
        fn template_helper_renders_call() {
            assert_eq!(
                template("email.default.html"),
                r#"{{ template "email.default.html" . }}"#
            );
        }

        #[test]
        fn decoded_channel_keeps_defaults() {
            let r = receiver("name: ops\nvictorops_configs:\n  - routing_key: ops");
            let vo = &r.victorops_configs[0];
            assert_eq!(vo.message_type, "CRITICAL");
            assert!(vo.send_resolved);
        }

        #[test]
        fn unknown_channel_field_rejected() {
            let result =
                serde_yaml::from_str::<Receiver>("name: x\nwebhook_configs:\n  - uri: http://a/");
            assert!(result.is_err());
        }
    }

    mod prepare_tests {
        use super::*;

        #[test]
        fn empty_name_rejected() {
            let mut r = receiver("webhook_configs:\n  - url: http://hook.example/");
            assert!(matches!(
                r.prepare(&GlobalConfig::default()),
                Err(ConfigError::EmptyReceiverName)
            ));
        }

        #[test]
        fn email_without_smarthost_fails() {
            let mut r = receiver("name: mail\nemail_configs:\n  - to: ops@example.org");
            let err = r.prepare(&GlobalConfig::default()).unwrap_err();
            assert_eq!(err.to_string(), "no global SMTP smarthost set");
        }

        #[test]
        fn email_without_from_fails() {
            let mut r = receiver("name: mail\nemail_configs:\n  - to: ops@example.org");
            let g = global("smtp_smarthost: mail.example.org:25");
            let err = r.prepare(&g).unwrap_err();
            assert_eq!(err.to_string(), "no global SMTP from set");
        }

        #[test]
        fn email_inherits_smtp_settings() {
            let mut r = receiver("name: mail\nemail_configs:\n  - to: ops@example.org");
            let g = global(
                r"
smtp_smarthost: mail.example.org:25
smtp_from: am@example.org
smtp_auth_username: am
smtp_auth_password: pw
smtp_require_tls: false
",
            );
            r.prepare(&g).unwrap();
            let email = &r.email_configs[0];
            assert_eq!(email.smarthost.host, "mail.example.org");
            assert_eq!(email.from, "am@example.org");
            assert_eq!(email.hello, "localhost");
            assert_eq!(email.auth_username, "am");
            assert_eq!(email.auth_password.expose(), "pw");
            assert_eq!(email.require_tls, Some(false));
        }

        #[test]
        fn email_own_require_tls_kept() {
            let mut r = receiver(
                "name: mail\nemail_configs:\n  - to: a@b.c\n    from: x@b.c\n    smarthost: m:25\n    require_tls: false",
            );
            r.prepare(&GlobalConfig::default()).unwrap();
            assert_eq!(r.email_configs[0].require_tls, Some(false));
        }

        #[test]
        fn email_requires_to() {
            let mut r = receiver("name: mail\nemail_configs:\n  - from: a@b.c");
            assert!(matches!(
                r.prepare(&GlobalConfig::default()),
                Err(ConfigError::InvalidChannelConfig { channel: "email", .. })
            ));
        }

        #[test]
        fn email_headers_canonicalized() {
            let mut r = receiver(
                "name: mail\nemail_configs:\n  - to: a@b.c\n    from: x@b.c\n    smarthost: m:25\n    headers:\n      x-team-name: ops",
            );
            r.prepare(&GlobalConfig::default()).unwrap();
            assert_eq!(r.email_configs[0].headers["X-Team-Name"], "ops");
        }

        #[test]
        fn email_duplicate_headers_rejected() {
            let mut r = receiver(
                "name: mail\nemail_configs:\n  - to: a@b.c\n    headers:\n      subject: a\n      SUBJECT: b",
            );
            let err = r.prepare(&GlobalConfig::default()).unwrap_err();
            assert!(err.to_string().contains("Subject"));
        }

        #[test]
        fn slack_without_global_url_fails() {
            let mut r = receiver("name: chat\nslack_configs:\n  - channel: '#ops'");
            let err = r.prepare(&GlobalConfig::default()).unwrap_err();
            assert_eq!(err.to_string(), "no global Slack API URL set");
        }

        #[test]
        fn slack_inherits_global_url_and_http_config() {
            let mut r = receiver("name: chat\nslack_configs:\n  - channel: '#ops'");
            let g = global(
                "slack_api_url: https://hooks.slack.com/services/T0/B0/X\nhttp_config:\n  bearer_token: t",
            );
            r.prepare(&g).unwrap();
            let slack = &r.slack_configs[0];
            assert!(slack.api_url.as_ref().is_some_and(|u| !u.is_redacted()));
            assert_eq!(slack.http_config.as_ref(), Some(&g.http_config));
        }

        #[test]
        fn pagerduty_requires_a_key() {
            let mut r = receiver("name: pd\npagerduty_configs:\n  - severity: critical");
            assert!(matches!(
                r.prepare(&GlobalConfig::default()),
                Err(ConfigError::InvalidChannelConfig { channel: "pagerduty", .. })
            ));
        }

        #[test]
        fn pagerduty_inherits_default_url() {
            let mut r = receiver("name: pd\npagerduty_configs:\n  - routing_key: abc");
            r.prepare(&GlobalConfig::default()).unwrap();
            let url = r.pagerduty_configs[0].url.as_ref().unwrap();
            assert_eq!(url.as_str(), crate::global::DEFAULT_PAGERDUTY_URL);
        }

        #[test]
        fn pagerduty_details_merge_with_defaults() {
            let mut r = receiver(
                "name: pd\npagerduty_configs:\n  - service_key: abc\n    details:\n      runbook: https://wiki/x",
            );
            r.prepare(&GlobalConfig::default()).unwrap();
            let details = &r.pagerduty_configs[0].details;
            assert_eq!(details["runbook"], "https://wiki/x");
            assert!(details.contains_key("num_firing"));
        }

        #[test]
        fn webhook_requires_url() {
            let mut r = receiver("name: hook\nwebhook_configs:\n  - send_resolved: false");
            assert!(matches!(
                r.prepare(&GlobalConfig::default()),
                Err(ConfigError::InvalidChannelConfig { channel: "webhook", .. })
            ));
        }

        #[test]
        fn webhook_own_http_config_kept() {
            let mut r = receiver(
                "name: hook\nwebhook_configs:\n  - url: http://hook.example/\n    http_config:\n      bearer_token: own",
            );
            let g = global("http_config:\n  bearer_token: shared");
            r.prepare(&g).unwrap();
            let http = r.webhook_configs[0].http_config.as_ref().unwrap();
            assert_eq!(http.bearer_token.expose(), "own");
        }

        #[test]
        fn webhook_conflicting_http_config_rejected() {
            let mut r = receiver(
                "name: hook\nwebhook_configs:\n  - url: http://hook.example/\n    http_config:\n      bearer_token: a\n      bearer_token_file: /t",
            );
            assert!(matches!(
                r.prepare(&GlobalConfig::default()),
                Err(ConfigError::InvalidHttpConfig { .. })
            ));
        }

        #[test]
        fn opsgenie_requires_api_key() {
            let mut r = receiver("name: og\nopsgenie_configs:\n  - message: hi");
            let err = r.prepare(&GlobalConfig::default()).unwrap_err();
            assert_eq!(err.to_string(), "no global OpsGenie API Key set");
        }

        #[test]
        fn opsgenie_url_gets_trailing_slash_without_touching_global() {
            let mut r = receiver("name: og\nopsgenie_configs:\n  - api_key: k");
            let g = global("opsgenie_api_url: https://og.example/v2");
            r.prepare(&g).unwrap();
            assert_eq!(
                r.opsgenie_configs[0].api_url.as_ref().unwrap().as_str(),
                "https://og.example/v2/"
            );
            assert_eq!(g.opsgenie_api_url.unwrap().as_str(), "https://og.example/v2");
        }

        #[test]
        fn wechat_requires_secret_and_corp_id() {
            let mut r = receiver("name: wc\nwechat_configs:\n  - to_user: a");
            let err = r.prepare(&GlobalConfig::default()).unwrap_err();
            assert_eq!(err.to_string(), "no global Wechat ApiSecret set");

            let mut r = receiver("name: wc\nwechat_configs:\n  - api_secret: s");
            let err = r.prepare(&GlobalConfig::default()).unwrap_err();
            assert_eq!(err.to_string(), "no global Wechat CorpID set");
        }

        #[test]
        fn wechat_own_url_normalized() {
            let mut r = receiver(
                "name: wc\nwechat_configs:\n  - api_secret: s\n    corp_id: c\n    api_url: https://wx.example/api",
            );
            r.prepare(&GlobalConfig::default()).unwrap();
            assert_eq!(
                r.wechat_configs[0].api_url.as_ref().unwrap().path(),
                "/api/"
            );
        }

        #[test]
        fn pushover_requires_user_key_and_token() {
            let mut r = receiver("name: po\npushover_configs:\n  - token: t");
            assert!(matches!(
                r.prepare(&GlobalConfig::default()),
                Err(ConfigError::InvalidChannelConfig { channel: "pushover", .. })
            ));
            let mut r = receiver("name: po\npushover_configs:\n  - user_key: u");
            assert!(r.prepare(&GlobalConfig::default()).is_err());
        }

        #[test]
        fn victorops_requires_routing_key_then_api_key() {
            let mut r = receiver("name: vo\nvictorops_configs:\n  - api_key: k");
            assert!(matches!(
                r.prepare(&GlobalConfig::default()),
                Err(ConfigError::InvalidChannelConfig { channel: "victorops", .. })
            ));
            let mut r = receiver("name: vo\nvictorops_configs:\n  - routing_key: ops");
            let err = r.prepare(&GlobalConfig::default()).unwrap_err();
            assert_eq!(err.to_string(), "no global VictorOps API Key set");
        }

        #[test]
        fn victorops_default_url_keeps_single_slash() {
            let mut r = receiver("name: vo\nvictorops_configs:\n  - routing_key: ops\n    api_key: k");
            r.prepare(&GlobalConfig::default()).unwrap();
            assert_eq!(
                r.victorops_configs[0].api_url.as_ref().unwrap().as_str(),
                crate::global::DEFAULT_VICTOROPS_API_URL
            );
        }

        #[test]
        fn integrations_counted() {
            let r = receiver(
                "name: multi\nwebhook_configs:\n  - url: http://a/\n  - url: http://b/\npushover_configs:\n  - user_key: u\n    token: t",
            );
            assert_eq!(r.integrations(), [("webhook", 2), ("pushover", 1)]);
            assert_eq!(r.integration_count(), 3);
            assert_eq!(Receiver::new("none").integration_count(), 0);
        }
    }

    #[test]
    fn canonical_header_names() {
        assert_eq!(canonical_header("content-type"), "Content-Type");
        assert_eq!(canonical_header("SUBJECT"), "Subject");
        assert_eq!(canonical_header("x-a"), "X-A");
    }
}

//! Alert routing configuration for Clawbernetes.
//!
//! `claw-alert-config` loads an Alertmanager-style document and turns it into
//! an immutable, validated [`Config`] that answers three questions about an
//! alert, given as a set of labels:
//!
//! - **Routing**: which receivers it goes to, walking the route tree with
//!   inherited grouping and timing options and `continue` fan-out.
//! - **Grouping**: which labels it is grouped by and how long to wait.
//! - **Inhibition**: whether another alert mutes it.
//!
//! # Example
//!
//! ```rust
//! use claw_alert_config::{Config, LabelSet};
//!
//! let config = Config::load(r#"
//! route:
//!   receiver: default
//!   group_by: [alertname]
//!   routes:
//!     - match: { severity: critical }
//!       receiver: pager
//!       continue: true
//!     - match_re: { team: "db|storage" }
//!       receiver: dba
//! receivers:
//!   - name: default
//!   - name: pager
//!   - name: dba
//! inhibit_rules:
//!   - source_match: { severity: critical }
//!     target_match: { severity: warning }
//!     equal: [cluster]
//! "#).unwrap();
//!
//! let alert: LabelSet = [("severity", "critical"), ("team", "db")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! assert_eq!(config.route().receivers_for(&alert), ["pager", "dba"]);
//!
//! let warning: LabelSet = [("severity", "warning")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! assert!(config.inhibit_rules()[0].suppresses(&alert, &warning));
//! ```
//!
//! # Reloading
//!
//! [`ConfigHandle`] publishes a new configuration atomically and keeps the
//! previous one when the new document is invalid:
//!
//! ```rust
//! use claw_alert_config::{Config, ConfigHandle};
//!
//! let handle = ConfigHandle::new(
//!     Config::load("route: {receiver: a}\nreceivers: [{name: a}]").unwrap(),
//! );
//! assert!(handle.reload("route: {receiver: missing}").is_err());
//! assert_eq!(handle.current().route().opts().receiver, "a");
//! ```

#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/claw-alert-config/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod address;
pub mod config;
pub mod duration;
pub mod error;
pub mod global;
pub mod http;
pub mod inhibit;
pub mod labels;
pub mod matcher;
pub mod receiver;
pub mod reload;
pub mod route;
pub mod secret;

// Re-export main types at crate root
pub use address::{HostPort, HttpUrl, SecretUrl};
pub use config::{Config, ConfigDef};
pub use duration::ConfigDuration;
pub use error::{ConfigError, Result};
pub use global::GlobalConfig;
pub use http::{BasicAuth, HttpClientConfig, TlsConfig};
pub use inhibit::{InhibitRule, InhibitRuleDef};
pub use labels::{LabelSet, is_valid_label_name, label_value};
pub use matcher::{AnchoredRegex, Matcher, Matchers};
pub use receiver::{
    ChannelConfig, EmailConfig, OpsGenieConfig, PagerdutyConfig, PushoverConfig, Receiver,
    SlackConfig, VictorOpsConfig, WebhookConfig, WechatConfig,
};
pub use reload::ConfigHandle;
pub use route::{GroupBy, Route, RouteDef, RouteOpts};
pub use secret::{SECRET_TOKEN, SECRET_TOKEN_JSON, Secret};

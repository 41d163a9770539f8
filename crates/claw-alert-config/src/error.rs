//! Error types for the claw-alert-config crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort loading an alert routing configuration.
///
/// Every validation step returns the first violation it finds; a load never
/// yields a partially valid [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be decoded into the configuration structure.
    #[error("decode error: {reason}")]
    Decode {
        /// The decoder's description of the problem.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The root route is missing or has an invalid shape.
    #[error("invalid root route: {reason}")]
    RootRoute {
        /// What is wrong with the root route.
        reason: String,
    },

    /// A receiver was declared without a name.
    #[error("missing name in receiver")]
    EmptyReceiverName,

    /// Two receivers share the same name.
    #[error("notification config name {name:?} is not unique")]
    DuplicateReceiver {
        /// The duplicated receiver name.
        name: String,
    },

    /// A route references a receiver that is not declared.
    #[error("undefined receiver {name:?} used in route")]
    UndefinedReceiver {
        /// The receiver name referenced by the route.
        name: String,
    },

    /// A label name does not match the label name grammar.
    #[error("invalid label name {name:?} in {context}")]
    InvalidLabelName {
        /// The offending label name.
        name: String,
        /// Where the label name was found.
        context: String,
    },

    /// A regular expression failed to compile.
    #[error("invalid regular expression {pattern:?}: {reason}")]
    InvalidRegex {
        /// The pattern as written in the configuration.
        pattern: String,
        /// The compiler's error message.
        reason: String,
    },

    /// An exact matcher value is empty or otherwise unusable.
    #[error("invalid value {value:?} for label {name:?}")]
    InvalidValue {
        /// The label name of the matcher.
        name: String,
        /// The offending value.
        value: String,
    },

    /// A `group_by` list is inconsistent.
    #[error("invalid group_by: {reason}")]
    GroupBy {
        /// What is wrong with the list.
        reason: String,
    },

    /// A grouping or repeat interval was explicitly set to zero.
    #[error("{field} cannot be zero")]
    ZeroInterval {
        /// The interval field name.
        field: &'static str,
    },

    /// A channel config field is unset and has no global fallback.
    #[error("no global {provider} {field} set")]
    MissingGlobalDefault {
        /// The notification provider, e.g. `SMTP` or `Slack`.
        provider: &'static str,
        /// The missing field, e.g. `smarthost`.
        field: &'static str,
    },

    /// A channel config is missing a required field or is inconsistent.
    #[error("invalid {channel} config: {reason}")]
    InvalidChannelConfig {
        /// The channel kind, e.g. `email`.
        channel: &'static str,
        /// What is wrong with the config.
        reason: String,
    },

    /// A URL could not be parsed or uses an unsupported scheme.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The URL as written.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A `host:port` address could not be parsed.
    #[error("address {address:?}: {reason}")]
    InvalidHostPort {
        /// The address as written.
        address: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A duration string could not be parsed.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration {
        /// The duration as written.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An HTTP client config combines mutually exclusive settings.
    #[error("invalid http_config: {reason}")]
    InvalidHttpConfig {
        /// What is inconsistent.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn root_route(reason: impl Into<String>) -> Self {
        Self::RootRoute {
            reason: reason.into(),
        }
    }

    pub(crate) fn label_name(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InvalidLabelName {
            name: name.into(),
            context: context.into(),
        }
    }

    pub(crate) fn group_by(reason: impl Into<String>) -> Self {
        Self::GroupBy {
            reason: reason.into(),
        }
    }

    pub(crate) fn channel(channel: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidChannelConfig {
            channel,
            reason: reason.into(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Decode {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            reason: err.to_string(),
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

//! The top-level configuration and its load pipeline.
//!
//! Loading runs in two stages: the document is decoded into a plain
//! [`ConfigDef`], then [`Config::from_def`] applies defaults and validates
//! everything in a fixed order. The first violation aborts the load.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::global::GlobalConfig;
use crate::inhibit::{InhibitRule, InhibitRuleDef};
use crate::labels::LabelSet;
use crate::receiver::Receiver;
use crate::route::{Route, RouteDef};

/// Plain decoded form of a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDef {
    /// Global settings; a missing or empty block means all defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalConfig>,
    /// Root of the routing tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteDef>,
    /// Inhibition rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inhibit_rules: Vec<InhibitRuleDef>,
    /// Receivers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<Receiver>,
    /// Notification template files.
    #[serde(default)]
    pub templates: Vec<String>,
}

/// A validated, immutable alert routing configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    global: GlobalConfig,
    route: Route,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    inhibit_rules: Vec<InhibitRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    receivers: Vec<Receiver>,
    templates: Vec<String>,
    #[serde(skip)]
    original: String,
}

impl Config {
    /// Parses and validates a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Decode` if the document does not have the
    /// expected structure, or the first validation error.
    pub fn load(input: &str) -> Result<Self> {
        let def = if input.trim().is_empty() {
            ConfigDef::default()
        } else {
            serde_yaml::from_str(input)?
        };
        Self::from_def(def, input)
    }

    /// Applies defaults to a decoded document and validates it.
    ///
    /// `original` is kept as the source text of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first violation, checking in this order: global settings,
    /// receivers and their channels, the routing tree, receiver references,
    /// inhibition rules.
    pub fn from_def(def: ConfigDef, original: impl Into<String>) -> Result<Self> {
        let global = def.global.unwrap_or_default();
        global.validate()?;

        let mut receivers = def.receivers;
        let mut names = HashSet::with_capacity(receivers.len());
        for receiver in &mut receivers {
            if receiver.name.is_empty() {
                return Err(ConfigError::EmptyReceiverName);
            }
            if !names.insert(receiver.name.clone()) {
                return Err(ConfigError::DuplicateReceiver {
                    name: receiver.name.clone(),
                });
            }
            receiver.prepare(&global)?;
        }

        let route_def = def
            .route
            .ok_or_else(|| ConfigError::root_route("no route provided in config"))?;
        let route = Route::new_root(&route_def)?;
        let known: HashSet<&str> = names.iter().map(String::as_str).collect();
        route.check_receivers(&known)?;

        let inhibit_rules = def
            .inhibit_rules
            .into_iter()
            .map(InhibitRule::new)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            receivers = receivers.len(),
            inhibit_rules = inhibit_rules.len(),
            templates = def.templates.len(),
            "validated configuration"
        );

        Ok(Self {
            global,
            route,
            inhibit_rules,
            receivers,
            templates: def.templates,
            original: original.into(),
        })
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// Relative template paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// same errors as [`Config::load`].
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::load(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_template_paths(base);
        }

        info!(
            path = %path.display(),
            receivers = config.receivers.len(),
            "loaded configuration file"
        );
        Ok(config)
    }

    fn resolve_template_paths(&mut self, base: &Path) {
        for template in &mut self.templates {
            if !template.is_empty() && !Path::new(template.as_str()).is_absolute() {
                *template = base.join(template.as_str()).to_string_lossy().into_owned();
            }
        }
    }

    /// Writes the configuration as YAML with secrets redacted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Decode` if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Returns the global settings.
    #[must_use]
    pub const fn global(&self) -> &GlobalConfig {
        &self.global
    }

    /// Returns the root of the routing tree.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the inhibition rules in declared order.
    #[must_use]
    pub fn inhibit_rules(&self) -> &[InhibitRule] {
        &self.inhibit_rules
    }

    /// Returns the receivers in declared order.
    #[must_use]
    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    /// Looks up a receiver by name.
    #[must_use]
    pub fn receiver(&self, name: &str) -> Option<&Receiver> {
        self.receivers.iter().find(|r| r.name == name)
    }

    /// Returns the template file paths.
    #[must_use]
    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Returns the source text the configuration was loaded from.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns the rules under which `source` mutes `target`.
    #[must_use]
    pub fn inhibiting_rules(&self, source: &LabelSet, target: &LabelSet) -> Vec<&InhibitRule> {
        self.inhibit_rules
            .iter()
            .filter(|rule| rule.suppresses(source, target))
            .collect()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_yaml() {
            Ok(yaml) => f.write_str(&yaml),
            Err(e) => write!(f, "<error creating config string: {e}>"),
        }
    }
}

//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use claw_alert_config::{LabelSet, is_valid_label_name};

use crate::error::CliError;

/// Default configuration file path.
pub const DEFAULT_CONFIG: &str = "alertmanager.yml";

/// Check and query alert routing configurations.
#[derive(Parser, Debug, Clone)]
#[command(name = "claw-alert-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate configuration files and summarize their contents.
    Check {
        /// Files to check.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the routing tree, or the routes a label set resolves to.
    Routes(RoutesArgs),

    /// Test whether one alert mutes another.
    Inhibit(InhibitArgs),
}

/// Arguments for the routes command.
#[derive(Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Configuration file.
    #[arg(short, long, env = "CLAW_ALERT_CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Alert labels to resolve; without labels the whole tree is shown.
    #[arg(value_name = "NAME=VALUE")]
    pub labels: Vec<String>,
}

/// Arguments for the inhibit command.
#[derive(Args, Debug, Clone)]
pub struct InhibitArgs {
    /// Configuration file.
    #[arg(short, long, env = "CLAW_ALERT_CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Labels of the muting alert (comma-separated NAME=VALUE).
    #[arg(long, value_name = "NAME=VALUE", value_delimiter = ',')]
    pub source: Vec<String>,

    /// Labels of the alert that may be muted (comma-separated NAME=VALUE).
    #[arg(long, value_name = "NAME=VALUE", value_delimiter = ',')]
    pub target: Vec<String>,
}

/// Parses `NAME=VALUE` arguments into a label set.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for an argument without `=`, an
/// invalid label name, or a label given twice.
pub fn parse_labels(args: &[String]) -> Result<LabelSet, CliError> {
    let mut labels = LabelSet::with_capacity(args.len());
    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| CliError::InvalidArgument(format!("expected NAME=VALUE, got {arg:?}")))?;
        if !is_valid_label_name(name) {
            return Err(CliError::InvalidArgument(format!(
                "invalid label name {name:?}"
            )));
        }
        if labels.insert(name.to_string(), value.to_string()).is_some() {
            return Err(CliError::InvalidArgument(format!(
                "label {name:?} given more than once"
            )));
        }
    }
    Ok(labels)
}

//! # claw-alert-check
//!
//! Command-line checker for Clawbernetes alert routing configurations.
//!
//! Provides commands for:
//! - Validating configuration files and summarizing their contents
//! - Showing the routing tree and resolving a label set to receivers
//! - Testing whether one alert mutes another under the inhibit rules
//!
//! All commands load the configuration through [`claw_alert_config::Config`]
//! and write either a table or JSON through [`OutputFormat`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format, InhibitArgs, RoutesArgs};
pub use error::CliError;
pub use output::OutputFormat;

//! Configuration check command implementation.
//!
//! Loads each file, reports whether it is valid, and summarizes what a valid
//! file contains.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use claw_alert_config::{Config, Route};
use serde::Serialize;
use tracing::debug;

use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay};

/// Handler for the check command.
#[derive(Debug, Default)]
pub struct CheckCommand;

impl CheckCommand {
    /// Creates a new check command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks every file and writes the report.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CheckFailed` if any file is invalid, after the full
    /// report has been written.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        files: &[PathBuf],
    ) -> Result<(), CliError> {
        let report = CheckReport {
            files: files.iter().map(|path| check_file(path)).collect(),
        };
        format.write(out, &report)?;

        let failed = report.files.iter().filter(|f| !f.valid).count();
        if failed > 0 {
            return Err(CliError::CheckFailed {
                failed,
                total: report.files.len(),
            });
        }
        Ok(())
    }
}

fn check_file(path: &Path) -> FileCheck {
    debug!(path = %path.display(), "checking configuration");
    match Config::load_file(path) {
        Ok(config) => FileCheck {
            path: path.display().to_string(),
            valid: true,
            error: None,
            summary: Some(ConfigSummary::from_config(&config)),
        },
        Err(e) => FileCheck {
            path: path.display().to_string(),
            valid: false,
            error: Some(e.to_string()),
            summary: None,
        },
    }
}

/// Results for all checked files.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// One entry per file, in argument order.
    pub files: Vec<FileCheck>,
}

/// Result of checking one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileCheck {
    /// Path as given.
    pub path: String,
    /// Whether the file loaded.
    pub valid: bool,
    /// Why the file was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// What the file contains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ConfigSummary>,
}

/// Contents of a valid configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    /// Number of nodes in the routing tree, root included.
    pub routes: usize,
    /// Number of inhibition rules.
    pub inhibit_rules: usize,
    /// Template paths after resolution.
    pub templates: Vec<String>,
    /// Receivers in declared order.
    pub receivers: Vec<ReceiverSummary>,
}

/// Channels configured on one receiver.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiverSummary {
    /// Receiver name.
    pub name: String,
    /// Channel count per kind.
    pub integrations: BTreeMap<String, usize>,
}

impl ConfigSummary {
    fn from_config(config: &Config) -> Self {
        let mut routes = 0;
        config.route().walk(&mut |_: &Route| routes += 1);

        Self {
            routes,
            inhibit_rules: config.inhibit_rules().len(),
            templates: config.templates().to_vec(),
            receivers: config
                .receivers()
                .iter()
                .map(|r| ReceiverSummary {
                    name: r.name.clone(),
                    integrations: r
                        .integrations()
                        .into_iter()
                        .map(|(kind, n)| (kind.to_string(), n))
                        .collect(),
                })
                .collect(),
        }
    }
}

impl TableDisplay for CheckReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        for file in &self.files {
            match (&file.summary, &file.error) {
                (Some(summary), _) => {
                    writeln!(writer, "Checking '{}'  SUCCESS", file.path)?;
                    summary.write_table(writer)?;
                }
                (None, error) => {
                    writeln!(
                        writer,
                        "Checking '{}'  FAILED: {}",
                        file.path,
                        error.as_deref().unwrap_or("unknown error")
                    )?;
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl TableDisplay for ConfigSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Found:")?;
        writeln!(writer, " - global config")?;
        writeln!(writer, " - route ({} nodes)", self.routes)?;
        writeln!(writer, " - {} inhibit rules", self.inhibit_rules)?;
        writeln!(writer, " - {} receivers", self.receivers.len())?;
        for receiver in &self.receivers {
            let integrations: Vec<String> = receiver
                .integrations
                .iter()
                .map(|(kind, n)| format!("{kind}={n}"))
                .collect();
            if integrations.is_empty() {
                writeln!(writer, "   - {} (no integrations)", receiver.name)?;
            } else {
                writeln!(writer, "   - {}: {}", receiver.name, integrations.join(", "))?;
            }
        }
        writeln!(writer, " - {} templates", self.templates.len())?;
        for template in &self.templates {
            writeln!(writer, "   - {template}")?;
        }
        Ok(())
    }
}

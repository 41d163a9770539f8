//! Inhibition check command implementation.

use std::io::Write;

use claw_alert_config::{Config, InhibitRule, LabelSet, label_value};
use serde::Serialize;

use crate::cli::{InhibitArgs, parse_labels};
use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay, truncate};

/// Handler for the inhibit command.
#[derive(Debug, Default)]
pub struct InhibitCommand;

impl InhibitCommand {
    /// Creates a new inhibit command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates every inhibition rule for the given source and target.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration does not load or a label argument
    /// is malformed.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &InhibitArgs,
    ) -> Result<(), CliError> {
        let config = Config::load_file(&args.config)?;
        let source = parse_labels(&args.source)?;
        let target = parse_labels(&args.target)?;

        let rules: Vec<RuleEvaluation> = config
            .inhibit_rules()
            .iter()
            .enumerate()
            .map(|(index, rule)| RuleEvaluation::evaluate(index, rule, &source, &target))
            .collect();

        let report = InhibitReport {
            muted: rules.iter().any(|r| r.mutes),
            rules,
        };
        format.write(out, &report)
    }
}

/// How one rule treats the source and target alerts.
#[derive(Debug, Clone, Serialize)]
pub struct RuleEvaluation {
    /// Position of the rule in the configuration.
    pub index: usize,
    /// Source matchers.
    pub source: String,
    /// Target matchers.
    pub target: String,
    /// Labels that must agree.
    pub equal: Vec<String>,
    /// Whether the source alert satisfies the source side.
    pub source_matches: bool,
    /// Whether the target alert satisfies the target side.
    pub target_matches: bool,
    /// Whether all `equal` labels agree.
    pub equal_matches: bool,
    /// Whether the rule mutes the target.
    pub mutes: bool,
}

impl RuleEvaluation {
    fn evaluate(index: usize, rule: &InhibitRule, source: &LabelSet, target: &LabelSet) -> Self {
        let equal_matches = rule
            .equal()
            .iter()
            .all(|name| label_value(source, name) == label_value(target, name));
        Self {
            index,
            source: rule.source().to_string(),
            target: rule.target().to_string(),
            equal: rule.equal().to_vec(),
            source_matches: rule.source_matches(source),
            target_matches: rule.target_matches(target),
            equal_matches,
            mutes: rule.suppresses(source, target),
        }
    }

    fn verdict(&self) -> &'static str {
        if self.mutes {
            "mutes"
        } else if !self.source_matches {
            "source mismatch"
        } else if !self.target_matches {
            "target mismatch"
        } else {
            "equal mismatch"
        }
    }
}

/// Evaluation of all rules.
#[derive(Debug, Clone, Serialize)]
pub struct InhibitReport {
    /// Whether any rule mutes the target.
    pub muted: bool,
    /// Per-rule results in declared order.
    pub rules: Vec<RuleEvaluation>,
}

impl TableDisplay for InhibitReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.rules.is_empty() {
            writeln!(writer, "No inhibit rules configured")?;
        } else {
            writeln!(
                writer,
                "{:>3}  {:<32}  {:<32}  {:<20}  {:<16}",
                "#", "SOURCE", "TARGET", "EQUAL", "RESULT"
            )?;
            writeln!(writer, "{}", "─".repeat(111))?;
            for rule in &self.rules {
                writeln!(
                    writer,
                    "{:>3}  {:<32}  {:<32}  {:<20}  {:<16}",
                    rule.index,
                    truncate(&rule.source, 32),
                    truncate(&rule.target, 32),
                    truncate(&rule.equal.join(","), 20),
                    rule.verdict()
                )?;
            }
            writeln!(writer)?;
        }
        writeln!(
            writer,
            "Target muted: {}",
            if self.muted { "yes" } else { "no" }
        )?;
        Ok(())
    }
}

//! Routing tree command implementation.
//!
//! Without labels, prints every node of the tree with its effective options.
//! With labels, prints only the nodes the alert is delivered through.

use std::collections::BTreeMap;
use std::io::Write;

use claw_alert_config::{Config, Route};
use serde::Serialize;
use tracing::debug;

use crate::cli::{RoutesArgs, parse_labels};
use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay, truncate};

/// Handler for the routes command.
#[derive(Debug, Default)]
pub struct RoutesCommand;

impl RoutesCommand {
    /// Creates a new routes command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads the configuration and writes the tree or the resolution.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration does not load or a label argument
    /// is malformed.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &RoutesArgs,
    ) -> Result<(), CliError> {
        let config = Config::load_file(&args.config)?;

        if args.labels.is_empty() {
            let mut nodes = Vec::new();
            collect_nodes(config.route(), 0, &mut nodes);
            return format.write(out, &RouteTree { nodes });
        }

        let labels = parse_labels(&args.labels)?;
        let routes: Vec<RouteNode> = config
            .route()
            .match_labels(&labels)
            .into_iter()
            .map(|r| RouteNode::from_route(r, 0))
            .collect();
        debug!(matched = routes.len(), "resolved labels");

        let resolution = RouteResolution {
            labels: labels.into_iter().collect(),
            receivers: routes.iter().map(|r| r.receiver.clone()).collect(),
            routes,
        };
        format.write(out, &resolution)
    }
}

fn collect_nodes(route: &Route, depth: usize, nodes: &mut Vec<RouteNode>) {
    nodes.push(RouteNode::from_route(route, depth));
    for child in route.routes() {
        collect_nodes(child, depth + 1, nodes);
    }
}

/// One node of the routing tree with its effective options.
#[derive(Debug, Clone, Serialize)]
pub struct RouteNode {
    /// Nesting depth; the root is 0.
    pub depth: usize,
    /// Path key of the node.
    pub key: String,
    /// The node's own matchers.
    pub matchers: String,
    /// Effective receiver.
    pub receiver: String,
    /// Effective grouping labels, `...` for all.
    pub group_by: Vec<String>,
    /// Effective group wait.
    pub group_wait: String,
    /// Effective group interval.
    pub group_interval: String,
    /// Effective repeat interval.
    pub repeat_interval: String,
    /// Whether later siblings are tried after a match.
    #[serde(rename = "continue")]
    pub continue_matching: bool,
}

impl RouteNode {
    fn from_route(route: &Route, depth: usize) -> Self {
        let opts = route.opts();
        Self {
            depth,
            key: route.key().to_string(),
            matchers: route.matchers().to_string(),
            receiver: opts.receiver.clone(),
            group_by: opts.group_by.clone().into(),
            group_wait: opts.group_wait.to_string(),
            group_interval: opts.group_interval.to_string(),
            repeat_interval: opts.repeat_interval.to_string(),
            continue_matching: route.continue_matching(),
        }
    }
}

fn write_header<W: Write>(writer: &mut W) -> Result<(), CliError> {
    writeln!(
        writer,
        "{:<40}  {:<20}  {:<24}  {:>6}  {:>8}  {:>6}  {:<8}",
        "MATCHERS", "RECEIVER", "GROUP BY", "WAIT", "INTERVAL", "REPEAT", "CONTINUE"
    )?;
    writeln!(writer, "{}", "─".repeat(124))?;
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, node: &RouteNode) -> Result<(), CliError> {
    let matchers = format!("{}{}", "  ".repeat(node.depth), node.matchers);
    writeln!(
        writer,
        "{:<40}  {:<20}  {:<24}  {:>6}  {:>8}  {:>6}  {:<8}",
        truncate(&matchers, 40),
        truncate(&node.receiver, 20),
        truncate(&node.group_by.join(","), 24),
        node.group_wait,
        node.group_interval,
        node.repeat_interval,
        if node.continue_matching { "yes" } else { "no" }
    )?;
    Ok(())
}

/// The whole routing tree in pre-order.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTree {
    /// Nodes in pre-order.
    pub nodes: Vec<RouteNode>,
}

impl TableDisplay for RouteTree {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        write_header(writer)?;
        for node in &self.nodes {
            write_row(writer, node)?;
        }
        writeln!(writer)?;
        writeln!(writer, "Total: {} route(s)", self.nodes.len())?;
        Ok(())
    }
}

/// The routes a label set resolves to.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResolution {
    /// The alert's labels.
    pub labels: BTreeMap<String, String>,
    /// Receivers in resolution order.
    pub receivers: Vec<String>,
    /// Matched nodes in resolution order.
    pub routes: Vec<RouteNode>,
}

impl TableDisplay for RouteResolution {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let labels: Vec<String> = self
            .labels
            .iter()
            .map(|(k, v)| format!("{k}={v:?}"))
            .collect();
        writeln!(writer, "Labels:    {{{}}}", labels.join(","))?;
        writeln!(writer, "Receivers: {}", self.receivers.join(", "))?;
        writeln!(writer)?;
        write_header(writer)?;
        for node in &self.routes {
            write_row(writer, node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use std::path::PathBuf;

    const CONFIG: &str = r"
route:
  receiver: default
  group_by: [alertname]
  routes:
    - match: {severity: critical}
      receiver: pager
      continue: true
      group_wait: 5s
    - match: {team: x}
      receiver: team-x
receivers:
  - name: default
  - name: pager
  - name: team-x
";

    fn args(dir: &tempfile::TempDir, labels: &[&str]) -> RoutesArgs {
        let config: PathBuf = dir.path().join("am.yml");
        std::fs::write(&config, CONFIG).unwrap();
        RoutesArgs {
            config,
            labels: labels.iter().map(ToString::to_string).collect(),
        }
    }

    fn run(args: &RoutesArgs, format: Format) -> Result<String, CliError> {
        let mut out = Vec::new();
        RoutesCommand::new().execute(&mut out, &OutputFormat::new(format), args)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn tree_lists_every_node() {
        let dir = tempfile::tempdir().unwrap();
        let text = run(&args(&dir, &[]), Format::Table).unwrap();
        assert!(text.contains("Total: 3 route(s)"));
        assert!(text.contains("  {severity=\"critical\"}"));
        assert!(text.contains("team-x"));
    }

    #[test]
    fn tree_json_has_effective_options() {
        let dir = tempfile::tempdir().unwrap();
        let text = run(&args(&dir, &[]), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let pager = &value["nodes"][1];
        assert_eq!(pager["receiver"], "pager");
        assert_eq!(pager["group_wait"], "5s");
        assert_eq!(pager["group_by"][0], "alertname");
        assert_eq!(pager["continue"], true);
        assert_eq!(value["nodes"][0]["key"], "{}");
    }

    #[test]
    fn labels_resolve_with_fan_out() {
        let dir = tempfile::tempdir().unwrap();
        let text = run(&args(&dir, &["severity=critical", "team=x"]), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["receivers"], serde_json::json!(["pager", "team-x"]));
    }

    #[test]
    fn unmatched_labels_resolve_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let text = run(&args(&dir, &["severity=info"]), Format::Table).unwrap();
        assert!(text.contains("Receivers: default"));
    }

    #[test]
    fn malformed_label_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&args(&dir, &["severity"]), Format::Table).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn missing_config_reported() {
        let args = RoutesArgs {
            config: PathBuf::from("/nonexistent/am.yml"),
            labels: Vec::new(),
        };
        assert!(matches!(
            run(&args, Format::Table),
            Err(CliError::Config(_))
        ));
    }
}

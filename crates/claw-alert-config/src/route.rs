//! The routing tree.
//!
//! A [`RouteDef`] is the plain decoded form of a `route` block. [`Route::new_root`]
//! turns it into a validated, immutable [`Route`] tree in which every node
//! knows its effective [`RouteOpts`], inherited from its ancestors and
//! resolved once at build time.
//!
//! Resolution walks the tree depth first in declared order. A node that
//! matches replaces its parent as the result; a child without `continue`
//! stops evaluation of its later siblings, a child with `continue` lets them
//! contribute further results. A node none of whose children match is itself
//! the result.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::duration::ConfigDuration;
use crate::error::{ConfigError, Result};
use crate::labels::{LabelSet, validate_label_name};
use crate::matcher::{AnchoredRegex, Matcher, Matchers};

/// The `group_by` entry that groups by every label.
pub const GROUP_BY_ALL: &str = "...";

/// Default `group_wait` of the root route.
pub const DEFAULT_GROUP_WAIT: ConfigDuration = ConfigDuration::from_secs(30);
/// Default `group_interval` of the root route.
pub const DEFAULT_GROUP_INTERVAL: ConfigDuration = ConfigDuration::from_mins(5);
/// Default `repeat_interval` of the root route.
pub const DEFAULT_REPEAT_INTERVAL: ConfigDuration = ConfigDuration::from_hours(4);

/// Plain decoded form of a route block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDef {
    /// Receiver for alerts ending at this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    /// Labels to group by, or `["..."]` for all labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    /// Labels that must equal the given values.
    #[serde(default, rename = "match", skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
    /// Labels that must fully match the given regular expressions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_re: BTreeMap<String, String>,
    /// Keep testing later siblings after this node matched.
    #[serde(default, rename = "continue", skip_serializing_if = "std::ops::Not::not")]
    pub continue_matching: bool,
    /// Child routes, in evaluation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteDef>,
    /// How long to wait before the first notification for a new group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_wait: Option<ConfigDuration>,
    /// How long to wait before notifying about changes to a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_interval: Option<ConfigDuration>,
    /// How long to wait before repeating a notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<ConfigDuration>,
}

/// How alerts reaching a route are grouped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "Vec<String>")]
pub enum GroupBy {
    /// Group by the alert's full label set.
    All,
    /// Group by these labels, in declared order.
    Labels(Vec<String>),
}

impl GroupBy {
    /// Parses a `group_by` list. An empty list means "not set".
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLabelName` for a bad name, and
    /// `ConfigError::GroupBy` when the wildcard is combined with names or a
    /// name repeats.
    pub fn parse(entries: &[String]) -> Result<Option<Self>> {
        if entries.is_empty() {
            return Ok(None);
        }

        let mut all = false;
        let mut names = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry == GROUP_BY_ALL {
                all = true;
            } else {
                validate_label_name(entry, "group_by list")?;
                names.push(entry.clone());
            }
        }

        if all && !names.is_empty() {
            return Err(ConfigError::group_by(
                "cannot have wildcard group_by (`...`) and other labels at the same time",
            ));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::group_by(format!(
                    "duplicated label {name:?} in group_by"
                )));
            }
        }

        Ok(Some(if all { Self::All } else { Self::Labels(names) }))
    }

    /// Returns true for the wildcard.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Projects a label set onto the grouping labels.
    ///
    /// Labels named in the list but absent from the alert are left out.
    #[must_use]
    pub fn group_labels(&self, labels: &LabelSet) -> LabelSet {
        match self {
            Self::All => labels.clone(),
            Self::Labels(names) => names
                .iter()
                .filter_map(|n| labels.get(n).map(|v| (n.clone(), v.clone())))
                .collect(),
        }
    }
}

impl Default for GroupBy {
    fn default() -> Self {
        Self::Labels(Vec::new())
    }
}

impl From<GroupBy> for Vec<String> {
    fn from(g: GroupBy) -> Self {
        match g {
            GroupBy::All => vec![GROUP_BY_ALL.to_string()],
            GroupBy::Labels(names) => names,
        }
    }
}

/// The effective options of a route after inheritance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOpts {
    /// Receiver to notify.
    pub receiver: String,
    /// Grouping of alerts.
    pub group_by: GroupBy,
    /// Delay before the first notification for a group.
    pub group_wait: ConfigDuration,
    /// Delay between notifications about a changing group.
    pub group_interval: ConfigDuration,
    /// Delay before re-sending an unchanged notification.
    pub repeat_interval: ConfigDuration,
}

impl RouteOpts {
    /// Projects a label set onto this route's grouping labels.
    #[must_use]
    pub fn group_labels(&self, labels: &LabelSet) -> LabelSet {
        self.group_by.group_labels(labels)
    }

    fn root(receiver: String) -> Self {
        Self {
            receiver,
            group_by: GroupBy::default(),
            group_wait: DEFAULT_GROUP_WAIT,
            group_interval: DEFAULT_GROUP_INTERVAL,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
        }
    }
}

impl fmt::Display for RouteOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group_by: Vec<String> = self.group_by.clone().into();
        write!(
            f,
            "receiver={} group_by=[{}] group_wait={} group_interval={} repeat_interval={}",
            self.receiver,
            group_by.join(","),
            self.group_wait,
            self.group_interval,
            self.repeat_interval
        )
    }
}

/// A validated node of the routing tree.
#[derive(Debug, Clone)]
pub struct Route {
    receiver: Option<String>,
    group_by: Option<GroupBy>,
    match_labels: BTreeMap<String, String>,
    match_re: BTreeMap<String, AnchoredRegex>,
    matchers: Matchers,
    continue_matching: bool,
    routes: Vec<Route>,
    group_wait: Option<ConfigDuration>,
    group_interval: Option<ConfigDuration>,
    repeat_interval: Option<ConfigDuration>,
    opts: RouteOpts,
    key: String,
}

impl Route {
    /// Builds and validates the whole tree from its root definition.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RootRoute` if the root has no receiver, has
    /// matchers, or sets `continue`; otherwise the first node-level error
    /// found in pre-order.
    pub fn new_root(def: &RouteDef) -> Result<Self> {
        let receiver = def.receiver.clone().unwrap_or_default();
        if receiver.is_empty() {
            return Err(ConfigError::root_route(
                "root route must specify a default receiver",
            ));
        }
        if !def.match_labels.is_empty() || !def.match_re.is_empty() {
            return Err(ConfigError::root_route(
                "root route must not have any matchers",
            ));
        }
        if def.continue_matching {
            return Err(ConfigError::root_route("cannot have continue in root route"));
        }

        Self::build(def, &RouteOpts::root(receiver), None)
    }

    fn build(def: &RouteDef, parent_opts: &RouteOpts, parent_key: Option<&str>) -> Result<Self> {
        let mut match_re = BTreeMap::new();
        for (name, pattern) in &def.match_re {
            validate_label_name(name, "match_re")?;
            match_re.insert(name.clone(), AnchoredRegex::new(pattern)?);
        }
        for name in def.match_labels.keys() {
            validate_label_name(name, "match")?;
        }

        let group_by = GroupBy::parse(&def.group_by)?;

        if def.group_interval.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::ZeroInterval {
                field: "group_interval",
            });
        }
        if def.repeat_interval.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::ZeroInterval {
                field: "repeat_interval",
            });
        }

        let matchers: Matchers = def
            .match_labels
            .iter()
            .map(|(name, value)| Matcher::exact(name.clone(), value.clone()))
            .chain(
                match_re
                    .iter()
                    .map(|(name, re)| Matcher::from_regex(name.clone(), re.clone())),
            )
            .collect();

        let receiver = def.receiver.clone().filter(|r| !r.is_empty());

        let mut opts = parent_opts.clone();
        if let Some(r) = &receiver {
            opts.receiver.clone_from(r);
        }
        if let Some(g) = &group_by {
            opts.group_by = g.clone();
        }
        if let Some(d) = def.group_wait {
            opts.group_wait = d;
        }
        if let Some(d) = def.group_interval {
            opts.group_interval = d;
        }
        if let Some(d) = def.repeat_interval {
            opts.repeat_interval = d;
        }

        let key = match parent_key {
            Some(parent) => format!("{parent}/{matchers}"),
            None => matchers.to_string(),
        };

        let routes = def
            .routes
            .iter()
            .map(|child| Self::build(child, &opts, Some(&key)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            receiver,
            group_by,
            match_labels: def.match_labels.clone(),
            match_re,
            matchers,
            continue_matching: def.continue_matching,
            routes,
            group_wait: def.group_wait,
            group_interval: def.group_interval,
            repeat_interval: def.repeat_interval,
            opts,
            key,
        })
    }

    /// Returns the routes an alert with these labels is delivered through.
    ///
    /// Returns an empty list if this node does not match; the root, having no
    /// matchers, always yields at least itself.
    #[must_use]
    pub fn match_labels(&self, labels: &LabelSet) -> Vec<&Self> {
        if !self.matchers.matches(labels) {
            return Vec::new();
        }

        let mut all = Vec::new();
        for child in &self.routes {
            let matches = child.match_labels(labels);
            let matched = !matches.is_empty();
            all.extend(matches);
            if matched && !child.continue_matching {
                break;
            }
        }

        if all.is_empty() {
            all.push(self);
        }
        all
    }

    /// Returns the receiver names an alert with these labels is delivered to,
    /// in resolution order.
    #[must_use]
    pub fn receivers_for(&self, labels: &LabelSet) -> Vec<&str> {
        self.match_labels(labels)
            .into_iter()
            .map(|r| r.opts.receiver.as_str())
            .collect()
    }

    /// Visits this node and all descendants in pre-order.
    pub fn walk<'a, F: FnMut(&'a Self)>(&'a self, visit: &mut F) {
        visit(self);
        for child in &self.routes {
            child.walk(visit);
        }
    }

    /// Checks that every receiver named in the tree is in `known`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UndefinedReceiver` for the first unknown name,
    /// checking children before their parent.
    pub fn check_receivers(&self, known: &HashSet<&str>) -> Result<()> {
        for child in &self.routes {
            child.check_receivers(known)?;
        }
        match &self.receiver {
            Some(r) if !known.contains(r.as_str()) => {
                Err(ConfigError::UndefinedReceiver { name: r.clone() })
            }
            _ => Ok(()),
        }
    }

    /// Returns the receiver set on this node, if any.
    #[must_use]
    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    /// Returns the grouping set on this node, if any.
    #[must_use]
    pub const fn group_by(&self) -> Option<&GroupBy> {
        self.group_by.as_ref()
    }

    /// Returns the node's matchers (exact and regex, sorted).
    #[must_use]
    pub const fn matchers(&self) -> &Matchers {
        &self.matchers
    }

    /// Returns the `continue` flag.
    #[must_use]
    pub const fn continue_matching(&self) -> bool {
        self.continue_matching
    }

    /// Returns the child routes in evaluation order.
    #[must_use]
    pub fn routes(&self) -> &[Self] {
        &self.routes
    }

    /// Returns `group_wait` as set on this node.
    #[must_use]
    pub const fn group_wait(&self) -> Option<ConfigDuration> {
        self.group_wait
    }

    /// Returns `group_interval` as set on this node.
    #[must_use]
    pub const fn group_interval(&self) -> Option<ConfigDuration> {
        self.group_interval
    }

    /// Returns `repeat_interval` as set on this node.
    #[must_use]
    pub const fn repeat_interval(&self) -> Option<ConfigDuration> {
        self.repeat_interval
    }

    /// Returns the effective options after inheritance.
    #[must_use]
    pub const fn opts(&self) -> &RouteOpts {
        &self.opts
    }

    /// Returns a key identifying this node by the matchers on its path.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Converts the node back to its plain form.
    #[must_use]
    pub fn to_def(&self) -> RouteDef {
        RouteDef {
            receiver: self.receiver.clone(),
            group_by: self.group_by.clone().map(Into::into).unwrap_or_default(),
            match_labels: self.match_labels.clone(),
            match_re: self
                .match_re
                .iter()
                .map(|(k, v)| (k.clone(), v.as_str().to_string()))
                .collect(),
            continue_matching: self.continue_matching,
            routes: self.routes.iter().map(Self::to_def).collect(),
            group_wait: self.group_wait,
            group_interval: self.group_interval,
            repeat_interval: self.repeat_interval,
        }
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_def().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> LabelSet {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn tree(yaml: &str) -> Result<Route> {
        let def: RouteDef = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        Route::new_root(&def)
    }

    mod root_tests {
        use super::*;

        #[test]
        fn root_requires_receiver() {
            let err = tree("group_by: [alertname]").unwrap_err();
            assert!(matches!(err, ConfigError::RootRoute { .. }));
        }

        #[test]
        fn root_rejects_matchers() {
            let err = tree("receiver: default\nmatch:\n  severity: critical").unwrap_err();
            assert!(matches!(err, ConfigError::RootRoute { .. }));
            let err = tree("receiver: default\nmatch_re:\n  severity: crit.*").unwrap_err();
            assert!(matches!(err, ConfigError::RootRoute { .. }));
        }

        #[test]
        fn root_rejects_continue() {
            let err = tree("receiver: default\ncontinue: true").unwrap_err();
            match err {
                ConfigError::RootRoute { reason } => assert!(reason.contains("continue")),
                other => panic!("expected RootRoute, got {other:?}"),
            }
        }

        #[test]
        fn root_defaults() {
            let root = tree("receiver: default").unwrap();
            let opts = root.opts();
            assert_eq!(opts.receiver, "default");
            assert_eq!(opts.group_by, GroupBy::Labels(vec![]));
            assert_eq!(opts.group_wait, DEFAULT_GROUP_WAIT);
            assert_eq!(opts.group_interval, DEFAULT_GROUP_INTERVAL);
            assert_eq!(opts.repeat_interval, DEFAULT_REPEAT_INTERVAL);
            assert_eq!(root.key(), "{}");
        }

        #[test]
        fn unknown_field_rejected() {
            let result = serde_yaml::from_str::<RouteDef>("receiver: x\nrecevier: y");
            assert!(result.is_err());
        }
    }

    mod validation_tests {
        use super::*;
        use test_case::test_case;

        #[test]
        fn wildcard_with_names_rejected() {
            let err = tree("receiver: d\ngroup_by: ['...', service]").unwrap_err();
            assert!(matches!(err, ConfigError::GroupBy { .. }));
        }

        #[test]
        fn duplicate_group_by_rejected() {
            let err = tree("receiver: d\ngroup_by: [service, service]").unwrap_err();
            match err {
                ConfigError::GroupBy { reason } => assert!(reason.contains("service")),
                other => panic!("expected GroupBy, got {other:?}"),
            }
        }

        #[test]
        fn wildcard_alone_sets_all() {
            let root = tree("receiver: d\ngroup_by: ['...']").unwrap();
            assert_eq!(root.group_by(), Some(&GroupBy::All));
            assert!(root.opts().group_by.is_all());
        }

        #[test]
        fn invalid_group_by_name_rejected() {
            let err = tree("receiver: d\ngroup_by: [team-x]").unwrap_err();
            assert!(matches!(err, ConfigError::InvalidLabelName { .. }));
        }

        #[test_case("group_interval" ; "group interval")]
        #[test_case("repeat_interval" ; "repeat interval")]
        fn zero_interval_rejected(field: &str) {
            let err = tree(&format!("receiver: d\n{field}: 0s")).unwrap_err();
            match err {
                ConfigError::ZeroInterval { field: f } => assert_eq!(f, field),
                other => panic!("expected ZeroInterval, got {other:?}"),
            }
        }

        #[test]
        fn zero_group_wait_allowed() {
            let root = tree("receiver: d\ngroup_wait: 0s").unwrap();
            assert!(root.opts().group_wait.is_zero());
        }

        #[test]
        fn unset_interval_inherits() {
            let root = tree("receiver: d\nroutes:\n  - match: {a: b}").unwrap();
            let child = &root.routes()[0];
            assert!(child.group_interval().is_none());
            assert_eq!(child.opts().group_interval, DEFAULT_GROUP_INTERVAL);
        }

        #[test]
        fn nested_errors_surface() {
            let yaml = r"
receiver: d
routes:
  - match: {a: b}
    routes:
      - match_re: {service: 'api('}
";
            assert!(matches!(
                tree(yaml).unwrap_err(),
                ConfigError::InvalidRegex { .. }
            ));
        }

        #[test]
        fn invalid_match_label_name_rejected() {
            let yaml = "receiver: d\nroutes:\n  - match: {'bad-name': x}";
            assert!(matches!(
                tree(yaml).unwrap_err(),
                ConfigError::InvalidLabelName { .. }
            ));
        }
    }

    mod resolution_tests {
        use super::*;

        const TREE: &str = r"
receiver: default
group_by: [alertname]
routes:
  - match: {severity: critical}
    receiver: pager
    group_wait: 10s
    routes:
      - match: {service: db}
        receiver: dba
        repeat_interval: 1h
  - match: {team: x}
    receiver: team-x
";

        #[test]
        fn unmatched_alert_falls_back_to_root() {
            let root = tree(TREE).unwrap();
            let matched = root.match_labels(&labels(&[("severity", "info")]));
            assert_eq!(matched.len(), 1);
            assert_eq!(matched[0].key(), "{}");
            assert_eq!(matched[0].opts().receiver, "default");
        }

        #[test]
        fn first_matching_child_wins() {
            let root = tree(TREE).unwrap();
            let receivers = root.receivers_for(&labels(&[("severity", "critical"), ("team", "x")]));
            assert_eq!(receivers, ["pager"]);
        }

        #[test]
        fn deepest_match_inherits_unset_options() {
            let root = tree(TREE).unwrap();
            let matched = root.match_labels(&labels(&[("severity", "critical"), ("service", "db")]));
            assert_eq!(matched.len(), 1);
            let opts = matched[0].opts();
            assert_eq!(opts.receiver, "dba");
            assert_eq!(opts.group_wait, ConfigDuration::from_secs(10));
            assert_eq!(opts.repeat_interval, ConfigDuration::from_hours(1));
            assert_eq!(opts.group_interval, DEFAULT_GROUP_INTERVAL);
            assert_eq!(opts.group_by, GroupBy::Labels(vec!["alertname".to_string()]));
        }

        #[test]
        fn parent_used_when_no_grandchild_matches() {
            let root = tree(TREE).unwrap();
            let matched = root.match_labels(&labels(&[("severity", "critical"), ("service", "web")]));
            assert_eq!(matched.len(), 1);
            assert_eq!(matched[0].opts().receiver, "pager");
        }

        #[test]
        fn continue_fans_out_to_siblings() {
            let yaml = r"
receiver: default
routes:
  - match: {severity: critical}
    receiver: pager
    continue: true
  - match: {team: x}
    receiver: team-x
";
            let root = tree(yaml).unwrap();
            let both = root.receivers_for(&labels(&[("severity", "critical"), ("team", "x")]));
            assert_eq!(both, ["pager", "team-x"]);
            let only_team = root.receivers_for(&labels(&[("team", "x")]));
            assert_eq!(only_team, ["team-x"]);
        }

        #[test]
        fn continue_is_per_level() {
            let yaml = r"
receiver: default
routes:
  - match: {env: prod}
    receiver: prod
    routes:
      - match: {severity: critical}
        receiver: pager
        continue: true
      - match: {team: x}
        receiver: team-x
  - match: {team: x}
    receiver: fallback-team
";
            let root = tree(yaml).unwrap();
            let receivers = root.receivers_for(&labels(&[
                ("env", "prod"),
                ("severity", "critical"),
                ("team", "x"),
            ]));
            assert_eq!(receivers, ["pager", "team-x"]);
        }

        #[test]
        fn child_without_receiver_inherits_parent_receiver() {
            let yaml = "receiver: default\nroutes:\n  - match: {a: b}\n    group_by: ['...']";
            let root = tree(yaml).unwrap();
            let matched = root.match_labels(&labels(&[("a", "b"), ("x", "y")]));
            assert_eq!(matched[0].receiver(), None);
            assert_eq!(matched[0].opts().receiver, "default");
            assert_eq!(matched[0].opts().group_labels(&labels(&[("a", "b"), ("x", "y")])).len(), 2);
        }

        #[test]
        fn keys_follow_path() {
            let root = tree(TREE).unwrap();
            let mut keys = Vec::new();
            root.walk(&mut |r: &Route| keys.push(r.key().to_string()));
            assert_eq!(
                keys,
                [
                    "{}",
                    "{}/{severity=\"critical\"}",
                    "{}/{severity=\"critical\"}/{service=\"db\"}",
                    "{}/{team=\"x\"}",
                ]
            );
        }

        #[test]
        fn regex_children_match_whole_value() {
            let yaml = "receiver: default\nroutes:\n  - match_re: {service: 'api|web'}\n    receiver: frontend";
            let root = tree(yaml).unwrap();
            assert_eq!(root.receivers_for(&labels(&[("service", "web")])), ["frontend"]);
            assert_eq!(root.receivers_for(&labels(&[("service", "webapp")])), ["default"]);
        }
    }

    mod group_by_tests {
        use super::*;

        #[test]
        fn group_labels_projects_present_labels() {
            let g = GroupBy::Labels(vec!["alertname".to_string(), "cluster".to_string()]);
            let grouped = g.group_labels(&labels(&[("alertname", "Down"), ("instance", "a")]));
            assert_eq!(grouped, labels(&[("alertname", "Down")]));
        }

        #[test]
        fn empty_list_is_unset() {
            assert_eq!(GroupBy::parse(&[]).unwrap(), None);
        }

        #[test]
        fn serializes_wildcard() {
            let json = serde_json::to_string(&GroupBy::All).unwrap();
            assert_eq!(json, r#"["..."]"#);
        }
    }

    mod serialization_tests {
        use super::*;

        #[test]
        fn to_def_round_trips() {
            let yaml = r"
receiver: default
group_by: ['...']
routes:
  - match: {severity: critical}
    match_re: {service: 'api.*'}
    receiver: pager
    continue: true
    group_interval: 1m
";
            let def: RouteDef = serde_yaml::from_str(yaml).unwrap();
            let root = Route::new_root(&def).unwrap();
            assert_eq!(root.to_def(), def);

            let written = serde_yaml::to_string(&root).unwrap();
            let reread: RouteDef = serde_yaml::from_str(&written).unwrap();
            assert_eq!(reread, def);
        }
    }
}

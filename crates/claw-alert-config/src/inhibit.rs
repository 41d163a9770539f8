//! Inhibition rules: an alert matching the source side mutes alerts matching
//! the target side when the two agree on the `equal` labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;
use crate::labels::{LabelSet, label_value, validate_label_name};
use crate::matcher::{AnchoredRegex, Matcher, Matchers};

/// Plain decoded form of an inhibition rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InhibitRuleDef {
    /// Labels the source alert must have with these exact values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub source_match: BTreeMap<String, String>,
    /// Labels the source alert must fully match.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub source_match_re: BTreeMap<String, String>,
    /// Labels the target alert must have with these exact values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub target_match: BTreeMap<String, String>,
    /// Labels the target alert must fully match.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub target_match_re: BTreeMap<String, String>,
    /// Labels whose values must be equal on source and target.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equal: Vec<String>,
}

/// A validated inhibition rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InhibitRule {
    source: Matchers,
    target: Matchers,
    equal: Vec<String>,
    def: InhibitRuleDef,
}

impl InhibitRule {
    /// Validates a rule definition and compiles its matchers.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLabelName` for a bad label name in any of
    /// the maps or in `equal`, and `ConfigError::InvalidRegex` for a pattern
    /// that does not compile.
    pub fn new(def: InhibitRuleDef) -> Result<Self> {
        let source = compile_side(&def.source_match, &def.source_match_re, "source")?;
        let target = compile_side(&def.target_match, &def.target_match_re, "target")?;
        for name in &def.equal {
            validate_label_name(name, "equal")?;
        }

        Ok(Self {
            source,
            target,
            equal: def.equal.clone(),
            def,
        })
    }

    /// Returns true if an alert with `source` labels mutes one with `target`
    /// labels under this rule.
    ///
    /// A label listed in `equal` that is absent from both alerts counts as
    /// equal. An alert may match both sides of a rule, so the same label set
    /// passed twice can suppress itself.
    #[must_use]
    pub fn suppresses(&self, source: &LabelSet, target: &LabelSet) -> bool {
        self.source.matches(source)
            && self.target.matches(target)
            && self
                .equal
                .iter()
                .all(|name| label_value(source, name) == label_value(target, name))
    }

    /// Returns true if the labels satisfy the source side.
    #[must_use]
    pub fn source_matches(&self, labels: &LabelSet) -> bool {
        self.source.matches(labels)
    }

    /// Returns true if the labels satisfy the target side.
    #[must_use]
    pub fn target_matches(&self, labels: &LabelSet) -> bool {
        self.target.matches(labels)
    }

    /// Returns the compiled source matchers.
    #[must_use]
    pub const fn source(&self) -> &Matchers {
        &self.source
    }

    /// Returns the compiled target matchers.
    #[must_use]
    pub const fn target(&self) -> &Matchers {
        &self.target
    }

    /// Returns the labels that must agree.
    #[must_use]
    pub fn equal(&self) -> &[String] {
        &self.equal
    }

    /// Returns the rule as written.
    #[must_use]
    pub const fn def(&self) -> &InhibitRuleDef {
        &self.def
    }
}

impl Serialize for InhibitRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.def.serialize(serializer)
    }
}

fn compile_side(
    exact: &BTreeMap<String, String>,
    regex: &BTreeMap<String, String>,
    side: &str,
) -> Result<Matchers> {
    let mut matchers = Vec::with_capacity(exact.len() + regex.len());
    for (name, value) in exact {
        validate_label_name(name, &format!("{side}_match"))?;
        matchers.push(Matcher::exact(name.clone(), value.clone()));
    }
    for (name, pattern) in regex {
        validate_label_name(name, &format!("{side}_match_re"))?;
        matchers.push(Matcher::from_regex(name.clone(), AnchoredRegex::new(pattern)?));
    }
    Ok(Matchers::new(matchers))
}

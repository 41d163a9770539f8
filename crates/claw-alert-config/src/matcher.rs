//! Label matchers and sorted matcher sets.
//!
//! A [`Matcher`] tests one label of an alert against either an exact value or
//! a regular expression anchored to the whole value. A [`Matchers`] set is the
//! conjunction of its members and is kept in a canonical order, so two
//! logically identical sets always print and compare the same way.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};
use crate::labels::{LabelSet, label_value, validate_label_name};

/// A regular expression compiled as `^(?:pattern)$`, together with the
/// pattern as written.
///
/// Both forms are fixed at construction; the pattern is what gets serialized
/// and the compiled form is what gets matched.
#[derive(Clone)]
pub struct AnchoredRegex {
    original: String,
    compiled: Regex,
}

impl AnchoredRegex {
    /// Compiles `pattern` anchored to the full input.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRegex` if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        let compiled =
            Regex::new(&format!("^(?:{pattern})$")).map_err(|e| ConfigError::InvalidRegex {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            original: pattern.to_string(),
            compiled,
        })
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns true if the whole of `value` matches.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.compiled.is_match(value)
    }
}

impl PartialEq for AnchoredRegex {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl Eq for AnchoredRegex {}

impl Hash for AnchoredRegex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.original.hash(state);
    }
}

impl fmt::Debug for AnchoredRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnchoredRegex").field(&self.original).finish()
    }
}

impl fmt::Display for AnchoredRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for AnchoredRegex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for AnchoredRegex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Pattern {
    Exact(String),
    Regex(AnchoredRegex),
}

/// A predicate over a single label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MatcherDef", into = "MatcherDef")]
pub struct Matcher {
    name: String,
    pattern: Pattern,
}

impl Matcher {
    /// Creates a matcher comparing the label for equality with `value`.
    #[must_use]
    pub fn exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Pattern::Exact(value.into()),
        }
    }

    /// Creates a matcher comparing the label against an anchored regex.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRegex` if `pattern` does not compile.
    pub fn regex(name: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Self::from_regex(name, AnchoredRegex::new(pattern)?))
    }

    /// Creates a regex matcher from an already compiled expression.
    #[must_use]
    pub fn from_regex(name: impl Into<String>, regex: AnchoredRegex) -> Self {
        Self {
            name: name.into(),
            pattern: Pattern::Regex(regex),
        }
    }

    /// Creates an exact or regex matcher and validates it.
    ///
    /// # Errors
    ///
    /// Returns the first error from compiling or [`Matcher::validate`].
    pub fn new(name: impl Into<String>, value: &str, is_regex: bool) -> Result<Self> {
        let matcher = if is_regex {
            Self::regex(name, value)?
        } else {
            Self::exact(name, value)
        };
        matcher.validate()?;
        Ok(matcher)
    }

    /// Returns the label name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value or the regex pattern as written.
    #[must_use]
    pub fn value(&self) -> &str {
        match &self.pattern {
            Pattern::Exact(v) => v,
            Pattern::Regex(re) => re.as_str(),
        }
    }

    /// Returns true for a regex matcher.
    #[must_use]
    pub const fn is_regex(&self) -> bool {
        matches!(self.pattern, Pattern::Regex(_))
    }

    /// Checks the label name grammar and, for exact matchers, that the value
    /// is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLabelName` or `ConfigError::InvalidValue`.
    pub fn validate(&self) -> Result<()> {
        validate_label_name(&self.name, "matcher")?;
        match &self.pattern {
            Pattern::Exact(v) if v.is_empty() => Err(ConfigError::InvalidValue {
                name: self.name.clone(),
                value: v.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Returns true if the label set satisfies this matcher.
    ///
    /// An absent label is compared as the empty string.
    #[must_use]
    pub fn matches(&self, labels: &LabelSet) -> bool {
        let v = label_value(labels, &self.name);
        match &self.pattern {
            Pattern::Exact(expected) => v == expected,
            Pattern::Regex(re) => re.is_match(v),
        }
    }
}

impl Ord for Matcher {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.value().cmp(other.value()))
            .then_with(|| self.is_regex().cmp(&other.is_regex()))
    }
}

impl PartialOrd for Matcher {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.is_regex() { "=~" } else { "=" };
        write!(f, "{}{op}{:?}", self.name, self.value())
    }
}

/// Wire form of a [`Matcher`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MatcherDef {
    name: String,
    value: String,
    #[serde(rename = "isRegex", default)]
    is_regex: bool,
}

impl TryFrom<MatcherDef> for Matcher {
    type Error = ConfigError;

    fn try_from(def: MatcherDef) -> Result<Self> {
        Self::new(def.name, &def.value, def.is_regex)
    }
}

impl From<Matcher> for MatcherDef {
    fn from(m: Matcher) -> Self {
        Self {
            value: m.value().to_string(),
            is_regex: m.is_regex(),
            name: m.name,
        }
    }
}

/// A conjunction of matchers, always sorted by name, value, then exact
/// before regex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Matcher>")]
pub struct Matchers(Vec<Matcher>);

impl Matchers {
    /// Creates a sorted matcher set.
    #[must_use]
    pub fn new(mut matchers: Vec<Matcher>) -> Self {
        matchers.sort();
        Self(matchers)
    }

    /// Returns true if every matcher is satisfied by the label set.
    ///
    /// The empty set matches everything.
    #[must_use]
    pub fn matches(&self, labels: &LabelSet) -> bool {
        self.0.iter().all(|m| m.matches(labels))
    }

    /// Returns the matchers in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[Matcher] {
        &self.0
    }

    /// Returns an iterator over the matchers in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Matcher> {
        self.0.iter()
    }

    /// Returns the number of matchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set has no matchers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Matcher>> for Matchers {
    fn from(matchers: Vec<Matcher>) -> Self {
        Self::new(matchers)
    }
}

impl FromIterator<Matcher> for Matchers {
    fn from_iter<I: IntoIterator<Item = Matcher>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Matchers {
    type Item = &'a Matcher;
    type IntoIter = std::slice::Iter<'a, Matcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Matchers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{m}")?;
        }
        f.write_str("}")
    }
}

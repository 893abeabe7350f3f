//! Code unit search locations
//!
//! Rules of the form `prefix:path` relocate every logical name under
//! `prefix` to a unit path under `path`. The rules are parsed by
//! configuration (`TAO_PATH`); the loader only consumes them.

use serde::{Deserialize, Serialize};
use tao_domain::constants::{UNIT_PATH_SEPARATOR, WILDCARD_PREFIX};
use tao_domain::name::LogicalName;

/// One `prefix:path` rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRule {
    /// Logical name prefix, or `*` for every name
    pub prefix: String,
    /// Unit path replacing the prefix
    pub path: String,
}

impl SearchRule {
    pub fn new(prefix: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            path: path.into(),
        }
    }

    fn is_wildcard(&self) -> bool {
        self.prefix == WILDCARD_PREFIX
    }
}

/// Ordered rule set; a later rule for the same prefix replaces the earlier one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    rules: Vec<SearchRule>,
}

impl SearchPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`SearchPaths::add_rule`]
    pub fn with_rule(mut self, prefix: impl Into<String>, path: impl Into<String>) -> Self {
        self.add_rule(prefix, path);
        self
    }

    pub fn add_rule(&mut self, prefix: impl Into<String>, path: impl Into<String>) {
        let rule = SearchRule::new(prefix, path);
        self.rules.retain(|existing| existing.prefix != rule.prefix);
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[SearchRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Unit path for `name`.
    ///
    /// The longest segment-wise matching prefix wins, then the wildcard
    /// rule; without any match the unit path is the name's segments joined
    /// by `/`.
    pub fn unit_path(&self, name: &LogicalName) -> String {
        self.mapped_path(name)
            .unwrap_or_else(|| default_unit_path(name))
    }

    /// Locations to probe for `name`, in order: the rule-mapped path, if
    /// a rule applies, then the default path. Rules extend the search,
    /// they never hide the default location.
    pub fn candidate_paths(&self, name: &LogicalName) -> Vec<String> {
        let default = default_unit_path(name);
        match self.mapped_path(name) {
            Some(mapped) if mapped != default => vec![mapped, default],
            _ => vec![default],
        }
    }

    fn mapped_path(&self, name: &LogicalName) -> Option<String> {
        let segments: Vec<&str> = name.segments().collect();

        let (rule, consumed) = self
            .rules
            .iter()
            .filter(|rule| !rule.is_wildcard())
            .map(|rule| (rule, LogicalName::new(&rule.prefix)))
            .filter(|(_, prefix)| !prefix.is_empty() && name.has_prefix(prefix))
            .max_by_key(|(_, prefix)| prefix.segments().count())
            .map(|(rule, prefix)| (rule, prefix.segments().count()))
            .or_else(|| {
                self.rules
                    .iter()
                    .rev()
                    .find(|rule| rule.is_wildcard())
                    .map(|rule| (rule, 0))
            })?;

        let base = rule.path.trim_end_matches(UNIT_PATH_SEPARATOR);
        let rest = segments[consumed..].join("/");
        Some(match (base.is_empty(), rest.is_empty()) {
            (_, true) => base.to_string(),
            (true, false) => rest,
            (false, false) => format!("{base}{UNIT_PATH_SEPARATOR}{rest}"),
        })
    }
}

fn default_unit_path(name: &LogicalName) -> String {
    name.segments().collect::<Vec<_>>().join("/")
}

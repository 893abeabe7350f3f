//! Code unit search rules from configuration and `TAO_PATH`
//!
//! `TAO_PATH` holds `;`-separated `prefix:path` rules, for example
//! `App:/srv/app/lib;*:/srv/shared`. Rules that do not match
//! [`PATH_RULE_PATTERN`] are skipped, and a later rule for a prefix
//! replaces an earlier one.

use std::env;
use std::sync::LazyLock;

use regex::Regex;
use tao_application::search_paths::{SearchPaths, SearchRule};
use tracing::{debug, warn};

use crate::constants::{PATH_RULE_PATTERN, PATH_RULE_SEPARATOR, PATH_VARIABLE};

static PATH_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PATH_RULE_PATTERN).expect("Invalid regex"));

/// Parse one `prefix:path` rule
pub fn parse_search_rule(rule: &str) -> Option<SearchRule> {
    let captures = PATH_RULE.captures(rule.trim())?;
    Some(SearchRule::new(&captures[1], captures[2].trim()))
}

/// Parse a `;`-separated rule list, skipping malformed rules
pub fn parse_search_paths(value: &str) -> SearchPaths {
    let mut paths = SearchPaths::new();
    for rule in value.split(PATH_RULE_SEPARATOR).filter(|r| !r.trim().is_empty()) {
        match parse_search_rule(rule) {
            Some(SearchRule { prefix, path }) => paths.add_rule(prefix, path),
            None => warn!(rule, "Skipping malformed search rule"),
        }
    }
    paths
}

/// Rules from `TAO_PATH`, empty when unset
pub fn search_paths_from_env() -> SearchPaths {
    match env::var(PATH_VARIABLE) {
        Ok(value) => {
            let paths = parse_search_paths(&value);
            debug!(rules = paths.rules().len(), "Read search rules from {PATH_VARIABLE}");
            paths
        }
        Err(_) => SearchPaths::new(),
    }
}

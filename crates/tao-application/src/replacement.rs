//! Implementation substitution
//!
//! Maps a logical name to an override name. Resolution follows the chain
//! of overrides while every hop targets a subtype of the name it replaces,
//! and stops at the last valid name otherwise. Nothing is memoised:
//! overrides may be registered at any time, in any order.

use std::collections::{HashMap, HashSet};

use tao_domain::constants::MAX_OVERRIDE_HOPS;
use tao_domain::error::{Error, Result};
use tao_domain::name::LogicalName;
use tracing::{debug, warn};

/// Override table consulted by every construction request
#[derive(Debug, Default, Clone)]
pub struct ReplacementRegistry {
    overrides: HashMap<LogicalName, LogicalName>,
}

impl ReplacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite an override.
    ///
    /// Subtype compatibility is not checked here; the target may not be
    /// loaded yet.
    pub fn register_override(
        &mut self,
        source: impl Into<LogicalName>,
        target: impl Into<LogicalName>,
    ) {
        let source = source.into();
        let target = target.into();
        debug!(source = %source, target = %target, "Registering override");
        self.overrides.insert(source, target);
    }

    /// Bulk form of [`ReplacementRegistry::register_override`]
    pub fn register_many<I, S, T>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<LogicalName>,
        T: Into<LogicalName>,
    {
        for (source, target) in pairs {
            self.register_override(source, target);
        }
    }

    /// Direct override for `name`, without validation
    pub fn override_for(&self, name: &LogicalName) -> Option<&LogicalName> {
        self.overrides.get(name)
    }

    /// Drop the override registered for `name`
    pub fn remove(&mut self, name: &LogicalName) -> Option<LogicalName> {
        self.overrides.remove(name)
    }

    /// Registered pairs, sorted by source
    pub fn pairs(&self) -> Vec<(&LogicalName, &LogicalName)> {
        let mut pairs: Vec<_> = self.overrides.iter().collect();
        pairs.sort();
        pairs
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Follow the override chain starting at `name`.
    ///
    /// `is_subtype(previous, target)` is asked for every hop; the first
    /// hop it rejects ends the chain at `previous`. A chain that revisits a
    /// name or runs past [`MAX_OVERRIDE_HOPS`] is a resolution error.
    pub fn resolve<F>(&self, name: &LogicalName, mut is_subtype: F) -> Result<LogicalName>
    where
        F: FnMut(&LogicalName, &LogicalName) -> bool,
    {
        let mut current = name.clone();
        let mut visited = HashSet::from([current.clone()]);
        let mut hops = 0;

        loop {
            let Some(target) = self.overrides.get(&current) else {
                return Ok(current);
            };
            if !is_subtype(&current, target) {
                warn!(source = %current, target = %target, "Override rejected: target is not a subtype");
                return Ok(current);
            }
            if !visited.insert(target.clone()) {
                return Err(Error::resolution(format!(
                    "Override cycle for '{name}' through '{target}'"
                )));
            }
            hops += 1;
            if hops > MAX_OVERRIDE_HOPS {
                return Err(Error::resolution(format!(
                    "Override chain for '{name}' exceeds {MAX_OVERRIDE_HOPS} hops"
                )));
            }
            debug!(source = %current, target = %target, "Following override");
            current = target.clone();
        }
    }
}

//! Deferred code loading
//!
//! Locates the code unit for a logical name (or, failing that, for its
//! owning module) and registers the unit's implementations into the
//! [`TypeCatalog`] the first time they are needed.
//!
//! ## Lookup order
//!
//! ```text
//! ensure_loaded("Stub.Database")
//!        │
//!        ├── disabled / already in catalog ──► no-op
//!        │
//!        ├── unit "Stub/Database" ? ──► load it
//!        │
//!        ├── unit "Stub" (module) ? ──► load it
//!        │
//!        └── nothing found ──► no-op (construction reports the miss)
//! ```

use std::collections::{HashMap, HashSet};

use tao_domain::name::LogicalName;
use tracing::{debug, trace};

use crate::catalog::TypeCatalog;
use crate::registry::{CODE_UNITS, CodeUnitEntry};
use crate::search_paths::SearchPaths;

/// Code unit loader with a memoised location cache
#[derive(Debug)]
pub struct Loader {
    enabled: bool,
    search_paths: SearchPaths,
    units: Vec<&'static CodeUnitEntry>,
    located: HashMap<LogicalName, Option<&'static CodeUnitEntry>>,
    loaded: HashSet<&'static str>,
}

impl Loader {
    /// Loader over every linked code unit
    pub fn new() -> Self {
        Self::with_units(CODE_UNITS.iter())
    }

    /// Loader over an explicit set of code units
    pub fn with_units(units: impl IntoIterator<Item = &'static CodeUnitEntry>) -> Self {
        Self {
            enabled: true,
            search_paths: SearchPaths::default(),
            units: units.into_iter().collect(),
            located: HashMap::new(),
            loaded: HashSet::new(),
        }
    }

    /// Replace the search rules; cached locations are discarded
    pub fn with_search_paths(mut self, search_paths: SearchPaths) -> Self {
        self.set_search_paths(search_paths);
        self
    }

    pub fn set_search_paths(&mut self, search_paths: SearchPaths) {
        self.search_paths = search_paths;
        self.located.clear();
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn deferred loading on or off. When off, [`Loader::ensure_loaded`]
    /// does nothing and all code is expected to be loaded already.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Code unit for exactly `name`, memoised (absence included).
    ///
    /// The rule-mapped location is probed before the default one.
    pub fn locate(&mut self, name: &LogicalName) -> Option<&'static CodeUnitEntry> {
        if let Some(cached) = self.located.get(name) {
            trace!(name = %name, found = cached.is_some(), "Unit location cache hit");
            return *cached;
        }
        let candidates = self.search_paths.candidate_paths(name);
        let unit = candidates.iter().find_map(|path| {
            self.units.iter().copied().find(|unit| unit.path == path)
        });
        debug!(
            name = %name,
            candidates = ?candidates,
            found = unit.map(|unit| unit.path),
            "Located code unit"
        );
        self.located.insert(name.clone(), unit);
        unit
    }

    /// Make sure the implementation for `name` is known to `catalog`.
    ///
    /// Prefers the unit for the exact name, then the unit of its module.
    /// Silently does nothing when neither exists.
    pub fn ensure_loaded(&mut self, catalog: &mut TypeCatalog, name: &LogicalName) {
        if !self.enabled || name.is_empty() || catalog.contains(name) {
            return;
        }
        let unit = match self.locate(name) {
            Some(unit) => Some(unit),
            None => self.locate(&name.module()),
        };
        if let Some(unit) = unit {
            self.load_unit(catalog, unit);
        }
    }

    /// Register `unit` into `catalog` once, after its requirements
    pub fn load_unit(&mut self, catalog: &mut TypeCatalog, unit: &'static CodeUnitEntry) {
        if !self.loaded.insert(unit.path) {
            return;
        }
        for required in unit.requires {
            self.ensure_loaded(catalog, &LogicalName::new(required));
        }
        debug!(path = unit.path, "Loading code unit");
        (unit.register)(catalog);
    }

    /// Load every known unit up front, for deployments with deferred
    /// loading disabled
    pub fn load_all(&mut self, catalog: &mut TypeCatalog) {
        let units = self.units.clone();
        for unit in units {
            self.load_unit(catalog, unit);
        }
    }

    pub fn is_loaded(&self, path: &str) -> bool {
        self.loaded.contains(path)
    }

    /// Paths of the units loaded so far, sorted
    pub fn loaded_units(&self) -> Vec<&'static str> {
        let mut loaded: Vec<_> = self.loaded.iter().copied().collect();
        loaded.sort_unstable();
        loaded
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

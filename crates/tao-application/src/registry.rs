//! Code Unit Registry
//!
//! Defines the auto-registration infrastructure for implementation code.
//! Uses the `linkme` crate for compile-time registration of code units
//! that the loader discovers and loads on first use.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Code Unit Loading Flow                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Unit defines:     #[linkme::distributed_slice(CODE_UNITS)]  │
//! │                       static UNIT: CodeUnitEntry = ...          │
//! │                              ↓                                  │
//! │  2. Loader maps:      "Stub.Database" → "Stub/Database"         │
//! │                              ↓                                  │
//! │  3. Loader queries:   CODE_UNITS.iter() by path                 │
//! │                              ↓                                  │
//! │  4. Unit registers:   (entry.register)(&mut catalog)            │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use tao_application::registry::{CodeUnitEntry, CODE_UNITS};
//!
//! #[linkme::distributed_slice(CODE_UNITS)]
//! static DATABASE_UNIT: CodeUnitEntry = CodeUnitEntry {
//!     path: "Stub/Database",
//!     description: "In-memory database stub",
//!     requires: &["Tao.Service"],
//!     register: |catalog| {
//!         catalog.register(Implementation::class("Stub.Database").extends("Tao.Service"));
//!     },
//! };
//! ```

use std::fmt;

use crate::catalog::TypeCatalog;

/// Registry entry for a code unit
///
/// Each unit registers itself into [`CODE_UNITS`]. A unit may define
/// several implementations (a module), and may require other logical
/// names to be loaded first (typically its parent classes).
pub struct CodeUnitEntry {
    /// Unit path, `/`-separated (e.g. "Tao/Service/Config")
    pub path: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Logical names the loader ensures before registering this unit
    pub requires: &'static [&'static str],
    /// Installs the unit's implementations
    pub register: fn(&mut TypeCatalog),
}

impl fmt::Debug for CodeUnitEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeUnitEntry")
            .field("path", &self.path)
            .field("description", &self.description)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

// Auto-collection via linkme distributed slices - units submit entries at compile time
#[linkme::distributed_slice]
pub static CODE_UNITS: [CodeUnitEntry] = [..];

/// Find a linked code unit by its path
pub fn find_code_unit(path: &str) -> Option<&'static CodeUnitEntry> {
    CODE_UNITS.iter().find(|entry| entry.path == path)
}

/// List all linked code units
///
/// Returns a list of (path, description) tuples, sorted by path.
/// Useful for CLI help and diagnostics.
pub fn list_code_units() -> Vec<(&'static str, &'static str)> {
    let mut units: Vec<_> = CODE_UNITS
        .iter()
        .map(|entry| (entry.path, entry.description))
        .collect();
    units.sort_unstable();
    units
}

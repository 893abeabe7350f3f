//! Logical component names
//!
//! A [`LogicalName`] is a dot-delimited identifier such as `Stub.Database`.
//! It maps one to one onto an [`ImplementationId`] (`Stub::Database`) by
//! separator substitution. Both forms are accepted as input, so
//! canonicalisation is idempotent and total.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{IMPLEMENTATION_SEPARATOR, NAME_SEPARATOR};

/// Canonical, dot-delimited component identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LogicalName(String);

impl LogicalName {
    /// Canonicalise `name` and wrap it
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(canonicalize(name.as_ref()))
    }

    /// Canonical textual form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty name (input had no segments at all)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hierarchical segments, outermost first
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(NAME_SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Last segment
    pub fn leaf(&self) -> &str {
        self.0.rsplit(NAME_SEPARATOR).next().unwrap_or_default()
    }

    /// Owning module: the name without its last segment.
    ///
    /// A single-segment name is its own module.
    pub fn module(&self) -> LogicalName {
        match self.0.rfind(NAME_SEPARATOR) {
            Some(idx) => Self(self.0[..idx].to_string()),
            None => self.clone(),
        }
    }

    /// Structural mapping to the implementation identifier. Does not check
    /// that the implementation exists.
    pub fn implementation(&self) -> ImplementationId {
        ImplementationId(self.clone())
    }

    /// Segment-wise prefix test: `A.B` is a prefix of `A.B.C` but not of `A.BC`
    pub fn has_prefix(&self, prefix: &LogicalName) -> bool {
        if prefix.is_empty() {
            return true;
        }
        match self.0.strip_prefix(prefix.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with(NAME_SEPARATOR),
            None => false,
        }
    }
}

/// Canonicalise a raw identifier.
///
/// Strips leading, trailing and repeated separators and maps the
/// implementation separator (`::`) and `\` back to `.`.
pub fn canonicalize(name: &str) -> String {
    name.trim()
        .replace(IMPLEMENTATION_SEPARATOR, ".")
        .replace('\\', ".")
        .split(NAME_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for LogicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogicalName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LogicalName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&String> for LogicalName {
    fn from(value: &String) -> Self {
        Self::new(value)
    }
}

impl From<LogicalName> for String {
    fn from(value: LogicalName) -> Self {
        value.0
    }
}

impl Borrow<str> for LogicalName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LogicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Implementation identifier, the `::`-separated form of a logical name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImplementationId(LogicalName);

impl ImplementationId {
    /// Logical name this identifier was derived from
    pub fn logical(&self) -> &LogicalName {
        &self.0
    }
}

impl fmt::Display for ImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in self.0.segments() {
            if !first {
                f.write_str(IMPLEMENTATION_SEPARATOR)?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl From<LogicalName> for ImplementationId {
    fn from(value: LogicalName) -> Self {
        Self(value)
    }
}

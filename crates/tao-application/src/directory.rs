//! Working directory context for construction
//!
//! Constructors may open resources by relative path. The factory enters
//! the configured base directory for the duration of a construction and
//! the returned [`DirectoryGuard`] restores the previous working directory
//! when dropped, on every exit path including panics.

use std::env;
use std::path::{Path, PathBuf};

use tao_domain::error::{Error, Result};
use tracing::{error, trace};

/// Base directory that constructions run in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryContext {
    base_dir: Option<PathBuf>,
}

impl DirectoryContext {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(Some(base_dir.into()))
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn set_base_dir(&mut self, base_dir: Option<PathBuf>) {
        self.base_dir = base_dir;
    }

    /// Save the current directory and switch to the base directory, if any
    pub fn enter(&self) -> Result<DirectoryGuard> {
        let saved = env::current_dir()
            .map_err(|e| Error::io_with_source("Failed to read current directory", e))?;
        let Some(base) = &self.base_dir else {
            return Ok(DirectoryGuard {
                saved,
                changed: false,
            });
        };
        env::set_current_dir(base).map_err(|e| {
            Error::io_with_source(
                format!("Failed to enter base directory {}", base.display()),
                e,
            )
        })?;
        trace!(base = %base.display(), saved = %saved.display(), "Entered base directory");
        Ok(DirectoryGuard {
            saved,
            changed: true,
        })
    }
}

/// Restores the saved working directory on drop
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct DirectoryGuard {
    saved: PathBuf,
    changed: bool,
}

impl DirectoryGuard {
    /// Directory that will be restored
    pub fn saved(&self) -> &Path {
        &self.saved
    }
}

impl Drop for DirectoryGuard {
    fn drop(&mut self) {
        if !self.changed {
            return;
        }
        if let Err(e) = env::set_current_dir(&self.saved) {
            error!(saved = %self.saved.display(), error = %e, "Failed to restore working directory");
        }
    }
}

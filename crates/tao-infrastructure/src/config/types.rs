//! Runtime configuration types

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tao_domain::value::Options;

use crate::constants::DEFAULT_LOG_LEVEL;

/// Top-level runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Loader and directory settings
    pub runtime: RuntimeSection,

    /// Code unit search rules, `prefix:path` each
    pub paths: Vec<String>,

    /// Implementation overrides, logical name → override name
    pub overrides: BTreeMap<String, String>,

    /// Services declared at bootstrap
    pub services: BTreeMap<String, ServiceSpec>,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Loader and directory settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSection {
    /// Working directory for constructions
    pub base_dir: Option<PathBuf>,

    /// Load code units on first use
    pub autoload: bool,

    /// Load every linked code unit at start
    pub preload: bool,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            base_dir: None,
            autoload: true,
            preload: false,
        }
    }
}

/// Declaration of one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Implementation logical name
    pub class: String,

    /// Options applied before `init`
    #[serde(default)]
    pub options: Options,

    /// Reject later redeclarations
    #[serde(default)]
    pub immutable: bool,
}

impl ServiceSpec {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            options: Options::new(),
            immutable: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

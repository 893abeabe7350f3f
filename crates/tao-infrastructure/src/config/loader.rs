//! Configuration loader
//!
//! Loads [`RuntimeConfig`] from defaults, a TOML file and `TAO_`
//! environment variables, in that order of precedence.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tao_domain::error::{Error, Result};

use crate::config::search_paths::parse_search_rule;
use crate::config::types::RuntimeConfig;
use crate::constants::{
    CONFIG_ENV_NESTING, CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `RuntimeConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix, `__` separating nested keys
    ///    (e.g., `TAO_RUNTIME__AUTOLOAD=false`)
    pub fn load(&self) -> Result<RuntimeConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(RuntimeConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_NESTING),
        );

        let config: RuntimeConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_runtime_config(&config)?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &RuntimeConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing file among the usual locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_runtime_config(config: &RuntimeConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;

    if let Some(rule) = config
        .paths
        .iter()
        .find(|rule| parse_search_rule(rule).is_none())
    {
        return Err(Error::configuration(format!(
            "Invalid search rule '{rule}', expected prefix:path"
        )));
    }

    for (name, spec) in &config.services {
        if name.is_empty() || spec.class.is_empty() {
            return Err(Error::configuration(format!(
                "Service '{name}' needs a name and a class"
            )));
        }
    }

    for (source, target) in &config.overrides {
        if source.is_empty() || target.is_empty() {
            return Err(Error::configuration(format!(
                "Override '{source}' -> '{target}' has an empty side"
            )));
        }
    }

    Ok(())
}

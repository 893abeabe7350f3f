//! Configuration service
//!
//! Reads scoped TOML configuration:
//!
//! ```text
//! get("site:db/dsn")
//!       │    │
//!       │    └─ nested keys, `/`-separated
//!       └─ scope: merge of <path>/site.toml then <path>/site.<env>.toml
//!                 for every configured path, later files winning
//! ```
//!
//! Values stored with [`ConfigService::set`] take precedence over files.
//! Relative paths resolve against the directory the service was
//! constructed in, which is the runtime base directory.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use figment::Figment;
use figment::providers::{Format, Toml};
use tao_application::catalog::Implementation;
use tao_application::registry::{CODE_UNITS, CodeUnitEntry};
use tao_domain::constants::{BASE_SERVICE_CLASS, CONFIG_SERVICE_CLASS};
use tao_domain::error::{Error, Result};
use tao_domain::ports::{Component, Service};
use tao_domain::value::{self, Options, Value};
use tracing::{debug, trace};

use crate::constants::*;

/// Scoped configuration reader
#[derive(Debug)]
pub struct ConfigService {
    options: Options,
    base_dir: PathBuf,
    explicit: RwLock<HashMap<String, Value>>,
    scopes: RwLock<HashMap<String, Value>>,
}

impl ConfigService {
    /// Service resolving relative paths against `base_dir`, with the
    /// default `paths` and `root_config` options seeded
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let options = Options::from([
            (
                OPTION_PATHS.to_string(),
                Value::from(DEFAULT_CONFIG_PATHS.to_vec()),
            ),
            (
                OPTION_ROOT_CONFIG.to_string(),
                Value::from(DEFAULT_ROOT_CONFIG),
            ),
        ]);
        Self {
            options,
            base_dir: base_dir.into(),
            explicit: RwLock::default(),
            scopes: RwLock::default(),
        }
    }

    /// Service resolving relative paths against the current directory
    pub fn in_current_dir() -> Result<Self> {
        let base_dir = env::current_dir()
            .map_err(|e| Error::io_with_source("Failed to read current directory", e))?;
        Ok(Self::with_base_dir(base_dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Active environment, from the `env` option
    pub fn env(&self) -> Option<&str> {
        self.get_option(OPTION_ENV)
            .and_then(Value::as_str)
            .filter(|env| !env.is_empty())
    }

    /// Configuration directories in merge order
    pub fn paths(&self) -> Vec<PathBuf> {
        match self.get_option(OPTION_PATHS) {
            Some(Value::String(path)) => vec![self.resolve(path)],
            Some(Value::Array(paths)) => paths
                .iter()
                .filter_map(Value::as_str)
                .map(|path| self.resolve(path))
                .collect(),
            _ => DEFAULT_CONFIG_PATHS
                .iter()
                .map(|path| self.resolve(path))
                .collect(),
        }
    }

    /// Root configuration file read by `init`
    pub fn root_config(&self) -> PathBuf {
        let root = self
            .get_option(OPTION_ROOT_CONFIG)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ROOT_CONFIG);
        self.resolve(root)
    }

    /// Look up `name` (`scope:path` or `path`), falling back to `default`
    pub fn get(&self, name: &str, default: Value) -> Result<Value> {
        if let Some(value) = self.explicit.read().map_err(poisoned)?.get(name) {
            return Ok(value.clone());
        }
        let (scope, path) = match name.split_once(SCOPE_SEPARATOR) {
            Some((scope, path)) if !scope.is_empty() => (scope, path),
            Some((_, path)) => (DEFAULT_SCOPE, path),
            None => (DEFAULT_SCOPE, name),
        };
        Ok(self.lookup(scope, path)?.unwrap_or(default))
    }

    /// Store an explicit value for `name`, shadowing files
    pub fn set(&self, name: impl Into<String>, value: Value) -> Result<()> {
        self.explicit
            .write()
            .map_err(poisoned)?
            .insert(name.into(), value);
        Ok(())
    }

    /// Forget loaded scopes; files are read again on the next lookup
    pub fn reload(&self) -> Result<()> {
        self.scopes.write().map_err(poisoned)?.clear();
        Ok(())
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }

    fn lookup(&self, scope: &str, path: &str) -> Result<Option<Value>> {
        if let Some(loaded) = self.scopes.read().map_err(poisoned)?.get(scope) {
            trace!(scope, path, "Configuration scope cache hit");
            return Ok(walk(loaded, path).cloned());
        }
        let loaded = self.load_scope(scope)?;
        let found = walk(&loaded, path).cloned();
        self.scopes
            .write()
            .map_err(poisoned)?
            .insert(scope.to_string(), loaded);
        Ok(found)
    }

    fn load_scope(&self, scope: &str) -> Result<Value> {
        let env = self.env();
        let mut figment = Figment::new();
        for dir in self.paths() {
            figment = figment.merge(Toml::file(
                dir.join(format!("{scope}.{CONFIG_EXTENSION}")),
            ));
            if let Some(env) = env {
                figment = figment.merge(Toml::file(
                    dir.join(format!("{scope}.{env}.{CONFIG_EXTENSION}")),
                ));
            }
        }
        let loaded: Value = figment.extract().map_err(|e| {
            Error::configuration_with_source(
                format!("Failed to load configuration scope '{scope}'"),
                e,
            )
        })?;
        debug!(scope, env, "Loaded configuration scope");
        Ok(loaded)
    }
}

/// Walk `/`-separated keys; numeric keys index arrays
fn walk<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    path.split(KEY_SEPARATOR)
        .filter(|key| !key.is_empty())
        .try_fold(root, |current, key| match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn poisoned<T>(_: PoisonError<T>) -> Error {
    Error::internal("Configuration cache lock poisoned")
}

impl Component for ConfigService {
    fn type_name(&self) -> &str {
        CONFIG_SERVICE_CLASS
    }

    fn as_service(&self) -> Option<&dyn Service> {
        Some(self)
    }

    fn as_service_mut(&mut self) -> Option<&mut dyn Service> {
        Some(self)
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        match (method, args) {
            ("get", _) => Ok(self.service(args)?.unwrap_or(Value::Null)),
            ("set", [Value::String(name), value]) => {
                self.set(name.as_str(), value.clone())?;
                Ok(Value::Null)
            }
            ("set", _) => Err(Error::invalid_argument_value(
                "args",
                "expected a name and a value",
            )),
            ("env", _) => Ok(self.env().map_or(Value::Null, Value::from)),
            _ => Err(Error::missing_method(format!("Tao::Service::Config::{method}"))),
        }
    }
}

impl Service for ConfigService {
    fn options(&self) -> &Options {
        &self.options
    }

    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Adopt the root configuration's `env` unless one is set explicitly.
    fn init(&mut self) -> Result<()> {
        let root = self.root_config();
        if root.is_file() && self.env().is_none() {
            let values: Value = Figment::from(Toml::file(&root)).extract().map_err(|e| {
                Error::configuration_with_source(
                    format!("Failed to read root configuration {}", root.display()),
                    e,
                )
            })?;
            if let Some(env) = values.get(OPTION_ENV).filter(|env| value::is_truthy(env)) {
                debug!(root = %root.display(), env = %env, "Adopted environment from root configuration");
                self.options.insert(OPTION_ENV.to_string(), env.clone());
            }
        }
        self.scopes.get_mut().map_err(poisoned)?.clear();
        Ok(())
    }

    /// `[]` is the service itself; `[name]` or `[name, default]` is a lookup
    fn service(&self, args: &[Value]) -> Result<Option<Value>> {
        match args {
            [] => Ok(None),
            [Value::String(name)] => self.get(name.trim(), Value::Null).map(Some),
            [Value::String(name), default, ..] => {
                self.get(name.trim(), default.clone()).map(Some)
            }
            [other, ..] => Err(Error::invalid_argument_type(
                "name",
                value::type_name(other),
            )),
        }
    }
}

#[linkme::distributed_slice(CODE_UNITS)]
static CONFIG_SERVICE_UNIT: CodeUnitEntry = CodeUnitEntry {
    path: "Tao/Service/Config",
    description: "Scoped TOML configuration service",
    requires: &[BASE_SERVICE_CLASS],
    register: |catalog| {
        catalog.register(
            Implementation::class(CONFIG_SERVICE_CLASS)
                .extends(BASE_SERVICE_CLASS)
                .with_default(|| Ok(Box::new(ConfigService::in_current_dir()?))),
        );
    },
};

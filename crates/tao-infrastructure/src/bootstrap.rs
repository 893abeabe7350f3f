//! Runtime bootstrap
//!
//! Composition root turning a [`RuntimeConfig`] into a ready
//! [`ServiceContainer`]:
//!
//! ```text
//! RuntimeConfig.paths + TAO_PATH ──► SearchPaths ──► Loader
//!                                                      │
//! runtime.base_dir ──► DirectoryContext ──► ObjectFactory ◄── overrides
//!                                                      │
//!                                  services ──► ServiceContainer
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! let mut runtime = init_runtime(config)?;
//! let db = runtime.container_mut().instance("db")?;
//! ```

use std::env;

use tao_application::container::ServiceContainer;
use tao_application::directory::DirectoryContext;
use tao_application::factory::ObjectFactory;
use tao_application::loader::Loader;
use tao_application::search_paths::{SearchPaths, SearchRule};
use tao_domain::error::Result;
use tracing::{debug, info};

use crate::config::search_paths::{parse_search_rule, search_paths_from_env};
use crate::config::types::RuntimeConfig;
use crate::error_ext::ErrorContext;

/// Configured runtime: the configuration it was built from and the
/// container owning the factory
#[derive(Debug)]
pub struct Runtime {
    config: RuntimeConfig,
    container: ServiceContainer,
}

impl Runtime {
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut ServiceContainer {
        &mut self.container
    }

    pub fn factory_mut(&mut self) -> &mut ObjectFactory {
        self.container.factory_mut()
    }

    pub fn into_container(self) -> ServiceContainer {
        self.container
    }
}

/// Build the runtime described by `config`
///
/// Search rules from `TAO_PATH` are applied after the configured ones and
/// win for the same prefix. A relative base directory is anchored to the
/// current directory.
pub fn init_runtime(config: RuntimeConfig) -> Result<Runtime> {
    let search_paths = search_paths(&config);
    debug!(rules = search_paths.rules().len(), "Search rules ready");

    let mut loader = Loader::new().with_search_paths(search_paths);
    loader.set_enabled(config.runtime.autoload);

    let base_dir = match &config.runtime.base_dir {
        Some(dir) if dir.is_relative() => Some(
            env::current_dir()
                .io_context("Failed to read current directory")?
                .join(dir),
        ),
        other => other.clone(),
    };

    let mut factory = ObjectFactory::new(loader).with_directory(DirectoryContext::new(base_dir));
    for (source, target) in &config.overrides {
        factory.register_override(source.as_str(), target.as_str());
    }

    if config.runtime.preload || !config.runtime.autoload {
        factory.load_all();
        debug!(
            units = factory.loader().loaded_units().len(),
            "Code units preloaded"
        );
    }

    let mut container = ServiceContainer::new(factory);
    for (name, spec) in &config.services {
        container.declare(
            name.as_str(),
            spec.class.as_str(),
            spec.options.clone(),
            spec.immutable,
        )?;
    }

    info!(
        services = config.services.len(),
        overrides = config.overrides.len(),
        autoload = config.runtime.autoload,
        base_dir = ?config.runtime.base_dir,
        "Runtime initialized"
    );

    Ok(Runtime { config, container })
}

fn search_paths(config: &RuntimeConfig) -> SearchPaths {
    let mut paths = SearchPaths::new();
    let configured = config.paths.iter().filter_map(|rule| parse_search_rule(rule));
    let from_env = search_paths_from_env().rules().to_vec();
    for SearchRule { prefix, path } in configured.chain(from_env) {
        paths.add_rule(prefix, path);
    }
    paths
}

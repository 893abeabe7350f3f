//! Object factory
//!
//! Builds components from logical names:
//!
//! ```text
//! build("Shape", args)
//!   │
//!   ├─ 1. ReplacementRegistry::resolve   "Shape" → "Shape.Circle"
//!   ├─ 2. Loader::ensure_loaded          (name, parents, interfaces)
//!   ├─ 3. DirectoryContext::enter        guard restores cwd on drop
//!   ├─ 4. NameResolver::constructor_handle_for
//!   └─ 5. ConstructorHandle::instantiate (args bound positionally)
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tao_domain::error::{Error, Result};
use tao_domain::name::LogicalName;
use tao_domain::ports::Component;
use tao_domain::value::{self, Value};
use tracing::debug;

use crate::call::{Call, Target};
use crate::catalog::TypeCatalog;
use crate::directory::DirectoryContext;
use crate::loader::Loader;
use crate::replacement::ReplacementRegistry;
use crate::resolver::{NameResolver, Subject};

/// Composes the catalog, loader, override table and directory context
#[derive(Debug, Default)]
pub struct ObjectFactory {
    catalog: TypeCatalog,
    loader: Loader,
    replacements: ReplacementRegistry,
    directory: DirectoryContext,
}

impl ObjectFactory {
    pub fn new(loader: Loader) -> Self {
        Self {
            catalog: TypeCatalog::new(),
            loader,
            replacements: ReplacementRegistry::new(),
            directory: DirectoryContext::default(),
        }
    }

    pub fn with_directory(mut self, directory: DirectoryContext) -> Self {
        self.directory = directory;
        self
    }

    pub fn with_replacements(mut self, replacements: ReplacementRegistry) -> Self {
        self.replacements = replacements;
        self
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut TypeCatalog {
        &mut self.catalog
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut Loader {
        &mut self.loader
    }

    pub fn replacements(&self) -> &ReplacementRegistry {
        &self.replacements
    }

    pub fn replacements_mut(&mut self) -> &mut ReplacementRegistry {
        &mut self.replacements
    }

    pub fn directory(&self) -> &DirectoryContext {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut DirectoryContext {
        &mut self.directory
    }

    /// Shorthand for [`ReplacementRegistry::register_override`]
    pub fn register_override(
        &mut self,
        source: impl Into<LogicalName>,
        target: impl Into<LogicalName>,
    ) {
        self.replacements.register_override(source, target);
    }

    /// Resolver over the implementations loaded so far
    pub fn resolver(&self) -> NameResolver<'_> {
        NameResolver::new(&self.catalog)
    }

    /// Load `name` together with its parents and interfaces
    pub fn load(&mut self, name: &LogicalName) {
        load_hierarchy(&mut self.loader, &mut self.catalog, name);
    }

    /// Load every code unit the loader knows about
    pub fn load_all(&mut self) {
        self.loader.load_all(&mut self.catalog);
    }

    /// Follow overrides from `name`, loading each hop before the
    /// subtype check
    pub fn resolve(&mut self, name: &LogicalName) -> Result<LogicalName> {
        let Self {
            catalog,
            loader,
            replacements,
            ..
        } = self;
        replacements.resolve(name, |source, target| {
            load_hierarchy(loader, catalog, source);
            load_hierarchy(loader, catalog, target);
            NameResolver::new(catalog)
                .is_subtype_of(source, target)
                .unwrap_or(false)
        })
    }

    /// Ancestor chain of `name`, loading it first
    pub fn hierarchy_of(&mut self, name: &LogicalName) -> Result<Vec<LogicalName>> {
        self.load(name);
        self.resolver().hierarchy_of(name)
    }

    /// Subtype check that loads both sides first
    pub fn is_subtype_of<'s>(
        &mut self,
        ancestor: &LogicalName,
        candidate: impl Into<Subject<'s>>,
    ) -> Result<bool> {
        let candidate = candidate.into();
        self.load(ancestor);
        if let Subject::Name(name) = candidate {
            self.load(name);
        }
        self.resolver().is_subtype_of(ancestor, candidate)
    }

    /// Build a component from a logical name and positional arguments
    pub fn build(
        &mut self,
        name: impl Into<LogicalName>,
        args: &[Value],
    ) -> Result<Box<dyn Component>> {
        let requested = name.into();
        if requested.is_empty() {
            return Err(Error::invalid_argument_value("name", ""));
        }

        let resolved = self.resolve(&requested)?;
        self.load(&resolved);

        let _guard = self.directory.enter()?;
        let handle = self.resolver().constructor_handle_for(&resolved)?;
        let instance = handle.instantiate(args)?;

        debug!(
            requested = %requested,
            resolved = %resolved,
            parameterized = handle.is_parameterized(),
            "Constructed component"
        );
        Ok(instance)
    }

    /// `build` with the name as first element of `args`.
    ///
    /// A single array after the name is unwrapped into the positional list.
    pub fn build_variadic(&mut self, args: &[Value]) -> Result<Box<dyn Component>> {
        let (first, rest) = args
            .split_first()
            .ok_or_else(|| Error::invalid_argument_value("name", "<none>"))?;
        let Value::String(name) = first else {
            return Err(Error::invalid_argument_type("name", value::type_name(first)));
        };
        let rest = value::normalize_args(rest.to_vec());
        self.build(name.as_str(), &rest)
    }

    /// `build` followed by a downcast to the concrete type
    pub fn build_as<T: Component>(
        &mut self,
        name: impl Into<LogicalName>,
        args: &[Value],
    ) -> Result<Box<T>> {
        self.build(name, args)?.downcast::<T>().map_err(|instance| {
            Error::invalid_argument_type(
                std::any::type_name::<T>(),
                instance.type_name().to_string(),
            )
        })
    }

    /// `build` into a shared handle
    pub fn build_shared(
        &mut self,
        name: impl Into<LogicalName>,
        args: &[Value],
    ) -> Result<Arc<dyn Component>> {
        self.build(name, args).map(Arc::from)
    }

    /// Describe a call on `target`, loading a named target's code unit
    pub fn call(
        &mut self,
        target: impl Into<Target>,
        method: impl Into<String>,
        args: Vec<Value>,
    ) -> Call {
        Call::bind(self, target, method, args, true)
    }

    /// [`ObjectFactory::call`] with explicit control over loading
    pub fn call_with(
        &mut self,
        target: impl Into<Target>,
        method: impl Into<String>,
        args: Vec<Value>,
        autoload: bool,
    ) -> Call {
        Call::bind(self, target, method, args, autoload)
    }
}

fn load_hierarchy(loader: &mut Loader, catalog: &mut TypeCatalog, name: &LogicalName) {
    let mut pending = vec![name.clone()];
    let mut seen = HashSet::new();
    while let Some(name) = pending.pop() {
        if !seen.insert(name.clone()) {
            continue;
        }
        loader.ensure_loaded(catalog, &name);
        if let Some(implementation) = catalog.get(&name) {
            pending.extend(implementation.parent().cloned());
            pending.extend(implementation.interfaces().iter().cloned());
        }
    }
}

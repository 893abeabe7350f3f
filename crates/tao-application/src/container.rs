//! Service container
//!
//! Named, lazily constructed singletons:
//!
//! ```text
//! get("db")
//!   │
//!   ├─ declared?            no ──► ask the "config" service for
//!   │                               "services:db" and declare from it
//!   ├─ still unknown?        ──► UndefinedService
//!   ├─ cached instance?      ──► reuse
//!   ├─ build via ObjectFactory, apply options, init() once
//!   └─ raw ? instance : service() value, or the instance itself
//! ```
//!
//! Every name is in one of four states: undeclared, declared,
//! instantiated (terminal for components without the service
//! capability) and initialised. Redeclaring a mutable name returns it to
//! declared.

use std::collections::HashMap;
use std::sync::Arc;

use tao_domain::constants::{CONFIG_SERVICE, CONFIG_SERVICE_CLASS, SERVICES_SCOPE};
use tao_domain::error::{Error, Result};
use tao_domain::name::LogicalName;
use tao_domain::ports::Component;
use tao_domain::value::{self, Options, Value};
use tracing::{debug, info, trace};

use crate::factory::ObjectFactory;

/// Lifecycle of a container entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Undeclared,
    Declared,
    /// Built; terminal for components that are not services
    Instantiated,
    /// Options applied and `init` run
    Initialized,
}

/// Declaration of one named service, plus its cached instance
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    name: String,
    implementation: LogicalName,
    options: Options,
    immutable: bool,
    instance: Option<Arc<dyn Component>>,
    initialized: bool,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>, implementation: impl Into<LogicalName>) -> Self {
        Self {
            name: name.into(),
            implementation: implementation.into(),
            options: Options::new(),
            immutable: false,
            instance: None,
            initialized: false,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn with_immutable(mut self, immutable: bool) -> Self {
        self.immutable = immutable;
        self
    }

    /// Declaration from a `services:<name>` configuration entry.
    ///
    /// Accepts an implementation name, or a record with `class` and
    /// optional `options` and `immutable`.
    pub fn from_config(name: &str, entry: &Value) -> Result<Self> {
        let key = format!("{SERVICES_SCOPE}:{name}");
        match entry {
            Value::String(class) => Ok(Self::new(name, class.as_str())),
            Value::Object(record) => {
                let class = match record.get("class") {
                    Some(Value::String(class)) => class.as_str(),
                    Some(other) => {
                        return Err(Error::invalid_argument_type(
                            format!("{key}.class"),
                            value::type_name(other),
                        ));
                    }
                    None => return Err(Error::missing_key(key, "class")),
                };
                let options = match record.get("options") {
                    None | Some(Value::Null) => Options::new(),
                    Some(Value::Object(options)) => options
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                    Some(other) => {
                        return Err(Error::invalid_argument_type(
                            format!("{key}.options"),
                            value::type_name(other),
                        ));
                    }
                };
                let immutable = record.get("immutable").is_some_and(value::is_truthy);
                Ok(Self::new(name, class)
                    .with_options(options)
                    .with_immutable(immutable))
            }
            other => Err(Error::invalid_argument_value(key, other.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn implementation(&self) -> &LogicalName {
        &self.implementation
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    pub fn instance(&self) -> Option<&Arc<dyn Component>> {
        self.instance.as_ref()
    }

    pub fn state(&self) -> ServiceState {
        match (&self.instance, self.initialized) {
            (None, _) => ServiceState::Declared,
            (Some(_), false) => ServiceState::Instantiated,
            (Some(_), true) => ServiceState::Initialized,
        }
    }
}

/// What [`ServiceContainer::get`] hands back
#[derive(Debug, Clone)]
pub enum Resolved {
    /// The cached singleton
    Instance(Arc<dyn Component>),
    /// A value derived by the service's primary accessor
    Value(Value),
}

impl Resolved {
    pub fn instance(&self) -> Option<&Arc<dyn Component>> {
        match self {
            Self::Instance(instance) => Some(instance),
            Self::Value(_) => None,
        }
    }

    pub fn into_instance(self) -> Option<Arc<dyn Component>> {
        match self {
            Self::Instance(instance) => Some(instance),
            Self::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Instance(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Instance(_) => None,
        }
    }

    /// Borrow the instance as its concrete type
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.instance()
            .and_then(|instance| instance.downcast_ref::<T>())
    }
}

/// Registry of named singletons backed by an [`ObjectFactory`]
#[derive(Debug)]
pub struct ServiceContainer {
    factory: ObjectFactory,
    services: HashMap<String, ServiceDescriptor>,
}

impl ServiceContainer {
    /// Container with the bootstrap `config` declaration
    pub fn new(factory: ObjectFactory) -> Self {
        let mut container = Self::empty(factory);
        container.services.insert(
            CONFIG_SERVICE.to_string(),
            ServiceDescriptor::new(CONFIG_SERVICE, CONFIG_SERVICE_CLASS),
        );
        container
    }

    /// Container without any declaration; nothing is discovered through
    /// configuration until `config` is declared
    pub fn empty(factory: ObjectFactory) -> Self {
        Self {
            factory,
            services: HashMap::new(),
        }
    }

    pub fn factory(&self) -> &ObjectFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut ObjectFactory {
        &mut self.factory
    }

    /// Declare or redeclare `name`.
    ///
    /// Redeclaring an immutable name fails and leaves it untouched.
    /// Redeclaring a mutable name drops its cached instance.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        implementation: impl Into<LogicalName>,
        options: Options,
        immutable: bool,
    ) -> Result<()> {
        self.declare_descriptor(
            ServiceDescriptor::new(name, implementation)
                .with_options(options)
                .with_immutable(immutable),
        )
    }

    pub fn declare_descriptor(&mut self, descriptor: ServiceDescriptor) -> Result<()> {
        if self
            .services
            .get(&descriptor.name)
            .is_some_and(ServiceDescriptor::is_immutable)
        {
            return Err(Error::immutable_service(descriptor.name));
        }
        debug!(
            name = %descriptor.name,
            implementation = %descriptor.implementation,
            immutable = descriptor.immutable,
            "Declaring service"
        );
        let mut descriptor = descriptor;
        descriptor.instance = None;
        descriptor.initialized = false;
        self.services.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Whether `name` is declared, consulting configuration for
    /// undeclared names (and declaring them when found)
    pub fn has(&mut self, name: &str) -> Result<bool> {
        if self.services.contains_key(name) {
            return Ok(true);
        }
        if name == CONFIG_SERVICE || !self.services.contains_key(CONFIG_SERVICE) {
            return Ok(false);
        }

        let config = self.instantiate(CONFIG_SERVICE)?;
        let key = format!("{SERVICES_SCOPE}:{name}");
        let entry = match config.as_service() {
            Some(service) => service.service(&[Value::String(key)])?,
            None => None,
        };
        let Some(entry) = entry.filter(value::is_truthy) else {
            trace!(name, "Service not found in configuration");
            return Ok(false);
        };

        let descriptor = ServiceDescriptor::from_config(name, &entry)?;
        debug!(name, implementation = %descriptor.implementation, "Discovered service in configuration");
        self.services.insert(name.to_string(), descriptor);
        Ok(true)
    }

    /// Snapshot of the declaration for `name`, after discovery
    pub fn describe(&mut self, name: &str) -> Result<Option<ServiceDescriptor>> {
        if !self.has(name)? {
            return Ok(None);
        }
        Ok(self.services.get(name).cloned())
    }

    /// Current state without triggering discovery
    pub fn state(&self, name: &str) -> ServiceState {
        self.services
            .get(name)
            .map_or(ServiceState::Undeclared, ServiceDescriptor::state)
    }

    /// Declared names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve `name`.
    ///
    /// With `raw` set the cached instance is returned. Otherwise a service
    /// is asked for its primary value, falling back to the instance.
    pub fn get(&mut self, name: &str, raw: bool) -> Result<Resolved> {
        let instance = self.instance(name)?;
        if raw {
            return Ok(Resolved::Instance(instance));
        }
        let derived = match instance.as_service() {
            Some(service) => service.service(&[])?,
            None => None,
        };
        Ok(match derived {
            Some(value) => Resolved::Value(value),
            None => Resolved::Instance(instance),
        })
    }

    /// The cached singleton for `name`, built on first use
    pub fn instance(&mut self, name: &str) -> Result<Arc<dyn Component>> {
        if !self.has(name)? {
            return Err(Error::undefined_service(name));
        }
        self.instantiate(name)
    }

    /// Dynamic accessor: resolve `name` and forward `args` to its primary
    /// accessor
    pub fn call_dynamic(&mut self, name: &str, args: &[Value]) -> Result<Resolved> {
        let instance = self.instance(name)?;
        let derived = match instance.as_service() {
            Some(service) => service.service(args)?,
            None => None,
        };
        Ok(match derived {
            Some(value) => Resolved::Value(value),
            None => Resolved::Instance(instance),
        })
    }

    fn instantiate(&mut self, name: &str) -> Result<Arc<dyn Component>> {
        let descriptor = self
            .services
            .get(name)
            .ok_or_else(|| Error::undefined_service(name))?;
        if let Some(instance) = &descriptor.instance {
            trace!(name, "Reusing service instance");
            return Ok(Arc::clone(instance));
        }

        let implementation = descriptor.implementation.clone();
        let options = descriptor.options.clone();
        let mut component = self.factory.build(implementation.clone(), &[])?;
        let initialized = match component.as_service_mut() {
            Some(service) => {
                for (key, option) in options {
                    service.set_option(&key, option);
                }
                service.init()?;
                true
            }
            None => false,
        };

        let instance: Arc<dyn Component> = Arc::from(component);
        if let Some(descriptor) = self.services.get_mut(name) {
            descriptor.instance = Some(Arc::clone(&instance));
            descriptor.initialized = initialized;
        }
        info!(name, implementation = %implementation, initialized, "Service ready");
        Ok(instance)
    }
}

/// Declare a trait of named accessors over [`ServiceContainer`].
///
/// Each method resolves the service of the same-named entry and forwards
/// its arguments, like [`ServiceContainer::call_dynamic`]:
///
/// ```
/// use tao_application::container::{Resolved, ServiceContainer};
/// use tao_application::service_accessors;
///
/// service_accessors! {
///     pub trait AppServices {
///         db => "db",
///         config => "config",
///     }
/// }
///
/// fn lookup(container: &mut ServiceContainer) -> tao_domain::Result<Resolved> {
///     container.db(&[])
/// }
/// ```
#[macro_export]
macro_rules! service_accessors {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            $($method:ident => $service:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                fn $method(
                    &mut self,
                    args: &[$crate::__private::Value],
                ) -> $crate::__private::Result<$crate::container::Resolved>;
            )*
        }

        impl $name for $crate::container::ServiceContainer {
            $(
                fn $method(
                    &mut self,
                    args: &[$crate::__private::Value],
                ) -> $crate::__private::Result<$crate::container::Resolved> {
                    self.call_dynamic($service, args)
                }
            )*
        }
    };
}

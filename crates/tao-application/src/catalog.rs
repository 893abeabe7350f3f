//! Type catalog
//!
//! Runtime table of the implementations that have been loaded so far.
//! Each [`Implementation`] records what reflection would otherwise
//! provide: its kind, parent, implemented interfaces, how to construct it
//! and how to dispatch its static methods.

use std::collections::HashMap;
use std::fmt;

use tao_domain::error::Result;
use tao_domain::name::LogicalName;
use tao_domain::ports::Component;
use tao_domain::value::Value;
use tracing::debug;

/// Zero-argument constructor
pub type DefaultConstructor = fn() -> Result<Box<dyn Component>>;

/// Constructor taking positional arguments
pub type ParameterizedConstructor = fn(&[Value]) -> Result<Box<dyn Component>>;

/// Static method dispatcher: `(method, args) -> result`
pub type StaticDispatch = fn(&str, &[Value]) -> Result<Value>;

/// How an implementation is constructed
#[derive(Clone, Copy)]
pub enum Constructor {
    /// No constructor parameters; any arguments are ignored
    Default(DefaultConstructor),
    /// Arguments are bound positionally
    Parameterized(ParameterizedConstructor),
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default(_) => f.write_str("Default"),
            Self::Parameterized(_) => f.write_str("Parameterized"),
        }
    }
}

/// Whether an implementation is a class or an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplementationKind {
    /// Concrete or abstract class with an optional single parent
    Class,
    /// Interface; never constructible
    Interface,
}

/// One registered implementation
#[derive(Clone)]
pub struct Implementation {
    name: LogicalName,
    kind: ImplementationKind,
    parent: Option<LogicalName>,
    interfaces: Vec<LogicalName>,
    constructor: Option<Constructor>,
    statics: Option<StaticDispatch>,
}

impl Implementation {
    /// Start describing a class
    pub fn class(name: impl Into<LogicalName>) -> Self {
        Self::new(name.into(), ImplementationKind::Class)
    }

    /// Start describing an interface
    pub fn interface(name: impl Into<LogicalName>) -> Self {
        Self::new(name.into(), ImplementationKind::Interface)
    }

    fn new(name: LogicalName, kind: ImplementationKind) -> Self {
        Self {
            name,
            kind,
            parent: None,
            interfaces: Vec::new(),
            constructor: None,
            statics: None,
        }
    }

    /// Set the parent class (or parent interface, for interfaces)
    pub fn extends(mut self, parent: impl Into<LogicalName>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: impl Into<LogicalName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Constructible without arguments
    pub fn with_default(mut self, constructor: DefaultConstructor) -> Self {
        self.constructor = Some(Constructor::Default(constructor));
        self
    }

    /// Constructible with positional arguments
    pub fn with_parameterized(mut self, constructor: ParameterizedConstructor) -> Self {
        self.constructor = Some(Constructor::Parameterized(constructor));
        self
    }

    /// Static method dispatcher, used by name-targeted calls
    pub fn with_statics(mut self, statics: StaticDispatch) -> Self {
        self.statics = Some(statics);
        self
    }

    pub fn name(&self) -> &LogicalName {
        &self.name
    }

    pub fn kind(&self) -> ImplementationKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ImplementationKind::Interface
    }

    pub fn parent(&self) -> Option<&LogicalName> {
        self.parent.as_ref()
    }

    pub fn interfaces(&self) -> &[LogicalName] {
        &self.interfaces
    }

    pub fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    pub fn statics(&self) -> Option<StaticDispatch> {
        self.statics
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("interfaces", &self.interfaces)
            .field("constructor", &self.constructor)
            .field("statics", &self.statics.is_some())
            .finish()
    }
}

/// Implementations known to the runtime, keyed by logical name
#[derive(Debug, Default)]
pub struct TypeCatalog {
    implementations: HashMap<LogicalName, Implementation>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an implementation
    pub fn register(&mut self, implementation: Implementation) {
        debug!(name = %implementation.name, kind = ?implementation.kind, "Registering implementation");
        self.implementations
            .insert(implementation.name.clone(), implementation);
    }

    pub fn get(&self, name: &LogicalName) -> Option<&Implementation> {
        self.implementations.get(name)
    }

    pub fn contains(&self, name: &LogicalName) -> bool {
        self.implementations.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&LogicalName> {
        let mut names: Vec<_> = self.implementations.keys().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }
}

//! Name resolution
//!
//! Read-only questions about logical names answered against the
//! [`TypeCatalog`]: ancestor chains, subtype and interface checks, and
//! constructor handles. The resolver never loads anything; callers ensure
//! the relevant code units are loaded first.

use std::collections::HashSet;

use tao_domain::error::{Error, Result};
use tao_domain::name::LogicalName;
use tao_domain::ports::Component;
use tao_domain::value::{self, Value};

use crate::catalog::{Constructor, TypeCatalog};

/// What a resolver question is asked about
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// A logical name
    Name(&'a LogicalName),
    /// A live instance
    Instance(&'a dyn Component),
    /// An untyped value; only strings are accepted, as names
    Value(&'a Value),
}

impl<'a> From<&'a LogicalName> for Subject<'a> {
    fn from(name: &'a LogicalName) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a dyn Component> for Subject<'a> {
    fn from(instance: &'a dyn Component) -> Self {
        Self::Instance(instance)
    }
}

impl<'a> From<&'a Value> for Subject<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

impl Subject<'_> {
    fn name(&self) -> Result<LogicalName> {
        match self {
            Self::Name(name) => Ok((*name).clone()),
            Self::Instance(instance) => Ok(LogicalName::new(instance.type_name())),
            Self::Value(Value::String(name)) => Ok(LogicalName::new(name)),
            Self::Value(other) => Err(Error::invalid_argument_type(
                "object",
                value::type_name(other),
            )),
        }
    }
}

/// Reflective constructor handle for one implementation
#[derive(Debug, Clone)]
pub struct ConstructorHandle {
    implementation: LogicalName,
    constructor: Constructor,
}

impl ConstructorHandle {
    pub fn implementation(&self) -> &LogicalName {
        &self.implementation
    }

    /// True when the constructor takes positional arguments
    pub fn is_parameterized(&self) -> bool {
        matches!(self.constructor, Constructor::Parameterized(_))
    }

    /// Build an instance; `args` are ignored by zero-argument constructors
    pub fn instantiate(&self, args: &[Value]) -> Result<Box<dyn Component>> {
        match self.constructor {
            Constructor::Default(construct) => construct(),
            Constructor::Parameterized(construct) => construct(args),
        }
    }
}

/// Resolver over a catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> NameResolver<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Self followed by ancestors, most-derived first
    pub fn hierarchy_of<'s>(&self, subject: impl Into<Subject<'s>>) -> Result<Vec<LogicalName>> {
        let name = subject.into().name()?;
        self.chain(&name)
    }

    /// Whether `candidate` is a subtype of `ancestor`.
    ///
    /// Live instances are tested like an `instanceof` check, so an instance
    /// of `ancestor` itself qualifies. Names are tested strictly: a name is
    /// not its own subtype. Interface ancestors are tested through the
    /// implemented-interface closure, class ancestors through the parent
    /// chain.
    pub fn is_subtype_of<'s>(
        &self,
        ancestor: &LogicalName,
        candidate: impl Into<Subject<'s>>,
    ) -> Result<bool> {
        let ancestor_impl = self
            .catalog
            .get(ancestor)
            .ok_or_else(|| not_loaded(ancestor))?;

        let candidate = candidate.into();
        let name = candidate.name()?;
        if let Subject::Instance(_) = candidate {
            if &name == ancestor {
                return Ok(true);
            }
            if !self.catalog.contains(&name) {
                return Ok(false);
            }
        } else if !self.catalog.contains(&name) {
            return Err(not_loaded(&name));
        } else if &name == ancestor {
            return Ok(false);
        }

        if ancestor_impl.is_interface() {
            Ok(self.interfaces_of(&name)?.contains(ancestor))
        } else {
            Ok(self.chain(&name)?.iter().skip(1).any(|n| n == ancestor))
        }
    }

    /// Constructor handle for a name or a live instance's implementation
    pub fn constructor_handle_for<'s>(
        &self,
        subject: impl Into<Subject<'s>>,
    ) -> Result<ConstructorHandle> {
        let name = subject.into().name()?;
        let implementation = self.catalog.get(&name).ok_or_else(|| not_loaded(&name))?;
        if implementation.is_interface() {
            return Err(Error::resolution(format!(
                "Cannot instantiate interface '{name}'"
            )));
        }
        let constructor = implementation.constructor().ok_or_else(|| {
            Error::resolution(format!("Implementation '{name}' is not constructible"))
        })?;
        Ok(ConstructorHandle {
            implementation: name,
            constructor,
        })
    }

    fn chain(&self, name: &LogicalName) -> Result<Vec<LogicalName>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(name.clone());
        while let Some(name) = current {
            if !seen.insert(name.clone()) {
                return Err(Error::resolution(format!(
                    "Inheritance cycle through '{name}'"
                )));
            }
            let implementation = self.catalog.get(&name).ok_or_else(|| not_loaded(&name))?;
            current = implementation.parent().cloned();
            chain.push(name);
        }
        Ok(chain)
    }

    /// Every interface reachable from `name`: declared on it or any
    /// ancestor, plus their parent interfaces. An interface name includes
    /// its own parent interfaces.
    fn interfaces_of(&self, name: &LogicalName) -> Result<HashSet<LogicalName>> {
        let mut found = HashSet::new();
        let mut pending = Vec::new();
        for class in self.chain(name)? {
            if let Some(implementation) = self.catalog.get(&class) {
                if implementation.is_interface() && &class != name {
                    pending.push(class.clone());
                }
                pending.extend(implementation.interfaces().iter().cloned());
            }
        }
        while let Some(interface) = pending.pop() {
            if !found.insert(interface.clone()) {
                continue;
            }
            if let Some(parent) = self.catalog.get(&interface).and_then(|i| i.parent()) {
                pending.push(parent.clone());
            }
        }
        Ok(found)
    }
}

fn not_loaded(name: &LogicalName) -> Error {
    Error::resolution(format!("Implementation '{name}' is not loaded"))
}

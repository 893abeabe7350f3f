//! Deferred invocations
//!
//! A [`Call`] captures a target, a method and leading arguments, and runs
//! later with extra arguments appended. Results can be memoised per
//! argument list, and a call on a named target round-trips through the
//! pipe-delimited text form:
//!
//! ```text
//! Core.Call|Math::Ops|add|2+3|
//!  tag      target    method args
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tao_domain::constants::{CALL_ARG_SEPARATOR, CALL_FIELD_SEPARATOR, CALL_TAG};
use tao_domain::error::{Error, Result};
use tao_domain::name::{ImplementationId, LogicalName};
use tao_domain::ports::{Component, Invoke};
use tao_domain::value::{self, Value};
use tracing::trace;

use crate::catalog::StaticDispatch;
use crate::factory::ObjectFactory;

/// What a call is made on, before binding
#[derive(Debug, Clone)]
pub enum Target {
    /// Static methods of a named implementation
    Name(LogicalName),
    /// Methods of a live component
    Instance(Arc<dyn Component>),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Self::Name(LogicalName::new(name))
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Self::Name(LogicalName::new(name))
    }
}

impl From<LogicalName> for Target {
    fn from(name: LogicalName) -> Self {
        Self::Name(name)
    }
}

impl From<Arc<dyn Component>> for Target {
    fn from(instance: Arc<dyn Component>) -> Self {
        Self::Instance(instance)
    }
}

/// Target after binding
#[derive(Clone)]
pub enum BoundTarget {
    /// Named implementation; `dispatch` is absent when it was not loaded
    Static {
        implementation: ImplementationId,
        dispatch: Option<StaticDispatch>,
    },
    Instance(Arc<dyn Component>),
}

impl fmt::Debug for BoundTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static {
                implementation,
                dispatch,
            } => f
                .debug_struct("Static")
                .field("implementation", implementation)
                .field("dispatch", &dispatch.is_some())
                .finish(),
            Self::Instance(instance) => f.debug_tuple("Instance").field(instance).finish(),
        }
    }
}

/// A bound, possibly memoising, deferred invocation
#[derive(Debug, Clone)]
pub struct Call {
    target: BoundTarget,
    method: String,
    args: Vec<Value>,
    cache_enabled: bool,
    cache: HashMap<String, Value>,
}

impl Call {
    /// Bind `target` now.
    ///
    /// A named target maps to its implementation immediately, loading its
    /// code unit first when `autoload` is set. Overrides are not applied.
    /// The static dispatcher is captured here; a call bound before its unit
    /// was loaded stays unresolved until [`Call::relink`].
    pub fn bind(
        factory: &mut ObjectFactory,
        target: impl Into<Target>,
        method: impl Into<String>,
        args: Vec<Value>,
        autoload: bool,
    ) -> Self {
        let target = match target.into() {
            Target::Name(name) => {
                if autoload {
                    factory.load(&name);
                }
                BoundTarget::Static {
                    implementation: name.implementation(),
                    dispatch: factory.catalog().get(&name).and_then(|i| i.statics()),
                }
            }
            Target::Instance(instance) => BoundTarget::Instance(instance),
        };
        Self {
            target,
            method: method.into(),
            args,
            cache_enabled: false,
            cache: HashMap::new(),
        }
    }

    /// Capture the static dispatcher of a named target that was not loaded
    /// at bind time. Returns whether the target is now callable.
    pub fn relink(&mut self, factory: &ObjectFactory) -> bool {
        match &mut self.target {
            BoundTarget::Static {
                implementation,
                dispatch,
            } => {
                if dispatch.is_none() {
                    *dispatch = factory
                        .catalog()
                        .get(implementation.logical())
                        .and_then(|i| i.statics());
                }
                dispatch.is_some()
            }
            BoundTarget::Instance(_) => true,
        }
    }

    pub fn target(&self) -> &BoundTarget {
        &self.target
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Append to the stored leading arguments
    pub fn update_args(&mut self, extra: impl IntoIterator<Item = Value>) -> &mut Self {
        self.args.extend(extra);
        self
    }

    /// Turn result memoisation on or off. Entries already cached are kept.
    pub fn with_cache(&mut self, enabled: bool) -> &mut Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn is_cached(&self) -> bool {
        self.cache_enabled
    }

    /// Run the call with `extra` appended to the stored arguments
    pub fn invoke(&mut self, extra: &[Value]) -> Result<Value> {
        let args: Vec<Value> = self.args.iter().chain(extra).cloned().collect();
        if !self.cache_enabled {
            return self.dispatch(&args);
        }

        let key = serde_json::to_string(&args)?;
        if let Some(hit) = self.cache.get(&key) {
            trace!(method = %self.method, key = %key, "Call cache hit");
            return Ok(hit.clone());
        }
        let result = self.dispatch(&args)?;
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    fn dispatch(&self, args: &[Value]) -> Result<Value> {
        match &self.target {
            BoundTarget::Static {
                dispatch: Some(dispatch),
                ..
            } => dispatch(&self.method, args),
            BoundTarget::Static {
                implementation,
                dispatch: None,
            } => Err(Error::resolution(format!(
                "Implementation '{implementation}' has no static methods loaded"
            ))),
            BoundTarget::Instance(instance) => instance.call(&self.method, args),
        }
    }

    /// Text form: `Core.Call|<target>|<method>|<arg>+<arg>|`
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Decode the text form and bind it with loading enabled.
    ///
    /// `Ok(None)` when `text` does not start with `Core.Call|`; a tagged
    /// text missing its target or method is a resolution error.
    pub fn from_text(factory: &mut ObjectFactory, text: &str) -> Result<Option<Self>> {
        let Some(rest) = text
            .strip_prefix(CALL_TAG)
            .and_then(|rest| rest.strip_prefix(CALL_FIELD_SEPARATOR))
        else {
            return Ok(None);
        };

        let mut fields = rest.split(CALL_FIELD_SEPARATOR);
        let target = fields
            .next()
            .filter(|field| !field.is_empty())
            .ok_or_else(|| malformed(text, "missing target"))?;
        let method = fields
            .next()
            .filter(|field| !field.is_empty())
            .ok_or_else(|| malformed(text, "missing method"))?;
        let args = match fields.next() {
            Some(field) if !field.is_empty() => field
                .split(CALL_ARG_SEPARATOR)
                .map(value::parse_scalar)
                .collect(),
            _ => Vec::new(),
        };

        Ok(Some(Self::bind(factory, target, method, args, true)))
    }
}

fn malformed(text: &str, reason: &str) -> Error {
    Error::resolution(format!("Malformed call text '{text}': {reason}"))
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            BoundTarget::Static { implementation, .. } => implementation.to_string(),
            BoundTarget::Instance(instance) => {
                LogicalName::new(instance.type_name()).implementation().to_string()
            }
        };
        let args: Vec<String> = self.args.iter().map(value::scalar_text).collect();
        let arg_separator = CALL_ARG_SEPARATOR.to_string();
        write!(
            f,
            "{CALL_TAG}{sep}{target}{sep}{method}{sep}{args}{sep}",
            sep = CALL_FIELD_SEPARATOR,
            method = self.method,
            args = args.join(arg_separator.as_str()),
        )
    }
}

impl Invoke for Call {
    fn invoke(&mut self, args: &[Value]) -> Result<Value> {
        Call::invoke(self, args)
    }
}

//! Constructible component contract

use std::fmt;

use downcast_rs::{DowncastSync, impl_downcast};

use crate::error::{Error, Result};
use crate::ports::service::Service;
use crate::value::Value;

/// Anything the object factory can construct.
///
/// Components report the logical name they were registered under, so the
/// runtime can answer hierarchy questions about live instances. The
/// `Service` capability is opt-in through [`Component::as_service`].
///
/// # Example
///
/// ```
/// use tao_domain::ports::Component;
/// use tao_domain::value::Value;
/// use tao_domain::error::Result;
///
/// struct Circle;
///
/// impl Component for Circle {
///     fn type_name(&self) -> &str {
///         "Circle"
///     }
///
///     fn call(&self, method: &str, _args: &[Value]) -> Result<Value> {
///         match method {
///             "sides" => Ok(Value::from(0)),
///             other => Err(tao_domain::error::Error::missing_method(other)),
///         }
///     }
/// }
///
/// let circle: Box<dyn Component> = Box::new(Circle);
/// assert!(circle.is::<Circle>());
/// ```
pub trait Component: DowncastSync {
    /// Logical name of the implementation this instance was built from
    fn type_name(&self) -> &str;

    /// Service capability, if exposed
    fn as_service(&self) -> Option<&dyn Service> {
        None
    }

    /// Mutable service capability, used while applying options and `init`
    fn as_service_mut(&mut self) -> Option<&mut dyn Service> {
        None
    }

    /// Instance method dispatch
    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        let _ = args;
        Err(Error::missing_method(format!("{}::{method}", self.type_name())))
    }
}

impl_downcast!(sync Component);

impl fmt::Debug for dyn Component + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_name", &self.type_name())
            .field("service", &self.as_service().is_some())
            .finish()
    }
}

//! Managed service contract

use crate::error::Result;
use crate::value::{Options, Value};

/// Capability every container-managed singleton exposes.
///
/// The container applies declared options through [`Service::set_option`],
/// then calls [`Service::init`] exactly once, then serves the instance
/// (or the value of [`Service::service`]) from its cache.
pub trait Service: Send + Sync {
    /// Option storage
    fn options(&self) -> &Options;

    /// Mutable option storage
    fn options_mut(&mut self) -> &mut Options;

    /// Set a single option
    fn set_option(&mut self, key: &str, value: Value) {
        self.options_mut().insert(key.to_string(), value);
    }

    /// Set a boolean flag option to `true`
    fn enable_option(&mut self, key: &str) {
        self.set_option(key, Value::Bool(true));
    }

    /// Read a single option
    fn get_option(&self, key: &str) -> Option<&Value> {
        self.options().get(key)
    }

    /// Read a single option, falling back to `default`
    fn option_or(&self, key: &str, default: Value) -> Value {
        self.get_option(key).cloned().unwrap_or(default)
    }

    /// Deferred setup, run once after all declared options are applied.
    ///
    /// Implementations must tolerate being invoked again.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Primary access point.
    ///
    /// `Ok(None)` means "the service itself"; specialisations return a
    /// derived value for the given arguments.
    fn service(&self, args: &[Value]) -> Result<Option<Value>> {
        let _ = args;
        Ok(None)
    }
}

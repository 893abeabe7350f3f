//! Deferred invocation contract

use crate::error::Result;
use crate::value::Value;

/// A reified call that can be executed later with extra arguments
pub trait Invoke {
    /// Execute with `args` appended to any pre-bound arguments
    fn invoke(&mut self, args: &[Value]) -> Result<Value>;
}

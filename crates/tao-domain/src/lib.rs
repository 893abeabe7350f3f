//! # TAO Domain
//!
//! Core types shared by every layer of the TAO runtime:
//!
//! - [`name`] - logical names and implementation identifiers
//! - [`value`] - dynamic values carried by options and calls
//! - [`ports`] - the `Component`, `Service` and `Invoke` contracts
//! - [`error`] - the error taxonomy and `Result` alias
//! - [`constants`] - separators, tags and well-known names
//!
//! This crate performs no I/O.

pub mod constants;
pub mod error;
pub mod name;
pub mod ports;
pub mod value;

pub use error::{Error, ObjectAccessError, Result};
pub use name::{ImplementationId, LogicalName};
pub use ports::{Component, Invoke, Service};
pub use value::{Options, Value};

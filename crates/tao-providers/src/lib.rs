//! # TAO Runtime Core - Built-in Services
//!
//! Implementations linked into the runtime through the `CODE_UNITS`
//! distributed slice. Each one registers under its logical name and is
//! loaded the first time that name is requested.
//!
//! | Logical name | Unit path | Implementation |
//! |--------------|-----------|----------------|
//! | `Tao.Service` | `Tao/Service` | [`BasicService`] |
//! | `Tao.Service.Config` | `Tao/Service/Config` | [`ConfigService`] |
//!
//! Binaries must reference this crate (`extern crate tao_providers;`) so
//! the linker keeps the registrations.

pub use tao_domain::error::{Error, Result};

/// Provider-specific constants
pub mod constants;

/// Service implementations
pub mod service;

pub use service::{BasicService, ConfigService};

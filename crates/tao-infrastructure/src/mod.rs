//! # Infrastructure Layer
//!
//! Configuration, logging and bootstrap for the TAO runtime core.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-backed `tao.toml` + `TAO_*` loading, `TAO_PATH` rules |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`bootstrap`] | Builds the loader, factory and service container |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

// Keeps the built-in service registrations linked.
extern crate tao_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{Runtime, init_runtime};
pub use config::{ConfigLoader, RuntimeConfig};
pub use error_ext::ErrorContext;
pub use logging::init_logging;

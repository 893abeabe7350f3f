//! # TAO Runtime Core
//!
//! Turns logical, dot-separated implementation names into live objects:
//! code units are loaded on first use, overrides swap implementations for
//! subtypes, and named services are built once and shared.
//!
//! ## Example
//!
//! ```ignore
//! use tao::infrastructure::{ConfigLoader, init_runtime};
//!
//! let config = ConfigLoader::new().load()?;
//! let mut runtime = init_runtime(config)?;
//! let mailer = runtime.container_mut().instance("mailer")?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - names, dynamic values, component contracts and errors
//! - `application` - catalog, loader, factory, container and calls
//! - `providers` - built-in services (`Tao.Service`, `Tao.Service.Config`)
//! - `infrastructure` - configuration, logging and bootstrap
//! - [`cli`] - the `tao` command line

/// Domain layer - names, values, contracts and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use tao_domain::*;
}

/// Application layer - resolution, loading, construction and services
pub mod application {
    pub use tao_application::*;
}

/// Built-in services
pub mod providers {
    pub use tao_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
pub mod infrastructure {
    pub use tao_infrastructure::*;
}

pub mod cli;

pub use domain::{Error, Result, Value};
pub use application::{Call, ObjectFactory, ServiceContainer};

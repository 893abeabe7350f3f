//! Application Layer - TAO Runtime Core
//!
//! Turns logical names into live components and manages named singletons.
//!
//! ## Architecture
//!
//! The application layer:
//! - Keeps the runtime type catalog filled by code units on demand
//! - Resolves names through the override table with subtype checks
//! - Constructs components inside the configured working directory
//! - Owns the service container and deferred invocations
//! - Performs no configuration parsing; that lives in infrastructure
//!
//! ## Building blocks
//!
//! - [`registry`]: the `CODE_UNITS` distributed slice
//! - [`catalog`]: implementations loaded so far
//! - [`loader`] and [`search_paths`]: deferred code loading
//! - [`resolver`]: hierarchy, subtype and constructor questions
//! - [`replacement`]: implementation overrides
//! - [`directory`]: scoped working-directory switches
//! - [`factory`]: `ObjectFactory`, the composition of the above
//! - [`container`]: `ServiceContainer`
//! - [`call`]: `Call`, the deferred invocation
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `tao-domain`: names, values, contracts and errors
//! - `linkme` for code unit registration, `tracing` for diagnostics

pub mod call;
pub mod catalog;
pub mod container;
pub mod directory;
pub mod factory;
pub mod loader;
pub mod registry;
pub mod replacement;
pub mod resolver;
pub mod search_paths;

pub use call::{BoundTarget, Call, Target};
pub use catalog::{Constructor, Implementation, ImplementationKind, TypeCatalog};
pub use container::{Resolved, ServiceContainer, ServiceDescriptor, ServiceState};
pub use directory::{DirectoryContext, DirectoryGuard};
pub use factory::ObjectFactory;
pub use loader::Loader;
pub use registry::{CODE_UNITS, CodeUnitEntry};
pub use replacement::ReplacementRegistry;
pub use resolver::{ConstructorHandle, NameResolver, Subject};
pub use search_paths::{SearchPaths, SearchRule};

#[doc(hidden)]
pub mod __private {
    pub use tao_domain::{Result, Value};
}

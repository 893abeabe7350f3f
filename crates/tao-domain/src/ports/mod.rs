//! Domain Port Interfaces
//!
//! Contracts implemented by everything the runtime constructs or invokes.
//!
//! ## Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`Component`] | Any constructible implementation, downcastable to its concrete type |
//! | [`Service`] | Option-configured singleton with a one-time `init` |
//! | [`Invoke`] | Reified call target that can be invoked later |

pub mod component;
pub mod invoke;
pub mod service;

pub use component::Component;
pub use invoke::Invoke;
pub use service::Service;

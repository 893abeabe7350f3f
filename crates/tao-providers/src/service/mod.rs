//! Service implementations
//!
//! Each submodule registers its code unit in `CODE_UNITS`.

pub mod basic;
pub mod config;

pub use basic::BasicService;
pub use config::ConfigService;

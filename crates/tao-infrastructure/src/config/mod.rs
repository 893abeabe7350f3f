//! Runtime configuration
//!
//! Types, the figment-based loader and `TAO_PATH` parsing.

pub mod loader;
pub mod search_paths;
pub mod types;

pub use loader::ConfigLoader;
pub use search_paths::{parse_search_paths, parse_search_rule, search_paths_from_env};
pub use types::{LoggingConfig, RuntimeConfig, RuntimeSection, ServiceSpec};

//! Constants for the built-in services

/// Configuration directories searched by the config service, relative to
/// the directory it was constructed in
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["../app/config", "../config"];

/// Root configuration file read by `init`
pub const DEFAULT_ROOT_CONFIG: &str = "../config/site.toml";

/// Scope used when a lookup name carries none
pub const DEFAULT_SCOPE: &str = "site";

/// Separates scope from path in `scope:path`
pub const SCOPE_SEPARATOR: char = ':';

/// Separates nested keys in a path
pub const KEY_SEPARATOR: char = '/';

/// Extension of scope files
pub const CONFIG_EXTENSION: &str = "toml";

/// Option names understood by the config service
pub const OPTION_PATHS: &str = "paths";
pub const OPTION_ROOT_CONFIG: &str = "root_config";
pub const OPTION_ENV: &str = "env";

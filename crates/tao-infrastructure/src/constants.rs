//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Runtime-wide names and separators are defined in `tao_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tao.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "tao";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "TAO";

/// Separator for nested keys in environment variables
/// (`TAO_RUNTIME__BASE_DIR` → `runtime.base_dir`)
pub const CONFIG_ENV_NESTING: &str = "__";

// ============================================================================
// SEARCH PATH CONSTANTS
// ============================================================================

/// Environment variable holding extra code unit search rules
pub const PATH_VARIABLE: &str = "TAO_PATH";

/// Separator between rules in `TAO_PATH`
pub const PATH_RULE_SEPARATOR: char = ';';

/// Shape of a single `prefix:path` rule
pub const PATH_RULE_PATTERN: &str = r"^([-A-Za-z0-9*][A-Za-z0-9_.]*):(.+)$";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_VARIABLE: &str = "TAO_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem used when the configured log file has none
pub const DEFAULT_LOG_FILE_STEM: &str = "tao";

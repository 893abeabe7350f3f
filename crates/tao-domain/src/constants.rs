//! Domain layer constants
//!
//! Infrastructure-specific constants live in `tao_infrastructure::constants`.

// ============================================================================
// NAME CONSTANTS
// ============================================================================

/// Separator between logical name segments
pub const NAME_SEPARATOR: char = '.';

/// Separator between implementation identifier segments
pub const IMPLEMENTATION_SEPARATOR: &str = "::";

/// Separator between unit path segments
pub const UNIT_PATH_SEPARATOR: char = '/';

/// Search rule prefix matching every logical name
pub const WILDCARD_PREFIX: &str = "*";

/// Upper bound on override hops followed by a single resolution
pub const MAX_OVERRIDE_HOPS: usize = 64;

// ============================================================================
// SERVICE CONSTANTS
// ============================================================================

/// Name of the configuration service every container declares
pub const CONFIG_SERVICE: &str = "config";

/// Logical name of the base service implementation
pub const BASE_SERVICE_CLASS: &str = "Tao.Service";

/// Logical name of the configuration service implementation
pub const CONFIG_SERVICE_CLASS: &str = "Tao.Service.Config";

/// Configuration scope holding undeclared service descriptors
pub const SERVICES_SCOPE: &str = "services";

// ============================================================================
// CALL CONSTANTS
// ============================================================================

/// Tag opening every encoded call description
pub const CALL_TAG: &str = "Core.Call";

/// Separator between encoded call fields
pub const CALL_FIELD_SEPARATOR: char = '|';

/// Separator between encoded call arguments
pub const CALL_ARG_SEPARATOR: char = '+';

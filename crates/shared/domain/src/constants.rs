//! API-wide string constants.

/// `OpenAPI` tag for infrastructure endpoints (health).
pub const SYSTEM_TAG: &str = "system";
/// `OpenAPI` tag for the conversion endpoints.
pub const CONVERT_TAG: &str = "convert";

/// Title of the published `OpenAPI` document.
pub const API_TITLE: &str = "NCSS APIs";
/// Version of the published `OpenAPI` document.
pub const API_VERSION: &str = "1.0";

/// Custom unit registered on top of the built-in unit definitions.
pub const DEFAULT_CUSTOM_UNIT: &str = "tims = 1.5 * m = tims";

//! Common types used throughout notion-loader
//!
//! Shared type aliases and constants used across multiple modules.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// API Constants
// ============================================================================

/// Default Notion API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// Notion API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

/// Environment variable holding the integration token
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "NOTION_API_BASE_URL";

/// Name of the JSON kind of a value, for diagnostics
pub fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

//! Schema types

use crate::coerce::CoercionPolicy;
use crate::types::JsonValue;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Declared type of a database column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Status,
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula,
    Relation,
    Rollup,
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    /// Any type tag not listed above
    Other(String),
}

impl ColumnType {
    /// Parse the API's `type` tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "title" => ColumnType::Title,
            "rich_text" => ColumnType::RichText,
            "number" => ColumnType::Number,
            "select" => ColumnType::Select,
            "multi_select" => ColumnType::MultiSelect,
            "status" => ColumnType::Status,
            "date" => ColumnType::Date,
            "people" => ColumnType::People,
            "files" => ColumnType::Files,
            "checkbox" => ColumnType::Checkbox,
            "url" => ColumnType::Url,
            "email" => ColumnType::Email,
            "phone_number" => ColumnType::PhoneNumber,
            "formula" => ColumnType::Formula,
            "relation" => ColumnType::Relation,
            "rollup" => ColumnType::Rollup,
            "created_time" => ColumnType::CreatedTime,
            "created_by" => ColumnType::CreatedBy,
            "last_edited_time" => ColumnType::LastEditedTime,
            "last_edited_by" => ColumnType::LastEditedBy,
            other => ColumnType::Other(other.to_string()),
        }
    }

    /// The API's `type` tag
    pub fn tag(&self) -> &str {
        match self {
            ColumnType::Title => "title",
            ColumnType::RichText => "rich_text",
            ColumnType::Number => "number",
            ColumnType::Select => "select",
            ColumnType::MultiSelect => "multi_select",
            ColumnType::Status => "status",
            ColumnType::Date => "date",
            ColumnType::People => "people",
            ColumnType::Files => "files",
            ColumnType::Checkbox => "checkbox",
            ColumnType::Url => "url",
            ColumnType::Email => "email",
            ColumnType::PhoneNumber => "phone_number",
            ColumnType::Formula => "formula",
            ColumnType::Relation => "relation",
            ColumnType::Rollup => "rollup",
            ColumnType::CreatedTime => "created_time",
            ColumnType::CreatedBy => "created_by",
            ColumnType::LastEditedTime => "last_edited_time",
            ColumnType::LastEditedBy => "last_edited_by",
            ColumnType::Other(tag) => tag,
        }
    }

    /// Human-readable name shown by `inspect`
    pub fn display_name(&self) -> &str {
        match self {
            ColumnType::Title => "Title",
            ColumnType::RichText => "Rich Text",
            ColumnType::Number => "Number",
            ColumnType::Select => "Select",
            ColumnType::MultiSelect => "Multi Select",
            ColumnType::Status => "Status",
            ColumnType::Date => "Date",
            ColumnType::People => "People",
            ColumnType::Files => "Files",
            ColumnType::Checkbox => "Checkbox",
            ColumnType::Url => "URL",
            ColumnType::Email => "Email",
            ColumnType::PhoneNumber => "Phone Number",
            ColumnType::Formula => "Formula",
            ColumnType::Relation => "Relation",
            ColumnType::Rollup => "Rollup",
            ColumnType::CreatedTime => "Created Time",
            ColumnType::CreatedBy => "Created By",
            ColumnType::LastEditedTime => "Last Edited Time",
            ColumnType::LastEditedBy => "Last Edited By",
            ColumnType::Other(tag) => tag,
        }
    }

    /// Whether the coercer can produce a value for this column
    pub fn is_writable(&self, policy: CoercionPolicy) -> bool {
        match self {
            ColumnType::Title | ColumnType::RichText | ColumnType::Number => true,
            ColumnType::Select
            | ColumnType::MultiSelect
            | ColumnType::Date
            | ColumnType::Checkbox
            | ColumnType::Url
            | ColumnType::Email
            | ColumnType::PhoneNumber => policy == CoercionPolicy::Extended,
            _ => false,
        }
    }

    /// Example input value for this column, if it is writable
    pub fn sample_value(&self, policy: CoercionPolicy) -> Option<JsonValue> {
        if !self.is_writable(policy) {
            return None;
        }

        let sample = match self {
            ColumnType::Title => json!("Sample Title"),
            ColumnType::RichText => json!("Sample text"),
            ColumnType::Number => json!(42),
            ColumnType::Select => json!("Option Name"),
            ColumnType::MultiSelect => json!(["Option 1", "Option 2"]),
            ColumnType::Date => json!("2023-01-01"),
            ColumnType::Checkbox => json!(true),
            ColumnType::Url => json!("https://example.com"),
            ColumnType::Email => json!("example@example.com"),
            ColumnType::PhoneNumber => json!("+1 234 567 8900"),
            _ => return None,
        };
        Some(sample)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Column name to declared type
///
/// Names are case-sensitive. Ordered so output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: BTreeMap<String, ColumnType>,
}

impl ColumnSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.insert(name.into(), column_type);
        self
    }

    /// Look up a column's type
    pub fn get(&self, name: &str) -> Option<&ColumnType> {
        self.columns.get(name)
    }

    /// Whether the column exists
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Iterate columns in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnType)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Column names in order
    pub fn names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, ColumnType)> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = (String, ColumnType)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |schema, (name, column_type)| {
                schema.with_column(name, column_type)
            })
    }
}

// ============================================================================
// API response shapes
// ============================================================================

/// Retrieve-database response (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseResponse {
    pub id: String,
    #[serde(default)]
    pub title: Vec<TitleRun>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyConfig>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One run of the database title
#[derive(Debug, Clone, Deserialize)]
pub struct TitleRun {
    #[serde(default)]
    pub plain_text: Option<String>,
    #[serde(default)]
    pub text: Option<TitleText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleText {
    pub content: String,
}

/// A column definition; only the type tag matters here
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyConfig {
    #[serde(rename = "type")]
    pub kind: String,
}

/// A fetched database: title plus column schema
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseInfo {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub schema: ColumnSchema,
}

impl From<DatabaseResponse> for DatabaseInfo {
    fn from(response: DatabaseResponse) -> Self {
        let title: String = response
            .title
            .iter()
            .filter_map(|run| {
                run.plain_text
                    .clone()
                    .or_else(|| run.text.as_ref().map(|t| t.content.clone()))
            })
            .collect();

        let schema = response
            .properties
            .into_iter()
            .map(|(name, config)| (name, ColumnType::from_tag(&config.kind)))
            .collect();

        Self {
            id: response.id,
            title: if title.is_empty() {
                "Untitled".to_string()
            } else {
                title
            },
            url: response.url,
            schema,
        }
    }
}

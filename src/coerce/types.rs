//! Coercion types

use crate::schema::ColumnType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Longest content the API accepts in a single text run
pub const MAX_TEXT_RUN_CHARS: usize = 2000;

/// Most text runs the API accepts in one title or rich text value
pub const MAX_TEXT_RUNS: usize = 100;

/// Which column kinds the coercer writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    /// Title, rich text and number only
    #[default]
    Strict,
    /// Also select, multi-select, date, checkbox, URL, email and phone
    Extended,
}

/// One text run of a title or rich text value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichTextRun {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub content: String,
}

impl RichTextRun {
    /// A single plain text run
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: TextContent {
                content: content.into(),
            },
        }
    }

    /// Split text into runs no longer than [`MAX_TEXT_RUN_CHARS`]
    ///
    /// An empty string still yields one empty run.
    pub fn runs_from(text: &str) -> Vec<Self> {
        if text.chars().count() <= MAX_TEXT_RUN_CHARS {
            return vec![Self::plain(text)];
        }

        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(MAX_TEXT_RUN_CHARS)
            .map(|chunk| Self::plain(chunk.iter().collect::<String>()))
            .collect()
    }
}

/// A select option referenced by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub name: String,
}

impl SelectOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Date or date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateValue {
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A typed column value, serialized in the API's property format
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuredValue {
    Title(Vec<RichTextRun>),
    RichText(Vec<RichTextRun>),
    Number(serde_json::Number),
    Select(SelectOption),
    MultiSelect(Vec<SelectOption>),
    Date(DateValue),
    Checkbox(bool),
    Url(String),
    Email(String),
    PhoneNumber(String),
}

impl StructuredValue {
    /// Title value from text
    pub fn title(text: &str) -> Self {
        StructuredValue::Title(RichTextRun::runs_from(text))
    }

    /// Rich text value from text
    pub fn rich_text(text: &str) -> Self {
        StructuredValue::RichText(RichTextRun::runs_from(text))
    }

    /// Column kind this value belongs to
    pub fn column_type(&self) -> ColumnType {
        match self {
            StructuredValue::Title(_) => ColumnType::Title,
            StructuredValue::RichText(_) => ColumnType::RichText,
            StructuredValue::Number(_) => ColumnType::Number,
            StructuredValue::Select(_) => ColumnType::Select,
            StructuredValue::MultiSelect(_) => ColumnType::MultiSelect,
            StructuredValue::Date(_) => ColumnType::Date,
            StructuredValue::Checkbox(_) => ColumnType::Checkbox,
            StructuredValue::Url(_) => ColumnType::Url,
            StructuredValue::Email(_) => ColumnType::Email,
            StructuredValue::PhoneNumber(_) => ColumnType::PhoneNumber,
        }
    }
}

/// Column name to typed value, ready to submit
///
/// Every key is a column of the schema it was coerced against.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoercedRecord {
    properties: BTreeMap<String, StructuredValue>,
}

impl CoercedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, column: impl Into<String>, value: StructuredValue) {
        self.properties.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&StructuredValue> {
        self.properties.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Why a field produced no value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The database has no column with this name
    UnknownColumn,
    /// The JSON kind does not fit the column type
    TypeMismatch {
        expected: ColumnType,
        found: &'static str,
    },
    /// The JSON kind fits but the content is not acceptable
    InvalidValue {
        column_type: ColumnType,
        message: String,
    },
    /// The column type is not written under the active policy
    Unsupported(ColumnType),
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::UnknownColumn => write!(f, "no such column in the database"),
            DropReason::TypeMismatch { expected, found } => {
                write!(f, "expected a value for a {expected} column, found {found}")
            }
            DropReason::InvalidValue {
                column_type,
                message,
            } => write!(f, "invalid {column_type} value: {message}"),
            DropReason::Unsupported(column_type) => {
                write!(f, "{column_type} columns are not supported")
            }
        }
    }
}

/// An input field that was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedField {
    pub name: String,
    pub reason: DropReason,
}

impl DroppedField {
    pub fn new(name: impl Into<String>, reason: DropReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }
}

/// Result of coercing one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coercion {
    pub record: CoercedRecord,
    pub dropped: Vec<DroppedField>,
}

impl Coercion {
    /// Number of fields dropped for any reason
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

//! Coercion of raw records against a column schema

use super::types::{
    Coercion, CoercionPolicy, DateValue, DropReason, DroppedField, SelectOption, StructuredValue,
    MAX_TEXT_RUNS, MAX_TEXT_RUN_CHARS,
};
use crate::error::{Error, Result};
use crate::loader::{RawRecord, PROPERTIES_KEY};
use crate::schema::{ColumnSchema, ColumnType};
use crate::types::{json_kind, JsonValue};
use chrono::{DateTime, NaiveDate};
use tracing::debug;

/// Coerce one record against the schema
///
/// Fails only when the record has no `properties` object; in that case no
/// partial output is produced. Every other problem is a dropped field.
pub fn coerce(raw: &RawRecord, schema: &ColumnSchema, policy: CoercionPolicy) -> Result<Coercion> {
    let fields = raw.properties().ok_or_else(|| {
        Error::malformed(format!("expected key '{PROPERTIES_KEY}' holding an object"))
    })?;

    let mut coercion = Coercion::default();

    for (name, value) in fields {
        let Some(column_type) = schema.get(name) else {
            coercion
                .dropped
                .push(DroppedField::new(name, DropReason::UnknownColumn));
            continue;
        };

        match coerce_value(column_type, value, policy) {
            Ok(structured) => coercion.record.insert(name, structured),
            Err(reason) => {
                debug!("Dropping field '{}': {}", name, reason);
                coercion.dropped.push(DroppedField::new(name, reason));
            }
        }
    }

    Ok(coercion)
}

fn coerce_value(
    column_type: &ColumnType,
    value: &JsonValue,
    policy: CoercionPolicy,
) -> std::result::Result<StructuredValue, DropReason> {
    let mismatch = || DropReason::TypeMismatch {
        expected: column_type.clone(),
        found: json_kind(value),
    };

    match column_type {
        ColumnType::Title | ColumnType::RichText => {
            let text = value.as_str().ok_or_else(mismatch)?;
            let chars = text.chars().count();
            if chars > MAX_TEXT_RUN_CHARS * MAX_TEXT_RUNS {
                return Err(DropReason::InvalidValue {
                    column_type: column_type.clone(),
                    message: format!(
                        "text of {chars} characters exceeds the limit of {}",
                        MAX_TEXT_RUN_CHARS * MAX_TEXT_RUNS
                    ),
                });
            }
            Ok(if *column_type == ColumnType::Title {
                StructuredValue::title(text)
            } else {
                StructuredValue::rich_text(text)
            })
        }
        ColumnType::Number => match value {
            JsonValue::Number(n) => Ok(StructuredValue::Number(n.clone())),
            _ => Err(mismatch()),
        },
        _ if !column_type.is_writable(policy) => Err(DropReason::Unsupported(column_type.clone())),
        ColumnType::Select => {
            let name = value.as_str().ok_or_else(mismatch)?.trim();
            if name.is_empty() {
                return Err(DropReason::InvalidValue {
                    column_type: column_type.clone(),
                    message: "select option name is empty".to_string(),
                });
            }
            Ok(StructuredValue::Select(SelectOption::new(name)))
        }
        ColumnType::MultiSelect => coerce_multi_select(value).ok_or_else(mismatch),
        ColumnType::Date => coerce_date(column_type, value),
        ColumnType::Checkbox => value
            .as_bool()
            .map(StructuredValue::Checkbox)
            .ok_or_else(mismatch),
        ColumnType::Url => {
            let s = value.as_str().ok_or_else(mismatch)?;
            url::Url::parse(s).map_err(|e| DropReason::InvalidValue {
                column_type: column_type.clone(),
                message: e.to_string(),
            })?;
            Ok(StructuredValue::Url(s.to_string()))
        }
        ColumnType::Email => {
            let s = value.as_str().ok_or_else(mismatch)?;
            if is_plausible_email(s) {
                Ok(StructuredValue::Email(s.to_string()))
            } else {
                Err(DropReason::InvalidValue {
                    column_type: column_type.clone(),
                    message: format!("'{s}' is not an email address"),
                })
            }
        }
        ColumnType::PhoneNumber => value
            .as_str()
            .map(|s| StructuredValue::PhoneNumber(s.to_string()))
            .ok_or_else(mismatch),
        other => Err(DropReason::Unsupported(other.clone())),
    }
}

/// Array of strings, or one comma-separated string
fn coerce_multi_select(value: &JsonValue) -> Option<StructuredValue> {
    let names: Vec<String> = match value {
        JsonValue::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect(),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::trim))
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect(),
        _ => return None,
    };

    Some(StructuredValue::MultiSelect(
        names.into_iter().map(SelectOption::new).collect(),
    ))
}

/// `"2023-01-01"`, an RFC 3339 timestamp, or `{"start": .., "end": ..}`
fn coerce_date(
    column_type: &ColumnType,
    value: &JsonValue,
) -> std::result::Result<StructuredValue, DropReason> {
    let invalid = |s: &str| DropReason::InvalidValue {
        column_type: column_type.clone(),
        message: format!("'{s}' is not a date (use YYYY-MM-DD or RFC 3339)"),
    };

    let (start, end) = match value {
        JsonValue::String(s) => (s.as_str(), None),
        JsonValue::Object(map) => {
            let start = map.get("start").and_then(JsonValue::as_str);
            let end = match map.get("end") {
                None | Some(JsonValue::Null) => None,
                Some(JsonValue::String(s)) => Some(s.as_str()),
                Some(other) => {
                    return Err(DropReason::TypeMismatch {
                        expected: column_type.clone(),
                        found: json_kind(other),
                    })
                }
            };
            match start {
                Some(start) => (start, end),
                None => {
                    return Err(DropReason::InvalidValue {
                        column_type: column_type.clone(),
                        message: "date object needs a string 'start'".to_string(),
                    })
                }
            }
        }
        other => {
            return Err(DropReason::TypeMismatch {
                expected: column_type.clone(),
                found: json_kind(other),
            })
        }
    };

    if !is_date(start) {
        return Err(invalid(start));
    }
    if let Some(end) = end {
        if !is_date(end) {
            return Err(invalid(end));
        }
    }

    Ok(StructuredValue::Date(DateValue {
        start: start.to_string(),
        end: end.map(String::from),
    }))
}

fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}

fn is_plausible_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !s.contains(' ')
        }
        None => false,
    }
}

//! Tests for the coerce module

use super::*;
use crate::error::Error;
use crate::loader::{parse_records, RawRecord};
use crate::schema::{ColumnSchema, ColumnType};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => RawRecord::new(map),
        other => panic!("not an object: {other}"),
    }
}

fn strict(raw: &RawRecord, schema: &ColumnSchema) -> Coercion {
    coerce(raw, schema, CoercionPolicy::Strict).unwrap()
}

fn extended(raw: &RawRecord, schema: &ColumnSchema) -> Coercion {
    coerce(raw, schema, CoercionPolicy::Extended).unwrap()
}

fn single_column(column_type: ColumnType) -> ColumnSchema {
    ColumnSchema::new().with_column("Field", column_type)
}

// ============================================================================
// Structural requirements
// ============================================================================

#[test]
fn test_missing_properties_is_malformed() {
    let schema = single_column(ColumnType::Title);
    let raw = record(json!({"Field": "A"}));

    let err = coerce(&raw, &schema, CoercionPolicy::Strict).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { .. }));
}

#[test]
fn test_non_object_properties_is_malformed() {
    let schema = single_column(ColumnType::Title);
    for value in [json!({"properties": "A"}), json!({"properties": null})] {
        let err = coerce(&record(value), &schema, CoercionPolicy::Extended).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
    }
}

#[test]
fn test_empty_properties() {
    let schema = single_column(ColumnType::Title);
    let coercion = strict(&record(json!({"properties": {}})), &schema);

    assert!(coercion.record.is_empty());
    assert_eq!(coercion.dropped_count(), 0);
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_name_and_age_scenario() {
    let schema = ColumnSchema::new()
        .with_column("Name", ColumnType::Title)
        .with_column("Age", ColumnType::Number);
    let records = parse_records(r#"[{"properties":{"Name":"A","Age":25}}]"#).unwrap();

    let coercion = strict(&records[0], &schema);

    assert_eq!(coercion.dropped_count(), 0);
    assert_eq!(coercion.record.len(), 2);
    assert_eq!(
        coercion.record.get("Name"),
        Some(&StructuredValue::Title(vec![RichTextRun::plain("A")]))
    );
    assert_eq!(
        coercion.record.get("Age"),
        Some(&StructuredValue::Number(25.into()))
    );
    assert_eq!(
        serde_json::to_value(&coercion.record).unwrap(),
        json!({
            "Age": {"number": 25},
            "Name": {"title": [{"type": "text", "text": {"content": "A"}}]}
        })
    );
}

#[test]
fn test_unknown_field_scenario() {
    let schema = ColumnSchema::new().with_column("Name", ColumnType::Title);
    let records = parse_records(r#"{"properties":{"Unknown":"x"}}"#).unwrap();

    let coercion = strict(&records[0], &schema);

    assert!(coercion.record.is_empty());
    assert_eq!(coercion.dropped_count(), 1);
    assert_eq!(
        coercion.dropped,
        vec![DroppedField::new("Unknown", DropReason::UnknownColumn)]
    );
    assert_eq!(serde_json::to_value(&coercion.record).unwrap(), json!({}));
}

// ============================================================================
// Strict policy
// ============================================================================

#[test_case(ColumnType::Title, json!("hello") ; "title string")]
#[test_case(ColumnType::RichText, json!("notes") ; "rich text string")]
#[test_case(ColumnType::Number, json!(3.5) ; "number float")]
#[test_case(ColumnType::Number, json!(-7) ; "number negative")]
fn test_matching_value_produces_one_entry(column_type: ColumnType, value: Value) {
    let schema = single_column(column_type.clone());
    let coercion = strict(&record(json!({"properties": {"Field": value}})), &schema);

    assert_eq!(coercion.dropped_count(), 0);
    assert_eq!(coercion.record.columns().collect::<Vec<_>>(), vec!["Field"]);
    assert_eq!(
        coercion.record.get("Field").unwrap().column_type(),
        column_type
    );
}

#[test_case(ColumnType::Title, json!(5), "number" ; "title given number")]
#[test_case(ColumnType::Title, json!(null), "null" ; "title given null")]
#[test_case(ColumnType::RichText, json!(["a"]), "array" ; "rich text given array")]
#[test_case(ColumnType::Number, json!("25"), "string" ; "number given numeric string")]
#[test_case(ColumnType::Number, json!(true), "boolean" ; "number given bool")]
fn test_mismatched_value_is_dropped(column_type: ColumnType, value: Value, found: &str) {
    let schema = single_column(column_type.clone());
    let coercion = strict(&record(json!({"properties": {"Field": value}})), &schema);

    assert!(coercion.record.is_empty());
    assert_eq!(coercion.dropped_count(), 1);
    match &coercion.dropped[0].reason {
        DropReason::TypeMismatch {
            expected,
            found: actual,
        } => {
            assert_eq!(*expected, column_type);
            assert_eq!(*actual, found);
        }
        other => panic!("unexpected reason: {other:?}"),
    }
}

#[test]
fn test_strict_drops_every_other_column_type() {
    let columns = [
        ColumnType::Select,
        ColumnType::MultiSelect,
        ColumnType::Date,
        ColumnType::Checkbox,
        ColumnType::Url,
        ColumnType::Email,
        ColumnType::PhoneNumber,
        ColumnType::People,
        ColumnType::Formula,
        ColumnType::Other("button".to_string()),
    ];
    let values = [
        json!("text"),
        json!(1),
        json!(true),
        json!(["a", "b"]),
        json!({"start": "2023-01-01"}),
        json!(null),
    ];

    for column in &columns {
        let schema = single_column(column.clone());
        for value in &values {
            let raw = record(json!({"properties": {"Field": value}}));
            let coercion = strict(&raw, &schema);
            assert!(coercion.record.is_empty(), "{column:?} {value}");
            assert_eq!(
                coercion.dropped,
                vec![DroppedField::new(
                    "Field",
                    DropReason::Unsupported(column.clone())
                )]
            );
        }
    }
}

#[test]
fn test_mixed_record_counts_all_drops() {
    let schema = ColumnSchema::new()
        .with_column("Name", ColumnType::Title)
        .with_column("Notes", ColumnType::RichText)
        .with_column("Score", ColumnType::Number)
        .with_column("Done", ColumnType::Checkbox);
    let raw = record(json!({
        "properties": {
            "Name": "Task",
            "Notes": 12,
            "Score": 9,
            "Done": true,
            "Owner": "me"
        }
    }));

    let coercion = strict(&raw, &schema);

    assert_eq!(coercion.record.columns().collect::<Vec<_>>(), vec!["Name", "Score"]);
    assert_eq!(coercion.dropped_count(), 3);
    for column in coercion.record.columns() {
        assert!(schema.contains(column));
    }
}

#[test]
fn test_long_text_is_split_into_runs() {
    let schema = single_column(ColumnType::RichText);
    let text = "x".repeat(MAX_TEXT_RUN_CHARS * 2 + 10);
    let coercion = strict(&record(json!({"properties": {"Field": text}})), &schema);

    match coercion.record.get("Field").unwrap() {
        StructuredValue::RichText(runs) => {
            assert_eq!(runs.len(), 3);
            assert_eq!(runs[0].text.content.len(), MAX_TEXT_RUN_CHARS);
            assert_eq!(runs[2].text.content.len(), 10);
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn test_text_at_run_limit_is_kept() {
    let schema = single_column(ColumnType::Title);
    let text = "x".repeat(MAX_TEXT_RUN_CHARS * MAX_TEXT_RUNS);
    let coercion = strict(&record(json!({"properties": {"Field": text}})), &schema);

    match coercion.record.get("Field").unwrap() {
        StructuredValue::Title(runs) => assert_eq!(runs.len(), MAX_TEXT_RUNS),
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test_case(ColumnType::Title ; "title")]
#[test_case(ColumnType::RichText ; "rich text")]
fn test_text_over_run_limit_is_dropped(column_type: ColumnType) {
    let schema = single_column(column_type.clone());
    let text = "x".repeat(MAX_TEXT_RUN_CHARS * MAX_TEXT_RUNS + 1);
    let coercion = strict(&record(json!({"properties": {"Field": text}})), &schema);

    assert!(coercion.record.is_empty());
    assert_eq!(
        coercion.dropped[0].reason,
        DropReason::InvalidValue {
            column_type,
            message: "text of 200001 characters exceeds the limit of 200000".to_string(),
        }
    );
}

#[test]
fn test_empty_string_keeps_single_run() {
    let schema = single_column(ColumnType::Title);
    let coercion = strict(&record(json!({"properties": {"Field": ""}})), &schema);

    assert_eq!(
        coercion.record.get("Field"),
        Some(&StructuredValue::Title(vec![RichTextRun::plain("")]))
    );
}

// ============================================================================
// Extended policy
// ============================================================================

#[test]
fn test_extended_wire_shapes() {
    let schema = ColumnSchema::new()
        .with_column("Status", ColumnType::Select)
        .with_column("Tags", ColumnType::MultiSelect)
        .with_column("Due", ColumnType::Date)
        .with_column("Done", ColumnType::Checkbox)
        .with_column("Link", ColumnType::Url)
        .with_column("Mail", ColumnType::Email)
        .with_column("Phone", ColumnType::PhoneNumber);
    let raw = record(json!({
        "properties": {
            "Status": "Open",
            "Tags": ["a", "b"],
            "Due": "2024-02-29",
            "Done": false,
            "Link": "https://example.com/x",
            "Mail": "someone@example.com",
            "Phone": "+1 555 0100"
        }
    }));

    let coercion = extended(&raw, &schema);

    assert_eq!(coercion.dropped_count(), 0);
    assert_eq!(
        serde_json::to_value(&coercion.record).unwrap(),
        json!({
            "Status": {"select": {"name": "Open"}},
            "Tags": {"multi_select": [{"name": "a"}, {"name": "b"}]},
            "Due": {"date": {"start": "2024-02-29"}},
            "Done": {"checkbox": false},
            "Link": {"url": "https://example.com/x"},
            "Mail": {"email": "someone@example.com"},
            "Phone": {"phone_number": "+1 555 0100"}
        })
    );
}

#[test]
fn test_extended_multi_select_from_comma_string() {
    let schema = single_column(ColumnType::MultiSelect);
    let coercion = extended(&record(json!({"properties": {"Field": "a, b,,c "}})), &schema);

    assert_eq!(
        coercion.record.get("Field"),
        Some(&StructuredValue::MultiSelect(vec![
            SelectOption::new("a"),
            SelectOption::new("b"),
            SelectOption::new("c"),
        ]))
    );
}

#[test_case(json!("") ; "empty")]
#[test_case(json!("   ") ; "blank")]
fn test_extended_empty_select_dropped(value: Value) {
    let schema = single_column(ColumnType::Select);
    let coercion = extended(&record(json!({"properties": {"Field": value}})), &schema);

    assert!(coercion.record.is_empty());
    assert!(matches!(
        coercion.dropped[0].reason,
        DropReason::InvalidValue {
            column_type: ColumnType::Select,
            ..
        }
    ));
}

#[test]
fn test_extended_multi_select_array_skips_blank_names() {
    let schema = single_column(ColumnType::MultiSelect);
    let coercion = extended(&record(json!({"properties": {"Field": ["a", " ", "b "]}})), &schema);

    assert_eq!(
        coercion.record.get("Field"),
        Some(&StructuredValue::MultiSelect(vec![
            SelectOption::new("a"),
            SelectOption::new("b"),
        ]))
    );
}

#[test]
fn test_extended_multi_select_rejects_mixed_array() {
    let schema = single_column(ColumnType::MultiSelect);
    let coercion = extended(&record(json!({"properties": {"Field": ["a", 1]}})), &schema);

    assert!(coercion.record.is_empty());
    assert!(matches!(
        coercion.dropped[0].reason,
        DropReason::TypeMismatch { .. }
    ));
}

#[test]
fn test_extended_date_range_and_timestamp() {
    let schema = single_column(ColumnType::Date);

    let coercion = extended(
        &record(json!({"properties": {"Field": {"start": "2024-01-01", "end": "2024-01-05"}}})),
        &schema,
    );
    assert_eq!(
        coercion.record.get("Field"),
        Some(&StructuredValue::Date(DateValue {
            start: "2024-01-01".to_string(),
            end: Some("2024-01-05".to_string()),
        }))
    );

    let coercion = extended(
        &record(json!({"properties": {"Field": "2024-01-01T09:30:00+02:00"}})),
        &schema,
    );
    assert_eq!(coercion.dropped_count(), 0);
}

#[test_case(json!("yesterday") ; "free text")]
#[test_case(json!("2023-02-30") ; "impossible day")]
#[test_case(json!({"end": "2024-01-01"}) ; "missing start")]
#[test_case(json!({"start": "2024-01-01", "end": "soon"}) ; "bad end")]
fn test_extended_invalid_dates_dropped(value: Value) {
    let schema = single_column(ColumnType::Date);
    let coercion = extended(&record(json!({"properties": {"Field": value}})), &schema);

    assert!(coercion.record.is_empty());
    assert!(matches!(
        coercion.dropped[0].reason,
        DropReason::InvalidValue { .. }
    ));
}

#[test]
fn test_extended_invalid_url_and_email_dropped() {
    let schema = ColumnSchema::new()
        .with_column("Link", ColumnType::Url)
        .with_column("Mail", ColumnType::Email);
    let raw = record(json!({"properties": {"Link": "not a url", "Mail": "nobody"}}));

    let coercion = extended(&raw, &schema);

    assert!(coercion.record.is_empty());
    assert_eq!(coercion.dropped_count(), 2);
    assert!(coercion
        .dropped
        .iter()
        .all(|d| matches!(d.reason, DropReason::InvalidValue { .. })));
}

#[test]
fn test_extended_still_drops_read_only_columns() {
    let schema = single_column(ColumnType::Formula);
    let coercion = extended(&record(json!({"properties": {"Field": "x"}})), &schema);

    assert_eq!(
        coercion.dropped,
        vec![DroppedField::new(
            "Field",
            DropReason::Unsupported(ColumnType::Formula)
        )]
    );
}

#[test]
fn test_drop_reason_display() {
    let reason = DropReason::TypeMismatch {
        expected: ColumnType::Number,
        found: "string",
    };
    assert_eq!(
        reason.to_string(),
        "expected a value for a Number column, found string"
    );
    assert_eq!(
        DropReason::Unsupported(ColumnType::Checkbox).to_string(),
        "Checkbox columns are not supported"
    );
}

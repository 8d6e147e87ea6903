//! Human-readable output for the CLI

use crate::coerce::CoercionPolicy;
use crate::engine::InsertReport;
use crate::loader::PROPERTIES_KEY;
use crate::schema::{ColumnSchema, DatabaseInfo};
use crate::types::{JsonObject, JsonValue};
use std::fmt::Write as _;

/// Steps for sharing a database with an integration
pub(crate) const SHARE_DATABASE_HELP: &str = "\
Permission Error: Your integration doesn't have access to this database.
To fix this:
1. Go to your database in Notion
2. Click the \"...\" menu in the top right corner
3. Select \"Add connections\"
4. Find and select your integration name

Also verify that your Database ID is correct.";

/// Example input record with one sample value per writable column
pub fn sample_record(schema: &ColumnSchema, policy: CoercionPolicy) -> JsonValue {
    let properties: JsonObject = schema
        .iter()
        .filter_map(|(name, column)| {
            column
                .sample_value(policy)
                .map(|sample| (name.to_string(), sample))
        })
        .collect();

    let mut record = JsonObject::new();
    record.insert(PROPERTIES_KEY.to_string(), JsonValue::Object(properties));
    JsonValue::Object(record)
}

/// Output of the `inspect` command
pub fn render_inspection(info: &DatabaseInfo, policy: CoercionPolicy) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Database Title: {}", info.title);
    if let Some(url) = &info.url {
        let _ = writeln!(out, "URL: {url}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Properties (columns) available:");
    let _ = writeln!(out, "-----------------------------");
    for (name, column) in info.schema.iter() {
        let _ = writeln!(out, "{name} (Type: {column})");
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "When creating your JSON data file, make sure property names exactly match these column names."
    );
    let _ = writeln!(out, "Example for this database:");
    let _ = writeln!(out, "```");
    let sample = sample_record(&info.schema, policy);
    let pretty = serde_json::to_string_pretty(&sample).unwrap_or_else(|_| sample.to_string());
    let _ = writeln!(out, "{pretty}");
    let _ = writeln!(out, "```");

    let skipped: Vec<String> = info
        .schema
        .iter()
        .filter(|(_, column)| !column.is_writable(policy))
        .map(|(name, column)| format!("{name} ({column})"))
        .collect();
    if !skipped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "These columns are ignored on insert: {}",
            skipped.join(", ")
        );
        if policy == CoercionPolicy::Strict {
            let _ = writeln!(
                out,
                "Pass --extended-types to write select, date, checkbox, URL, email and phone columns."
            );
        }
    }

    out
}

/// Closing summary of the `insert` command
pub fn render_summary(report: &InsertReport, dry_run: bool) -> String {
    let mut out = String::new();
    let verb = if dry_run { "prepared" } else { "inserted" };

    let _ = writeln!(
        out,
        "Finished inserting. {}/{} records {verb} successfully.",
        report.succeeded(),
        report.total()
    );
    if report.dropped_fields() > 0 {
        let _ = writeln!(
            out,
            "{} field(s) were dropped because they did not match the database schema.",
            report.dropped_fields()
        );
    }

    if report.has_access_errors() {
        let _ = writeln!(
            out,
            "Some records were rejected for lack of access. Check that the database is shared with your integration."
        );
    }

    if report.succeeded() > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "TIP: If your data isn't visible in Notion:");
        let _ = writeln!(
            out,
            "1. Verify property names match exactly with database columns (case sensitive)"
        );
        let _ = writeln!(
            out,
            "2. Run 'notion-loader inspect --db \"your-db-id\"' to see the database structure"
        );
        let _ = writeln!(
            out,
            "3. Try running with --debug flag to see more details about the process"
        );
    } else if report.total() > 0 {
        let _ = writeln!(
            out,
            "No records were successfully inserted. Check the errors above."
        );
    }

    out
}

//! CLI runner - executes commands

use super::display::{render_inspection, render_summary, SHARE_DATABASE_HELP};
use crate::cli::commands::{Cli, Commands};
use crate::coerce::CoercionPolicy;
use crate::config::ClientSettings;
use crate::database_id::DatabaseId;
use crate::engine::{InsertConfig, InsertEngine, RecordOutcome, RecordStatus};
use crate::error::{Error, FetchFailure, Result, ResultExt};
use crate::loader::{parse_data, read_data};
use crate::notion::{NotionApi, NotionClient};
use crate::schema::DatabaseInfo;
use std::path::Path;
use tracing::info;

/// How a run that did not hit a fatal error ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// All work done, or failures are informational only
    Success,
    /// Some records failed and `--fail-on-error` was set
    RecordsFailed,
}

impl ExitStatus {
    /// Process exit code
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::RecordsFailed => 2,
        }
    }
}

/// Options of the `insert` command after validation
struct InsertOptions<'a> {
    data: &'a Path,
    debug: bool,
    dry_run: bool,
    policy: CoercionPolicy,
    fail_on_error: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<ExitStatus> {
        match &self.cli.command {
            Commands::Inspect {
                db,
                api_key,
                extended_types,
            } => {
                self.inspect(db.as_deref(), api_key.as_deref(), policy(*extended_types))
                    .await
            }
            Commands::Insert {
                db,
                data,
                api_key,
                debug,
                dry_run,
                extended_types,
                fail_on_error,
            } => {
                let (Some(db), Some(data)) = (db.as_deref(), data.as_deref()) else {
                    return Err(Error::validation(
                        "Both --db (Database ID) and --data (JSON file path) flags are required.",
                    ));
                };
                let options = InsertOptions {
                    data,
                    debug: *debug,
                    dry_run: *dry_run,
                    policy: policy(*extended_types),
                    fail_on_error: *fail_on_error,
                };
                self.insert(db, api_key.as_deref(), &options).await
            }
        }
    }

    /// Resolve settings and build the API client
    fn client(&self, api_key: Option<&str>) -> Result<NotionClient> {
        let settings = ClientSettings::from_env(api_key, self.cli.base_url.as_deref())?;
        NotionClient::new(&settings).context("Failed to initialise HTTP client")
    }

    /// Show a database's columns and a sample record
    async fn inspect(
        &self,
        db: Option<&str>,
        api_key: Option<&str>,
        policy: CoercionPolicy,
    ) -> Result<ExitStatus> {
        let db = db.ok_or_else(|| Error::validation("Database ID (--db) is required."))?;
        let database_id = DatabaseId::parse(db)?;
        let client = self.client(api_key)?;

        println!("Inspecting database {database_id}...");
        let info = fetch_database(&client, &database_id).await?;

        println!();
        print!("{}", render_inspection(&info, policy));
        Ok(ExitStatus::Success)
    }

    /// Load, coerce and submit records
    async fn insert(
        &self,
        db: &str,
        api_key: Option<&str>,
        options: &InsertOptions<'_>,
    ) -> Result<ExitStatus> {
        let database_id = DatabaseId::parse(db)?;
        let client = self.client(api_key)?;

        println!("Reading data from {}...", options.data.display());
        let raw = read_data(options.data)?;
        if options.debug {
            println!("Raw JSON content:");
            println!("{raw}");
        }
        let records = parse_data(options.data, &raw)?;
        println!(
            "Found {} record(s) to insert into database {database_id}.",
            records.len()
        );

        let info = fetch_database(&client, &database_id).await?;
        if options.debug {
            println!("Database columns: {}", info.schema.names().join(", "));
        }

        let config = InsertConfig::default()
            .policy(options.policy)
            .dry_run(options.dry_run);
        let engine = InsertEngine::new(&client, database_id).with_config(config);

        let mut shown_share_help = false;
        let report = engine
            .insert_all(&info, &records, |outcome| {
                print_outcome(outcome, &info, options.debug, &mut shown_share_help);
            })
            .await;

        println!();
        print!("{}", render_summary(&report, options.dry_run));

        info!(
            "Run complete: {} submitted, {} succeeded, {} failed, {} field(s) dropped",
            report.submitted(),
            report.succeeded(),
            report.failed(),
            report.dropped_fields()
        );

        if options.fail_on_error && report.failed() > 0 {
            Ok(ExitStatus::RecordsFailed)
        } else {
            Ok(ExitStatus::Success)
        }
    }
}

fn policy(extended_types: bool) -> CoercionPolicy {
    if extended_types {
        CoercionPolicy::Extended
    } else {
        CoercionPolicy::Strict
    }
}

/// Fetch the schema, printing guidance when the database is not reachable
async fn fetch_database(api: &dyn NotionApi, id: &DatabaseId) -> Result<DatabaseInfo> {
    match api.retrieve_database(id).await {
        Ok(info) => Ok(info),
        Err(e) => {
            println!("Error accessing database: {e}");
            match e.fetch_failure() {
                FetchFailure::NotFound | FetchFailure::PermissionDenied => {
                    println!();
                    println!("{SHARE_DATABASE_HELP}");
                }
                FetchFailure::Transport => {}
            }
            Err(e)
        }
    }
}

fn print_outcome(
    outcome: &RecordOutcome,
    info: &DatabaseInfo,
    debug: bool,
    shown_share_help: &mut bool,
) {
    if debug {
        for dropped in &outcome.dropped {
            println!(
                "WARNING: record {}: dropped '{}': {}",
                outcome.index, dropped.name, dropped.reason
            );
        }
        if outcome.dropped.iter().any(|d| !info.schema.contains(&d.name)) {
            println!("Available properties are: {}", info.schema.names().join(", "));
            println!("Ensure your property names match exactly (including case).");
        }
        if let Some(request) = &outcome.request {
            let pretty = serde_json::to_string_pretty(request).unwrap_or_default();
            println!("Request JSON:\n{pretty}");
        }
    }

    print!("Inserting record {}... ", outcome.index);
    match &outcome.status {
        RecordStatus::Created { url, .. } => {
            println!("Success!");
            if let Some(url) = url.as_deref().filter(|u| !u.is_empty()) {
                println!("Page URL: {url}");
            }
        }
        RecordStatus::DryRun(request) => {
            println!("Dry run, not submitted.");
            let pretty = serde_json::to_string_pretty(request).unwrap_or_default();
            println!("{pretty}");
        }
        RecordStatus::ConversionFailed(message) => {
            println!("Skipped: {message}");
        }
        RecordStatus::SubmitFailed {
            message,
            access_error,
        } => {
            println!("Failed: {message}");
            if *access_error && !*shown_share_help {
                println!();
                println!("{SHARE_DATABASE_HELP}");
                println!();
                println!(
                    "For more help, visit: https://developers.notion.com/docs/getting-started"
                );
                *shown_share_help = true;
            }
        }
    }
}

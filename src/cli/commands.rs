//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Upload JSON records to Notion databases
#[derive(Parser, Debug)]
#[command(name = "notion-loader")]
#[command(author, version, about)]
#[command(long_about = "Upload JSON records to Notion databases.

Database IDs are accepted as a UUID (f1a2b3c4-d5e6-7f8a-9b0c-1d2e3f4a5b6c),
as 32 hex digits without dashes, or as the database's Notion URL.")]
pub struct Cli {
    /// Verbose log output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the API base URL (defaults to NOTION_API_BASE_URL or the public API)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect a database to see its columns and an example record
    #[command(long_about = "Inspect a Notion database to see its structure.
This helps ensure your JSON data will map correctly to the database columns.

Example: notion-loader inspect --db \"f1a2b3c4-d5e6-7f8a-9b0c-1d2e3f4a5b6c\"")]
    Inspect {
        /// ID or URL of the Notion database
        #[arg(long)]
        db: Option<String>,

        /// Notion API key (overrides NOTION_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Show samples for select, date, checkbox, URL, email and phone columns too
        #[arg(long)]
        extended_types: bool,
    },

    /// Insert records from a JSON file into a database
    #[command(long_about = "Insert data from a JSON file into a Notion database.

Example: notion-loader insert --db \"f1a2b3c4-d5e6-7f8a-9b0c-1d2e3f4a5b6c\" --data data.json

The file holds one object or an array of objects, each shaped as
{\"properties\": {\"<column>\": <value>, ...}}.

The database must be shared with your integration:
1. Go to your database in Notion
2. Click the \"...\" menu in the top right corner
3. Select \"Add connections\"
4. Find and select your integration name")]
    Insert {
        /// ID or URL of the Notion database
        #[arg(long)]
        db: Option<String>,

        /// Path to the JSON data file
        #[arg(long)]
        data: Option<PathBuf>,

        /// Notion API key (overrides NOTION_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Print raw input, request bodies and dropped fields
        #[arg(long)]
        debug: bool,

        /// Convert records and print requests without creating pages
        #[arg(long)]
        dry_run: bool,

        /// Also write select, multi-select, date, checkbox, URL, email and phone columns
        #[arg(long)]
        extended_types: bool,

        /// Exit with status 2 when any record fails
        #[arg(long)]
        fail_on_error: bool,
    },
}

impl Cli {
    /// Default log filter for this invocation
    pub fn log_level(&self) -> tracing::Level {
        let debug = matches!(self.command, Commands::Insert { debug: true, .. });
        if debug || self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

//! Database schema module
//!
//! Column definitions of a Notion database, as returned by the
//! retrieve-database endpoint.
//!
//! # Features
//!
//! - **Column Types**: Closed set of known column kinds plus a catch-all
//! - **Schema Parsing**: Builds a `ColumnSchema` from the API response
//! - **Sample Values**: Example input value per column for `inspect`

mod types;

pub use types::{ColumnSchema, ColumnType, DatabaseInfo, DatabaseResponse};

//! # notion-loader
//!
//! Inserts JSON records into Notion databases, mapping loosely-typed input
//! values onto each database's typed column schema.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use notion_loader::{
//!     config::ClientSettings, database_id::DatabaseId, engine::InsertEngine,
//!     loader::load_records, notion::NotionClient, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = ClientSettings::from_env(None, None)?;
//!     let client = NotionClient::new(&settings)?;
//!     let id = DatabaseId::parse("1d4a5e7fe23180b98df2ddce1ea05ddf")?;
//!
//!     let records = load_records("data.json")?;
//!     let report = InsertEngine::new(&client, id)
//!         .run(&records, |outcome| println!("{outcome:?}"))
//!         .await?;
//!     println!("{}/{} inserted", report.succeeded(), report.total());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌────────────┐   ┌──────────────┐
//! │   loader   │──▶│    coerce    │──▶│   engine   │──▶│    notion    │
//! │ RawRecord  │   │ ColumnSchema │   │ sequential │   │ GET database │
//! │ array/obj  │   │ → typed JSON │   │ per-record │   │ POST pages   │
//! └────────────┘   └──────────────┘   └────────────┘   └──────┬───────┘
//!                                                             │
//!                                              http (rate limit, auth)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Authentication
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Client settings from flags and environment
pub mod config;

/// Database identifier normalization
pub mod database_id;

/// Column schema of a database
pub mod schema;

/// Data file loading
pub mod loader;

/// Schema-aware record coercion
pub mod coerce;

/// Notion API client
pub mod notion;

/// Insert pipeline
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

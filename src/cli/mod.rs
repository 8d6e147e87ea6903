//! CLI module
//!
//! Command-line interface for loading records into a Notion database.
//!
//! # Commands
//!
//! - `inspect` - Show a database's columns and a sample record
//! - `insert` - Insert records from a JSON file

mod commands;
mod display;
mod runner;

pub use commands::{Cli, Commands};
pub use display::{render_inspection, render_summary, sample_record};
pub use runner::{ExitStatus, Runner};

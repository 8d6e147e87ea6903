//! Input loader module
//!
//! Reads the JSON data file and splits it into raw records.
//!
//! # Overview
//!
//! The loader module provides:
//! - `RawRecord` - One input object, as parsed
//! - `load_records` / `parse_records` - File and string entry points
//! - `read_data` / `parse_data` - The two halves of `load_records`
//!
//! The document may be a single object or an array of objects.

mod parser;
mod types;

pub use parser::{load_records, parse_data, parse_records, read_data};
pub use types::{RawRecord, PROPERTIES_KEY};

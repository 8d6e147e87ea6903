//! Record coercion module
//!
//! Maps a loosely-typed input record onto a database's column schema.
//!
//! # Overview
//!
//! The coerce module provides:
//! - `coerce` - Converts one `RawRecord` into a `CoercedRecord`
//! - `StructuredValue` - Typed payload per column kind, in wire format
//! - `DroppedField` - Why an input field produced no value
//!
//! Coercion never fails on individual fields. Unknown columns, type
//! mismatches and unsupported column kinds are reported as drops. The only
//! error is a record without a `properties` object.

mod coercer;
mod types;

pub use coercer::coerce;
pub use types::{
    CoercedRecord, Coercion, CoercionPolicy, DateValue, DropReason, DroppedField, RichTextRun,
    SelectOption, StructuredValue, MAX_TEXT_RUNS, MAX_TEXT_RUN_CHARS,
};

#[cfg(test)]
mod tests;

//! Input record types

use crate::types::{JsonObject, JsonValue};

/// Key holding a record's field map
pub const PROPERTIES_KEY: &str = "properties";

/// One input record as parsed from the data file
///
/// Never mutated after parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: JsonObject,
}

impl RawRecord {
    /// Wrap a parsed JSON object
    pub fn new(fields: JsonObject) -> Self {
        Self { fields }
    }

    /// The nested field map under `properties`, if it is an object
    pub fn properties(&self) -> Option<&JsonObject> {
        self.fields.get(PROPERTIES_KEY).and_then(JsonValue::as_object)
    }
}

//! Notion wire types

use crate::coerce::CoercedRecord;
use crate::database_id::DatabaseId;
use serde::{Deserialize, Serialize};

/// Parent of a new page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parent {
    pub database_id: String,
}

/// Body of a create-page call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageRequest {
    pub parent: Parent,
    pub properties: CoercedRecord,
}

impl CreatePageRequest {
    /// Request creating a row in the given database
    pub fn new(database_id: &DatabaseId, properties: CoercedRecord) -> Self {
        Self {
            parent: Parent {
                database_id: database_id.to_string(),
            },
            properties,
        }
    }

    /// The request as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

/// Created page (only the fields we read)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageResponse {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

//! Notion API client

use super::types::{CreatePageRequest, PageResponse};
use crate::config::ClientSettings;
use crate::database_id::DatabaseId;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::schema::{DatabaseInfo, DatabaseResponse};
use crate::types::NOTION_VERSION;
use async_trait::async_trait;
use tracing::{debug, info};

/// Operations the loader performs against the remote service
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// Fetch a database's title and column schema
    async fn retrieve_database(&self, id: &DatabaseId) -> Result<DatabaseInfo>;

    /// Create one page (row) in a database
    async fn create_page(&self, request: &CreatePageRequest) -> Result<PageResponse>;
}

/// HTTP implementation of [`NotionApi`]
#[derive(Debug)]
pub struct NotionClient {
    http: HttpClient,
}

impl NotionClient {
    /// Build a client from resolved settings
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let mut builder = HttpClientConfig::builder()
            .base_url(settings.base_url.as_str())
            .timeout(settings.timeout)
            .header("Notion-Version", NOTION_VERSION);

        builder = match &settings.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        let http = HttpClient::with_auth(builder.build(), settings.auth())?;
        Ok(Self { http })
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn retrieve_database(&self, id: &DatabaseId) -> Result<DatabaseInfo> {
        debug!("Retrieving database {}", id);
        let response: DatabaseResponse = self.http.get_json(&format!("databases/{id}")).await?;
        let info = DatabaseInfo::from(response);
        for (name, column) in info.schema.iter() {
            debug!("Column '{}' has type '{}'", name, column.tag());
        }
        info!(
            "Fetched schema for '{}' ({} columns)",
            info.title,
            info.schema.len()
        );
        Ok(info)
    }

    async fn create_page(&self, request: &CreatePageRequest) -> Result<PageResponse> {
        let body = serde_json::to_value(request)?;
        let page: PageResponse = self.http.post_json("pages", &body).await?;
        if page.id.is_empty() {
            return Err(Error::decode("create page response has an empty id"));
        }
        debug!("Created page {}", page.id);
        Ok(page)
    }
}

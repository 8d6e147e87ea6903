//! Insert engine module
//!
//! Drives the fetch-coerce-submit pipeline.
//!
//! # Overview
//!
//! The engine module provides:
//! - `InsertEngine` - Fetches the schema once, then coerces and submits
//!   each record in input order
//! - `InsertConfig` - Coercion policy and dry-run switch
//! - `InsertReport` - Per-record outcomes and summary counts
//!
//! A failure on one record never stops the records after it.

mod types;

pub use types::{InsertConfig, InsertReport, RecordOutcome, RecordStatus};

use crate::coerce::coerce;
use crate::database_id::DatabaseId;
use crate::error::Result;
use crate::loader::RawRecord;
use crate::notion::{CreatePageRequest, NotionApi};
use crate::schema::DatabaseInfo;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline that inserts records into one database
pub struct InsertEngine<'a, A: NotionApi + ?Sized> {
    api: &'a A,
    database_id: DatabaseId,
    config: InsertConfig,
}

impl<'a, A: NotionApi + ?Sized> InsertEngine<'a, A> {
    /// Create an engine for the given database
    pub fn new(api: &'a A, database_id: DatabaseId) -> Self {
        Self {
            api,
            database_id,
            config: InsertConfig::default(),
        }
    }

    /// Set insert configuration
    #[must_use]
    pub fn with_config(mut self, config: InsertConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch the target database's schema
    pub async fn fetch_database(&self) -> Result<DatabaseInfo> {
        self.api.retrieve_database(&self.database_id).await
    }

    /// Fetch the schema, then insert every record
    ///
    /// Only the schema fetch can fail the whole run. `on_record` is called
    /// after each record with its outcome.
    pub async fn run<F>(&self, records: &[RawRecord], on_record: F) -> Result<InsertReport>
    where
        F: FnMut(&RecordOutcome),
    {
        let database = self.fetch_database().await?;
        Ok(self.insert_all(&database, records, on_record).await)
    }

    /// Insert every record against an already fetched schema
    pub async fn insert_all<F>(
        &self,
        database: &DatabaseInfo,
        records: &[RawRecord],
        mut on_record: F,
    ) -> InsertReport
    where
        F: FnMut(&RecordOutcome),
    {
        let start = Instant::now();
        let mut report = InsertReport::default();

        info!(
            "Inserting {} record(s) into '{}' ({})",
            records.len(),
            database.title,
            self.database_id
        );

        for (offset, raw) in records.iter().enumerate() {
            let outcome = self.insert_one(offset + 1, database, raw).await;
            on_record(&outcome);
            report.push(outcome);
        }

        report.duration = start.elapsed();
        info!(
            "Finished: {}/{} record(s) inserted in {:?}",
            report.succeeded(),
            report.total(),
            report.duration
        );
        report
    }

    async fn insert_one(
        &self,
        index: usize,
        database: &DatabaseInfo,
        raw: &RawRecord,
    ) -> RecordOutcome {
        debug!("Processing record {}", index);

        let coercion = match coerce(raw, &database.schema, self.config.policy) {
            Ok(coercion) => coercion,
            Err(e) => {
                warn!("Record {} could not be converted: {}", index, e);
                return RecordOutcome::new(index, RecordStatus::ConversionFailed(e.to_string()));
            }
        };

        if coercion.dropped_count() > 0 {
            warn!("Record {}: {} field(s) dropped", index, coercion.dropped_count());
        }
        for dropped in &coercion.dropped {
            debug!(
                "Record {}: dropped field '{}' ({})",
                index, dropped.name, dropped.reason
            );
        }

        for column in coercion.record.columns() {
            if let Some(value) = coercion.record.get(column) {
                debug!("Record {}: '{}' written as {}", index, column, value.column_type());
            }
        }
        if coercion.record.is_empty() {
            warn!("Record {} has no usable fields, submitting empty properties", index);
        } else {
            debug!("Record {}: {} column(s) coerced", index, coercion.record.len());
        }

        let dropped = coercion.dropped;
        let request = CreatePageRequest::new(&self.database_id, coercion.record);

        if self.config.dry_run {
            return RecordOutcome::new(index, RecordStatus::DryRun(request.to_json()))
                .with_dropped(dropped);
        }

        let status = match self.api.create_page(&request).await {
            Ok(page) => RecordStatus::Created {
                page_id: page.id,
                url: page.url,
            },
            Err(e) => {
                warn!("Record {} failed: {}", index, e);
                RecordStatus::SubmitFailed {
                    access_error: e.is_access_error(),
                    message: e.to_string(),
                }
            }
        };

        RecordOutcome::new(index, status)
            .with_dropped(dropped)
            .with_request(request.to_json())
    }
}

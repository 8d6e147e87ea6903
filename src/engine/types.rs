//! Engine types
//!
//! Configuration and reporting for the insert engine.

use crate::coerce::{CoercionPolicy, DroppedField};
use serde_json::Value;
use std::time::Duration;

/// Configuration for an insert run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertConfig {
    /// Which column kinds to write
    pub policy: CoercionPolicy,
    /// Coerce and build requests without submitting them
    pub dry_run: bool,
}

impl InsertConfig {
    /// Set the coercion policy
    #[must_use]
    pub fn policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable dry-run
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What happened to one record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordStatus {
    /// The page was created
    Created {
        page_id: String,
        url: Option<String>,
    },
    /// Dry-run: the request that would have been sent
    DryRun(Value),
    /// The record had no usable field map
    ConversionFailed(String),
    /// The create call failed
    SubmitFailed { message: String, access_error: bool },
}

/// Outcome of one record, numbered from 1 in input order
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    pub index: usize,
    pub status: RecordStatus,
    pub dropped: Vec<DroppedField>,
    /// The submitted request body, when one was sent
    pub request: Option<Value>,
}

impl RecordOutcome {
    pub fn new(index: usize, status: RecordStatus) -> Self {
        Self {
            index,
            status,
            dropped: Vec::new(),
            request: None,
        }
    }

    #[must_use]
    pub fn with_dropped(mut self, dropped: Vec<DroppedField>) -> Self {
        self.dropped = dropped;
        self
    }

    #[must_use]
    pub fn with_request(mut self, request: Value) -> Self {
        self.request = Some(request);
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self.status,
            RecordStatus::Created { .. } | RecordStatus::DryRun(_)
        )
    }
}

/// Summary of an insert run
#[derive(Debug, Clone, Default)]
pub struct InsertReport {
    pub outcomes: Vec<RecordOutcome>,
    pub duration: Duration,
}

impl InsertReport {
    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    /// Records processed
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Records created (or prepared, in dry-run)
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Records that failed conversion or submission
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Records for which a create call was attempted
    pub fn submitted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.status,
                    RecordStatus::Created { .. } | RecordStatus::SubmitFailed { .. }
                )
            })
            .count()
    }

    /// Fields dropped across all records
    pub fn dropped_fields(&self) -> usize {
        self.outcomes.iter().map(|o| o.dropped.len()).sum()
    }

    /// Whether any submission failed for lack of access
    pub fn has_access_errors(&self) -> bool {
        self.outcomes.iter().any(|o| {
            matches!(
                o.status,
                RecordStatus::SubmitFailed {
                    access_error: true,
                    ..
                }
            )
        })
    }
}

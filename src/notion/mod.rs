//! Notion API module
//!
//! The two endpoints the loader needs: retrieve a database and create a page.
//!
//! # Overview
//!
//! - `NotionApi` - Trait seam over the remote service
//! - `NotionClient` - `reqwest`-backed implementation
//! - `CreatePageRequest` / `PageResponse` - Wire types

mod client;
mod types;

pub use client::{NotionApi, NotionClient};
pub use types::{CreatePageRequest, PageResponse, Parent};

#[cfg(test)]
mod tests;

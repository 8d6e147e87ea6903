//! HTTP client module
//!
//! Provides the HTTP client used to talk to the Notion API.
//!
//! # Features
//!
//! - **Rate Limiting**: Token bucket pacing using governor
//! - **Error Classification**: Unsuccessful responses become typed API errors
//! - **Authentication**: Integration with auth module
//!
//! Requests are attempted exactly once. There is no retry or backoff.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

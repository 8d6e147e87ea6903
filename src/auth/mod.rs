//! Authentication module
//!
//! Supports: integration token (bearer), or none for unauthenticated calls.
//!
//! The `Authenticator` applies the configured credential to outgoing
//! requests. Tokens are held in an `ApiToken` that never prints its value.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{ApiToken, AuthConfig};

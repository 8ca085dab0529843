//! Core plumbing shared by the PlayFab crates
//!
//! - [`PlayFabClient`]: POSTs JSON to a title and decodes the
//!   `{code, data, status}` envelope, mapping error envelopes to
//!   [`ServiceError`]
//! - [`Title`]: routes a title ID to `https://<id>.playfabapi.com`
//! - [`PlayFabError`]: the error type of every crate in the workspace
//! - [`codes`]: well-known numeric error codes

pub mod client;
pub mod codes;
pub mod config;
pub mod errors;
pub mod title;

// Re-export main types
pub use client::{Envelope, PlayFabClient};
pub use config::{HttpTimeouts, PlayFabConfig};
pub use errors::{PlayFabError, Result, ServiceError};
pub use title::Title;

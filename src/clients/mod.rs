//! HTTP client functionality for the upstream Etsy API.
//!
//! This module provides the authenticated [`ApiClient`] and its error
//! types. Every call attaches the bearer token and API-key header; every
//! non-2xx response is normalized into a typed [`UpstreamHttpError`]
//! rather than thrown, and `204 No Content` is a defined success with no
//! body.

mod errors;
mod http_client;

pub use errors::{ApiError, UpstreamHttpError};
pub use http_client::{ApiClient, PatchBody, CLIENT_VERSION};

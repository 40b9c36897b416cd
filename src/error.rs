//! Error types for dashboard configuration.
//!
//! This module contains the error type used for configuration and
//! validation failures at startup.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Missing startup configuration (client id, session
//! secret) is the only condition that should abort the process; everything
//! else degrades to a rendered error.
//!
//! # Example
//!
//! ```rust
//! use etsy_dashboard::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur while building the dashboard configuration.
///
/// Each variant carries a clear, actionable message; these surface at
/// startup, before any request handling begins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client id (Etsy API keystring) cannot be empty.
    #[error("Client id cannot be empty. Provide the Etsy app keystring.")]
    EmptyClientId,

    /// Session secret cannot be empty.
    #[error("Session secret cannot be empty. Provide a secret for cookie signing.")]
    EmptySessionSecret,

    /// Redirect URI is invalid.
    #[error("Invalid redirect URI '{uri}'. Expected an absolute http(s) URL (e.g. 'http://localhost:3003/oauth/redirect').")]
    InvalidRedirectUri {
        /// The invalid URI that was provided.
        uri: String,
    },

    /// A required field is missing from the builder.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A page-size constant was set to zero.
    #[error("Page size for {list} must be at least 1.")]
    ZeroPageSize {
        /// The list type whose page size was invalid.
        list: &'static str,
    },
}

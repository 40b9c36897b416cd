//! Error types for upstream API communication.
//!
//! Expected non-2xx responses are values, not panics: every upstream call
//! returns a result carrying either the decoded payload or a structured
//! failure with the status and the best-effort-parsed error body.
//!
//! # Error Types
//!
//! - [`UpstreamHttpError`]: a non-2xx response from the Etsy API
//! - [`ApiError`]: unified error type (`Upstream` or `Network`)
//!
//! # Example
//!
//! ```rust,ignore
//! match client.get("application/openapi-ping").await {
//!     Ok(body) => println!("pong: {body:?}"),
//!     Err(ApiError::Upstream(e)) => println!("API error {} at {}", e.status, e.path),
//!     Err(ApiError::Network(e)) => println!("transport failure: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an upstream request receives a non-2xx response.
///
/// The body is the parsed JSON error payload when the upstream sent one; a
/// malformed body degrades to a wrapper around the raw text rather than a
/// parse failure. Both are kept for diagnostics alongside the single
/// user-facing message.
///
/// # Example
///
/// ```rust
/// use etsy_dashboard::clients::UpstreamHttpError;
/// use serde_json::json;
///
/// let error = UpstreamHttpError {
///     status: 404,
///     path: "application/shops/1/listings/9".to_string(),
///     body: json!({"error": "Listing not found"}),
/// };
///
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error)]
#[error("Upstream request to '{path}' failed with status {status}: {body}")]
pub struct UpstreamHttpError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The request path, for context in logs and messages.
    pub path: String,
    /// Parsed error body, or `{"raw_body": "..."}` when unparseable.
    pub body: serde_json::Value,
}

impl UpstreamHttpError {
    /// Returns the upstream `error` field as a message, when present.
    #[must_use]
    pub fn upstream_message(&self) -> Option<&str> {
        self.body.get("error").and_then(serde_json::Value::as_str)
    }
}

/// Unified error type for upstream API calls.
///
/// `Upstream` covers responses the server actually produced; `Network`
/// covers transport failures before any response arrived. Neither is
/// retried anywhere in the crate.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A non-2xx response from the upstream API.
    #[error(transparent)]
    Upstream(#[from] UpstreamHttpError),

    /// Network or connection error before a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upstream_error_message_includes_status_and_path() {
        let error = UpstreamHttpError {
            status: 403,
            path: "application/shops/1/receipts".to_string(),
            body: json!({"error": "Insufficient scope"}),
        };
        let message = error.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("application/shops/1/receipts"));
        assert!(message.contains("Insufficient scope"));
    }

    #[test]
    fn test_upstream_message_extraction() {
        let error = UpstreamHttpError {
            status: 400,
            path: "p".to_string(),
            body: json!({"error": "bad request"}),
        };
        assert_eq!(error.upstream_message(), Some("bad request"));

        let error = UpstreamHttpError {
            status: 500,
            path: "p".to_string(),
            body: json!({"raw_body": "<html>oops</html>"}),
        };
        assert!(error.upstream_message().is_none());
    }

    #[test]
    fn test_api_error_from_upstream() {
        let upstream = UpstreamHttpError {
            status: 401,
            path: "p".to_string(),
            body: json!({}),
        };
        let api_error: ApiError = upstream.into();
        assert!(matches!(api_error, ApiError::Upstream(_)));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let error: &dyn std::error::Error = &UpstreamHttpError {
            status: 404,
            path: "p".to_string(),
            body: json!({}),
        };
        let _ = error;
    }
}

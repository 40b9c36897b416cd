//! Authenticated HTTP client for the Etsy resource API.
//!
//! This module provides the [`ApiClient`] type: a thin GET/PATCH wrapper
//! that attaches the bearer token and API-key header to every call and
//! normalizes responses into `Result<Option<serde_json::Value>, ApiError>`.

use std::collections::HashMap;

use crate::clients::errors::{ApiError, UpstreamHttpError};
use crate::config::DashboardConfig;

/// Crate version from Cargo.toml, reported in the User-Agent header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body encoding for PATCH requests.
///
/// The upstream API is strict about which encoding each field accepts:
/// the auto-renew flag must be JSON, while tags and materials must be
/// form-urlencoded with array values comma-joined. This is an external
/// contract, not a style choice, so the encoding travels with the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchBody {
    /// JSON body (`application/json`).
    Json(serde_json::Value),
    /// Form-urlencoded body (`application/x-www-form-urlencoded`); array
    /// fields must already be comma-joined by the caller.
    Form(Vec<(String, String)>),
}

impl PatchBody {
    /// Returns the MIME type for this encoding.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    /// Serializes the body to its wire form.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Form(pairs) => pairs
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&"),
        }
    }
}

/// HTTP client for the Etsy resource API.
///
/// The client handles:
/// - base URL construction from the configured API base
/// - default headers: `Authorization: Bearer`, `x-api-key`, `Accept`
/// - response normalization: `204` becomes `Ok(None)`, other 2xx bodies
///   are parsed JSON, non-2xx becomes a typed [`UpstreamHttpError`]
///
/// No retries: a failed call surfaces immediately.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`, safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// let client = ApiClient::new(&config, &session.access_token);
/// let shops = client.get(&format!("application/users/{user_id}/shops")).await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g. `https://api.etsy.com/v3`), no trailing slash.
    base_url: String,
    /// Default headers attached to every request.
    default_headers: HashMap<String, String>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a new client bound to one access token.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created, which
    /// only happens on TLS initialization failure.
    #[must_use]
    pub fn new(config: &DashboardConfig, access_token: &str) -> Self {
        let base_url = config.api_base().trim_end_matches('/').to_string();

        let mut default_headers = HashMap::new();
        default_headers.insert(
            "User-Agent".to_string(),
            format!("Etsy Dashboard v{CLIENT_VERSION}"),
        );
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "x-api-key".to_string(),
            config.client_id().as_ref().to_string(),
        );
        if !access_token.is_empty() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("Bearer {access_token}"),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            default_headers,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an authenticated GET request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upstream`] for non-2xx responses and
    /// [`ApiError::Network`] for transport failures.
    pub async fn get(&self, path: &str) -> Result<Option<serde_json::Value>, ApiError> {
        self.get_with_query(path, &[]).await
    }

    /// Sends an authenticated GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let mut builder = self.client.get(self.url_for(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.dispatch(path, builder).await
    }

    /// Sends an authenticated PATCH request with the given body encoding.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn patch(
        &self,
        path: &str,
        body: &PatchBody,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let builder = self
            .client
            .patch(self.url_for(path))
            .header("Content-Type", body.content_type())
            .body(body.encode());
        self.dispatch(path, builder).await
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends the request and normalizes the response.
    ///
    /// `204 No Content` (or any 2xx with an empty body) is a defined
    /// success returning `None`; a non-empty 2xx body is parsed as JSON;
    /// a malformed body never fails the normalization itself.
    async fn dispatch(
        &self,
        path: &str,
        mut builder: reqwest::RequestBuilder,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        if (200..=299).contains(&status) {
            if status == 204 || text.is_empty() {
                return Ok(None);
            }
            let body = serde_json::from_str(&text).unwrap_or_else(|_| {
                tracing::warn!("Unparseable success body from upstream at {path}");
                serde_json::json!({ "raw_body": text })
            });
            return Ok(Some(body));
        }

        // Best-effort body parse; a malformed error body degrades to a
        // status-plus-raw-text failure rather than a parse error.
        let body = serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::json!({ "raw_body": text }));

        Err(UpstreamHttpError {
            status,
            path: path.trim_start_matches('/').to_string(),
            body,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, RedirectUri, SessionSecret};
    use serde_json::json;

    fn test_config() -> DashboardConfig {
        DashboardConfig::builder()
            .client_id(ClientId::new("test-keystring").unwrap())
            .session_secret(SessionSecret::new("test-secret").unwrap())
            .redirect_uri(RedirectUri::new("http://localhost:3003/oauth/redirect").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_attaches_bearer_and_api_key_headers() {
        let client = ApiClient::new(&test_config(), "12345.access-token");

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer 12345.access-token".to_string())
        );
        assert_eq!(
            client.default_headers().get("x-api-key"),
            Some(&"test-keystring".to_string())
        );
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_no_authorization_header_when_token_empty() {
        let client = ApiClient::new(&test_config(), "");
        assert!(client.default_headers().get("Authorization").is_none());
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = DashboardConfig::builder()
            .client_id(ClientId::new("k").unwrap())
            .session_secret(SessionSecret::new("s").unwrap())
            .redirect_uri(RedirectUri::new("http://localhost/cb").unwrap())
            .api_base("http://127.0.0.1:9000/v3/")
            .build()
            .unwrap();
        let client = ApiClient::new(&config, "token");
        assert_eq!(client.base_url(), "http://127.0.0.1:9000/v3");
    }

    #[test]
    fn test_url_for_joins_path_without_double_slash() {
        let client = ApiClient::new(&test_config(), "token");
        assert_eq!(
            client.url_for("/application/openapi-ping"),
            "https://api.etsy.com/v3/application/openapi-ping"
        );
        assert_eq!(
            client.url_for("application/openapi-ping"),
            "https://api.etsy.com/v3/application/openapi-ping"
        );
    }

    #[test]
    fn test_patch_body_content_types() {
        let json_body = PatchBody::Json(json!({"should_auto_renew": true}));
        assert_eq!(json_body.content_type(), "application/json");

        let form_body = PatchBody::Form(vec![("tags".to_string(), "a,b".to_string())]);
        assert_eq!(
            form_body.content_type(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_form_body_encoding_joins_and_escapes() {
        let body = PatchBody::Form(vec![
            ("tags".to_string(), "hand made,blue & white".to_string()),
            ("state".to_string(), "active".to_string()),
        ]);
        assert_eq!(
            body.encode(),
            "tags=hand%20made%2Cblue%20%26%20white&state=active"
        );
    }

    #[test]
    fn test_json_body_encoding_is_compact_json() {
        let body = PatchBody::Json(json!({"should_auto_renew": false}));
        assert_eq!(body.encode(), r#"{"should_auto_renew":false}"#);
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiClient>();
    }
}

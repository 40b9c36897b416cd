//! Configuration types for the dashboard core.
//!
//! This module provides the immutable configuration constructed once at
//! startup and passed explicitly to every component. No component reads
//! ambient process state; the web layer is expected to pull environment
//! variables, build a [`DashboardConfig`], and fail fast if the required
//! values are absent.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`DashboardConfig`]: the configuration struct holding all settings
//! - [`DashboardConfigBuilder`]: a builder for constructing it
//! - [`ClientId`]: a validated Etsy keystring newtype
//! - [`SessionSecret`]: a validated secret newtype with masked debug output
//! - [`RedirectUri`]: a validated OAuth redirect URI
//!
//! # Example
//!
//! ```rust
//! use etsy_dashboard::{DashboardConfig, ClientId, SessionSecret, RedirectUri};
//!
//! let config = DashboardConfig::builder()
//!     .client_id(ClientId::new("my-keystring").unwrap())
//!     .session_secret(SessionSecret::new("my-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("http://localhost:3003/oauth/redirect").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.listings_per_page(), 20);
//! ```

mod newtypes;

pub use newtypes::{ClientId, RedirectUri, SessionSecret};

use crate::auth::Scopes;
use crate::error::ConfigError;

/// Default Etsy authorization endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://www.etsy.com/oauth/connect";

/// Default Etsy token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://api.etsy.com/v3/public/oauth/token";

/// Default base URL for the versioned resource API.
pub const DEFAULT_API_BASE: &str = "https://api.etsy.com/v3";

/// Default dashboard page size for listing views.
pub const LISTINGS_PER_PAGE: u64 = 20;

/// Default dashboard page size for order views.
pub const ORDERS_PER_PAGE: u64 = 25;

/// Configuration for the dashboard core.
///
/// Holds the OAuth client identity, the endpoints to talk to, and the
/// fixed local page sizes. The endpoint fields default to the real Etsy
/// URLs and exist as fields so tests can point them at a mock server.
///
/// # Thread Safety
///
/// `DashboardConfig` is `Clone`, `Send`, and `Sync`, making it safe to
/// share across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use etsy_dashboard::{DashboardConfig, ClientId, SessionSecret, RedirectUri};
///
/// let config = DashboardConfig::builder()
///     .client_id(ClientId::new("keystring").unwrap())
///     .session_secret(SessionSecret::new("secret").unwrap())
///     .redirect_uri(RedirectUri::new("http://localhost:3003/oauth/redirect").unwrap())
///     .build()
///     .unwrap();
///
/// assert!(config.api_base().starts_with("https://api.etsy.com"));
/// ```
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    client_id: ClientId,
    session_secret: SessionSecret,
    redirect_uri: RedirectUri,
    scopes: Scopes,
    auth_url: String,
    token_url: String,
    api_base: String,
    listings_per_page: u64,
    orders_per_page: u64,
}

impl DashboardConfig {
    /// Creates a new builder for constructing a `DashboardConfig`.
    #[must_use]
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::new()
    }

    /// Returns the client id (Etsy keystring).
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the session-signing secret.
    #[must_use]
    pub const fn session_secret(&self) -> &SessionSecret {
        &self.session_secret
    }

    /// Returns the OAuth redirect URI.
    #[must_use]
    pub const fn redirect_uri(&self) -> &RedirectUri {
        &self.redirect_uri
    }

    /// Returns the OAuth scopes requested at login.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Returns the authorization endpoint URL.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the base URL of the versioned resource API.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the dashboard page size for listing views.
    #[must_use]
    pub const fn listings_per_page(&self) -> u64 {
        self.listings_per_page
    }

    /// Returns the dashboard page size for order views.
    #[must_use]
    pub const fn orders_per_page(&self) -> u64 {
        self.orders_per_page
    }
}

// Verify DashboardConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DashboardConfig>();
};

/// Builder for constructing [`DashboardConfig`] instances.
///
/// Required fields are `client_id`, `session_secret`, and `redirect_uri`.
/// All other fields have defaults.
///
/// # Defaults
///
/// - `scopes`: the dashboard scope set ([`Scopes::default`])
/// - `auth_url` / `token_url` / `api_base`: the real Etsy endpoints
/// - `listings_per_page`: 20
/// - `orders_per_page`: 25
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    client_id: Option<ClientId>,
    session_secret: Option<SessionSecret>,
    redirect_uri: Option<RedirectUri>,
    scopes: Option<Scopes>,
    auth_url: Option<String>,
    token_url: Option<String>,
    api_base: Option<String>,
    listings_per_page: Option<u64>,
    orders_per_page: Option<u64>,
}

impl DashboardConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client id (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the session secret (required).
    #[must_use]
    pub fn session_secret(mut self, secret: SessionSecret) -> Self {
        self.session_secret = Some(secret);
        self
    }

    /// Sets the OAuth redirect URI (required).
    #[must_use]
    pub fn redirect_uri(mut self, uri: RedirectUri) -> Self {
        self.redirect_uri = Some(uri);
        self
    }

    /// Sets the OAuth scopes requested at login.
    #[must_use]
    pub fn scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Overrides the authorization endpoint URL.
    #[must_use]
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Overrides the token endpoint URL.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Overrides the resource API base URL.
    #[must_use]
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Sets the dashboard page size for listing views.
    #[must_use]
    pub const fn listings_per_page(mut self, size: u64) -> Self {
        self.listings_per_page = Some(size);
        self
    }

    /// Sets the dashboard page size for order views.
    #[must_use]
    pub const fn orders_per_page(mut self, size: u64) -> Self {
        self.orders_per_page = Some(size);
        self
    }

    /// Builds the [`DashboardConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id`,
    /// `session_secret`, or `redirect_uri` are not set, and
    /// [`ConfigError::ZeroPageSize`] if a page size was set to zero.
    pub fn build(self) -> Result<DashboardConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let session_secret = self
            .session_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "session_secret",
            })?;
        let redirect_uri = self
            .redirect_uri
            .ok_or(ConfigError::MissingRequiredField {
                field: "redirect_uri",
            })?;

        let listings_per_page = self.listings_per_page.unwrap_or(LISTINGS_PER_PAGE);
        if listings_per_page == 0 {
            return Err(ConfigError::ZeroPageSize { list: "listings" });
        }
        let orders_per_page = self.orders_per_page.unwrap_or(ORDERS_PER_PAGE);
        if orders_per_page == 0 {
            return Err(ConfigError::ZeroPageSize { list: "orders" });
        }

        Ok(DashboardConfig {
            client_id,
            session_secret,
            redirect_uri,
            scopes: self.scopes.unwrap_or_default(),
            auth_url: self.auth_url.unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: self
                .token_url
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_base: self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            listings_per_page,
            orders_per_page,
        })
    }
}

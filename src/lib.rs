//! # Etsy Dashboard Core
//!
//! The server-side core of an Etsy shop-management dashboard: type-safe
//! configuration, OAuth 2.0 authorization-code flow with PKCE, paginated
//! aggregation over the upstream list endpoints, and listing mutation
//! services. The web layer (routes, templates, session store) sits on
//! top of this crate.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`DashboardConfig`] and [`DashboardConfigBuilder`]
//! - Validated newtypes for the OAuth client identity
//! - The OAuth login flow via [`auth::oauth`], with the session-held
//!   state machine in [`auth::AuthPhase`]
//! - An authenticated upstream client via [`clients::ApiClient`] with
//!   normalized error handling
//! - Two pagination strategies via [`pagination`]: direct (trusting
//!   upstream counts) and full-scan (honest windows over local filters)
//! - Listing mutations via [`mutations`]: the auto-renew toggle and the
//!   tags/materials editor
//! - View-count rankings via [`stats`]
//!
//! ## Quick Start
//!
//! ```rust
//! use etsy_dashboard::{DashboardConfig, ClientId, SessionSecret, RedirectUri};
//!
//! // Create configuration using the builder pattern
//! let config = DashboardConfig::builder()
//!     .client_id(ClientId::new("your-keystring").unwrap())
//!     .session_secret(SessionSecret::new("your-session-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("http://localhost:3003/oauth/redirect").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Login Flow
//!
//! ```rust,ignore
//! use etsy_dashboard::auth::{begin_login, handle_callback, AuthPhase};
//!
//! // Entry point: build the redirect and persist the pending material.
//! let begun = begin_login(&config);
//! session_store.save(AuthPhase::PendingCallback(begun.pending))?;
//! // redirect the browser to begun.auth_url
//!
//! // Redirect callback: validate, exchange, persist.
//! let authenticated = handle_callback(&config, &phase, &code, &state).await?;
//! session_store.save(AuthPhase::Authenticated(authenticated))?;
//! ```
//!
//! ## Listing Pages
//!
//! ```rust,ignore
//! use etsy_dashboard::clients::ApiClient;
//! use etsy_dashboard::pagination::{paginate_filtered, ListingFilter, ScanPolicy};
//!
//! let client = ApiClient::new(&config, &session.access_token);
//! let filter = ListingFilter { section_id: None, search: Some("mug".into()) };
//! let page = paginate_filtered(
//!     &client,
//!     &format!("application/shops/{shop_id}/listings/active"),
//!     &[],
//!     &filter,
//!     &ScanPolicy::default(),
//!     requested_page,
//!     config.listings_per_page(),
//! )
//! .await?;
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod mutations;
pub mod pagination;
pub mod resources;
pub mod stats;

pub use auth::{AuthPhase, AuthenticatedSession, PendingCallback, Scopes};
pub use clients::{ApiClient, ApiError, PatchBody, UpstreamHttpError};
pub use config::{ClientId, DashboardConfig, DashboardConfigBuilder, RedirectUri, SessionSecret};
pub use error::ConfigError;
pub use mutations::{MutationError, MutationOutcome, TagsMaterialsUpdate};
pub use pagination::{Page, PageWindow, ScanPolicy};
pub use resources::{Listing, Money, OrderStatusFilter, Receipt, ResourceList, Shop};
pub use stats::ListingStats;

//! Authentication for the dashboard: OAuth 2.0 authorization-code flow
//! with PKCE, and the session-held state machine around it.
//!
//! # Overview
//!
//! - [`Scopes`]: the ordered, deduplicated OAuth scope set
//! - [`PkceChallenge`]: per-attempt verifier/challenge/state material
//! - [`AuthPhase`]: the session phase (anonymous, pending, authenticated)
//! - [`oauth`]: the login entry point and redirect callback operations
//!
//! Token refresh is deliberately not wired up: the refresh token is stored
//! but unused, and an expired access token surfaces as upstream 401s until
//! the user logs in again.

pub mod oauth;
mod pkce;
mod scopes;
mod session;

pub use oauth::{begin_login, handle_callback, resolve_shop, BeginLoginResult, OAuthError};
pub use pkce::PkceChallenge;
pub use scopes::Scopes;
pub use session::{AuthPhase, AuthenticatedSession, PendingCallback};

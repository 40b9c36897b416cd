//! The OAuth 2.0 authorization-code flow with PKCE.
//!
//! Two operations drive the whole flow:
//!
//! - [`begin_login`] builds the authorization URL and the pending material
//!   the web layer must persist into the session before redirecting.
//! - [`handle_callback`] validates the redirect, exchanges the code for
//!   tokens, and returns the authenticated session.
//!
//! The functions are side-effect free with respect to session storage:
//! they take and return phase values, and the web layer owns persisting
//! them. In particular the callback consumes the pending material whether
//! it succeeds or fails, so the caller must always replace the phase.
//!
//! # Example
//!
//! ```rust,ignore
//! let begun = begin_login(&config);
//! // persist AuthPhase::PendingCallback(begun.pending), then redirect to
//! // begun.auth_url. Later, on the redirect callback:
//! let session = handle_callback(&config, &phase, code, state).await?;
//! // persist AuthPhase::Authenticated(session)
//! ```

mod error;

pub use error::OAuthError;

use serde::Deserialize;
use subtle::ConstantTimeEq;

use crate::auth::pkce::PkceChallenge;
use crate::auth::session::{AuthenticatedSession, AuthPhase, PendingCallback};
use crate::clients::{ApiClient, ApiError};
use crate::config::DashboardConfig;
use crate::resources::Shop;

/// The outcome of starting a login attempt.
#[derive(Clone, Debug)]
pub struct BeginLoginResult {
    /// Fully formed authorization URL to redirect the browser to.
    pub auth_url: String,
    /// The verifier and state the session must hold until the callback.
    pub pending: PendingCallback,
}

/// The token endpoint's success payload.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: i64,
}

/// Starts a login attempt: generates fresh PKCE material and builds the
/// authorization URL.
///
/// Each call produces an independent verifier, challenge, and state; a
/// repeated login before the callback simply replaces the previous pending
/// material, invalidating the older attempt.
///
/// The caller must persist [`BeginLoginResult::pending`] into the session
/// before issuing the redirect, or the callback will have nothing to match
/// against.
#[must_use]
pub fn begin_login(config: &DashboardConfig) -> BeginLoginResult {
    let pkce = PkceChallenge::generate();

    let auth_url = format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}&code_challenge={}&code_challenge_method=S256",
        config.auth_url(),
        urlencoding::encode(config.client_id().as_ref()),
        urlencoding::encode(config.redirect_uri().as_ref()),
        urlencoding::encode(&config.scopes().to_string()),
        pkce.state,
        pkce.challenge,
    );

    BeginLoginResult {
        auth_url,
        pending: PendingCallback {
            state: pkce.state,
            verifier: pkce.verifier,
        },
    }
}

/// Handles the OAuth redirect callback: validates the state, exchanges the
/// authorization code for tokens, and resolves the user's shop.
///
/// Validation happens strictly before any network traffic:
///
/// 1. The session must hold a pending login and the callback must carry a
///    non-empty code, or [`OAuthError::MissingCredentials`] is returned.
/// 2. The callback state must equal the pending state (compared in
///    constant time), or [`OAuthError::InvalidState`] is returned.
///
/// Only then is the token endpoint contacted. After a successful exchange
/// the user id is derived from the access token's leading numeric segment
/// and the user's shop is resolved best-effort: a shop lookup failure is
/// logged and leaves `shop_id` as `None` rather than failing the login.
///
/// # Errors
///
/// Returns [`OAuthError::MissingCredentials`], [`OAuthError::InvalidState`],
/// [`OAuthError::TokenExchangeFailed`] when the token endpoint answers
/// non-2xx, or [`OAuthError::Transport`] on transport failure.
pub async fn handle_callback(
    config: &DashboardConfig,
    phase: &AuthPhase,
    code: &str,
    state: &str,
) -> Result<AuthenticatedSession, OAuthError> {
    let Some(pending) = phase.pending() else {
        return Err(OAuthError::MissingCredentials);
    };
    if code.is_empty() {
        return Err(OAuthError::MissingCredentials);
    }

    // Constant-time comparison; a length mismatch is still a mismatch.
    let matches = pending.state.len() == state.len()
        && bool::from(pending.state.as_bytes().ct_eq(state.as_bytes()));
    if !matches {
        return Err(OAuthError::InvalidState);
    }

    let token = exchange_code(config, code, &pending.verifier).await?;

    // The access token is "{user_id}.{opaque}"; the numeric prefix is the
    // only user identity the dashboard needs.
    let user_id = token
        .access_token
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string();

    let client = ApiClient::new(config, &token.access_token);
    let shop_id = match resolve_shop(&client, &user_id).await {
        Ok(shop) => shop.map(|shop| shop.shop_id),
        Err(error) => {
            tracing::warn!("Shop lookup failed after login for user {user_id}: {error}");
            None
        }
    };

    Ok(AuthenticatedSession {
        expires_at: AuthenticatedSession::expiry_from_now(token.expires_in),
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        user_id,
        shop_id,
    })
}

/// POSTs the authorization code and verifier to the token endpoint.
async fn exchange_code(
    config: &DashboardConfig,
    code: &str,
    verifier: &str,
) -> Result<TokenResponse, OAuthError> {
    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .build()
        .map_err(OAuthError::Transport)?;

    let response = client
        .post(config.token_url())
        .json(&serde_json::json!({
            "grant_type": "authorization_code",
            "client_id": config.client_id().as_ref(),
            "redirect_uri": config.redirect_uri().as_ref(),
            "code": code,
            "code_verifier": verifier,
        }))
        .send()
        .await?;

    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    if !(200..=299).contains(&status) {
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|body| {
                body.get("error_description")
                    .or_else(|| body.get("error"))
                    .and_then(|v| v.as_str())
                    .map(String::from)
            })
            .unwrap_or(text);
        return Err(OAuthError::TokenExchangeFailed { status, message });
    }

    serde_json::from_str(&text).map_err(|_| OAuthError::TokenExchangeFailed {
        status,
        message: "malformed token response".to_string(),
    })
}

/// Resolves the shop bound to a user.
///
/// The upstream user-shops endpoint returns a single shop object for a
/// seller account, or an empty body for an account with no shop.
///
/// # Errors
///
/// Returns [`ApiError`] when the lookup request fails.
pub async fn resolve_shop(client: &ApiClient, user_id: &str) -> Result<Option<Shop>, ApiError> {
    let Some(body) = client
        .get(&format!("application/users/{user_id}/shops"))
        .await?
    else {
        return Ok(None);
    };

    match serde_json::from_value::<Shop>(body) {
        Ok(shop) => Ok(Some(shop)),
        Err(error) => {
            tracing::warn!("Unrecognized shop payload for user {user_id}: {error}");
            Ok(None)
        }
    }
}

//! Session state for the OAuth flow.
//!
//! The browser session holds exactly one [`AuthPhase`] at a time. Modeling
//! the phases as a tagged union makes illegal combinations (a confirmed
//! access token coexisting with a pending verifier) unrepresentable.
//!
//! The session store itself — the cookie-bound server-side store — is an
//! external collaborator. This crate only defines what it holds and how the
//! phases transition; persistence is the web layer's job, and the phase must
//! be written back before the response that depends on it goes out.
//!
//! # Lifecycle
//!
//! ```text
//! Anonymous --begin_login--> PendingCallback --handle_callback--> Authenticated
//!     ^                                                               |
//!     +---------------------- logout / expiry ----------------------+
//! ```
//!
//! Concurrent requests against the same session can interleave writes (two
//! simultaneous logins overwrite each other's pending phase). That race is
//! accepted for a single-user dashboard; the store's atomic load/save per
//! request is the only consistency mechanism.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The transient state persisted between starting a login and receiving
/// the redirect callback.
///
/// Both fields are single use: the callback consumes them (successfully or
/// not) and the caller must replace the phase so a replayed callback finds
/// nothing to match against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCallback {
    /// The CSRF state nonce embedded in the authorization URL.
    pub state: String,
    /// The PKCE code verifier to present at token exchange.
    pub verifier: String,
}

/// The token material held after a successful callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    /// Bearer token for the resource API.
    pub access_token: String,
    /// Refresh token as issued. Refresh is not wired up; an expired access
    /// token surfaces as an upstream 401.
    pub refresh_token: String,
    /// Instant the access token expires.
    pub expires_at: DateTime<Utc>,
    /// Numeric user id, extracted from the access token's leading segment.
    pub user_id: String,
    /// Shop bound to the user, resolved best-effort once per login.
    pub shop_id: Option<u64>,
}

impl AuthenticatedSession {
    /// Returns `true` if the access token has passed its expiry instant.
    #[must_use]
    pub fn expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Computes the expiry instant from a token response's `expires_in`
    /// seconds, anchored at now.
    #[must_use]
    pub fn expiry_from_now(expires_in: i64) -> DateTime<Utc> {
        Utc::now() + Duration::seconds(expires_in)
    }
}

/// The session-held phase of the OAuth state machine.
///
/// Serialized into the server-side session record by the web layer;
/// `Anonymous` is the default for a fresh session.
///
/// # Example
///
/// ```rust
/// use etsy_dashboard::auth::AuthPhase;
///
/// let phase = AuthPhase::default();
/// assert!(!phase.is_authenticated());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AuthPhase {
    /// No login in progress and no tokens held.
    #[default]
    Anonymous,
    /// A login attempt is awaiting its redirect callback.
    PendingCallback(PendingCallback),
    /// Tokens acquired; protected routes are available.
    Authenticated(AuthenticatedSession),
}

impl AuthPhase {
    /// Returns `true` if this phase carries an access token.
    ///
    /// This is the capability check behind protected routes: absence means
    /// redirect to the login entry point, not an error.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the authenticated session, if this phase holds one.
    #[must_use]
    pub const fn authenticated(&self) -> Option<&AuthenticatedSession> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Returns the pending callback material, if this phase holds it.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingCallback> {
        match self {
            Self::PendingCallback(pending) => Some(pending),
            _ => None,
        }
    }

    /// Transitions to `Anonymous` unconditionally.
    ///
    /// The web layer pairs this with destroying the session record and
    /// clearing the cookie.
    #[must_use]
    pub fn logout(self) -> Self {
        Self::Anonymous
    }
}

// Verify AuthPhase is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthPhase>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated_session() -> AuthenticatedSession {
        AuthenticatedSession {
            access_token: "12345.token-body".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            user_id: "12345".to_string(),
            shop_id: Some(777),
        }
    }

    #[test]
    fn test_default_phase_is_anonymous() {
        assert_eq!(AuthPhase::default(), AuthPhase::Anonymous);
    }

    #[test]
    fn test_is_authenticated_only_for_authenticated_phase() {
        assert!(!AuthPhase::Anonymous.is_authenticated());
        assert!(!AuthPhase::PendingCallback(PendingCallback {
            state: "s".to_string(),
            verifier: "v".to_string(),
        })
        .is_authenticated());
        assert!(AuthPhase::Authenticated(authenticated_session()).is_authenticated());
    }

    #[test]
    fn test_logout_always_returns_anonymous() {
        assert_eq!(
            AuthPhase::Authenticated(authenticated_session()).logout(),
            AuthPhase::Anonymous
        );
        assert_eq!(AuthPhase::Anonymous.logout(), AuthPhase::Anonymous);
    }

    #[test]
    fn test_expired_session() {
        let mut session = authenticated_session();
        assert!(!session.expired());

        session.expires_at = Utc::now() - Duration::hours(1);
        assert!(session.expired());
    }

    #[test]
    fn test_expiry_from_now_is_in_the_future() {
        let expiry = AuthenticatedSession::expiry_from_now(3600);
        assert!(expiry > Utc::now() + Duration::minutes(59));
    }

    #[test]
    fn test_phase_serde_round_trip() {
        let phase = AuthPhase::PendingCallback(PendingCallback {
            state: "abc".to_string(),
            verifier: "def".to_string(),
        });
        let json = serde_json::to_string(&phase).unwrap();
        assert!(json.contains("pending_callback"));
        let back: AuthPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phase);

        let phase = AuthPhase::Authenticated(authenticated_session());
        let json = serde_json::to_string(&phase).unwrap();
        let back: AuthPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phase);
    }

    #[test]
    fn test_tokens_never_coexist_with_pending_fields() {
        // The tagged union makes the illegal combination unrepresentable;
        // accessors prove the phases are mutually exclusive.
        let pending_phase = AuthPhase::PendingCallback(PendingCallback {
            state: "s".to_string(),
            verifier: "v".to_string(),
        });
        assert!(pending_phase.authenticated().is_none());

        let auth_phase = AuthPhase::Authenticated(authenticated_session());
        assert!(auth_phase.pending().is_none());
    }
}

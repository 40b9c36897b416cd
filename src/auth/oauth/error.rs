//! Error types for the OAuth login flow.

use crate::clients::ApiError;

/// Errors surfaced by the login entry point and redirect callback.
///
/// `InvalidState` and `MissingCredentials` are terminal for the attempt:
/// the caller clears the pending phase and sends the user back to the
/// login entry point. Neither variant ever triggers a network call.
#[derive(thiserror::Error, Debug)]
pub enum OAuthError {
    /// The callback's `state` did not match the session's pending nonce,
    /// or there was no pending login to match against.
    #[error("OAuth state mismatch; possible CSRF or replayed callback")]
    InvalidState,

    /// The callback arrived without an authorization code, or the session
    /// holds no pending verifier.
    #[error("OAuth callback missing required credentials")]
    MissingCredentials,

    /// The token endpoint rejected the exchange.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Upstream error message, best effort.
        message: String,
    },

    /// A transport or upstream failure outside the token exchange itself.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The token exchange transport failed before a status was available.
    #[error("Token request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            OAuthError::InvalidState.to_string(),
            "OAuth state mismatch; possible CSRF or replayed callback"
        );
        assert_eq!(
            OAuthError::MissingCredentials.to_string(),
            "OAuth callback missing required credentials"
        );
        let err = OAuthError::TokenExchangeFailed {
            status: 400,
            message: "invalid_grant".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Token exchange failed with status 400: invalid_grant"
        );
    }
}

//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear
//! error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Etsy client id (the app keystring).
///
/// This newtype ensures the client id is non-empty and provides type safety
/// to prevent accidental misuse of raw strings. The same value doubles as
/// the `x-api-key` header on every upstream request.
///
/// # Example
///
/// ```rust
/// use etsy_dashboard::ClientId;
///
/// let id = ClientId::new("my-keystring").unwrap();
/// assert_eq!(id.as_ref(), "my-keystring");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated session-signing secret.
///
/// This newtype ensures the secret is non-empty and masks its value in
/// debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `SessionSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use etsy_dashboard::SessionSecret;
///
/// let secret = SessionSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "SessionSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSecret(String);

impl SessionSecret {
    /// Creates a new validated session secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySessionSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySessionSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for SessionSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(*****)")
    }
}

/// A validated OAuth redirect URI.
///
/// The redirect URI must be an absolute `http` or `https` URL; it is sent
/// verbatim in the authorization URL and the token-exchange body, and the
/// two must match exactly for the exchange to succeed.
///
/// # Example
///
/// ```rust
/// use etsy_dashboard::RedirectUri;
///
/// let uri = RedirectUri::new("http://localhost:3003/oauth/redirect").unwrap();
/// assert_eq!(uri.as_ref(), "http://localhost:3003/oauth/redirect");
///
/// assert!(RedirectUri::new("localhost/callback").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectUri(String);

impl RedirectUri {
    /// Creates a new validated redirect URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRedirectUri`] if the URI is not an
    /// absolute http(s) URL.
    pub fn new(uri: impl Into<String>) -> Result<Self, ConfigError> {
        let uri = uri.into();
        let valid = (uri.starts_with("http://") || uri.starts_with("https://"))
            && uri.len() > "https://".len()
            && !uri.contains(char::is_whitespace);
        if !valid {
            return Err(ConfigError::InvalidRedirectUri { uri });
        }
        Ok(Self(uri))
    }
}

impl AsRef<str> for RedirectUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedirectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_empty() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
    }

    #[test]
    fn test_client_id_accepts_keystring() {
        let id = ClientId::new("abc123keystring").unwrap();
        assert_eq!(id.as_ref(), "abc123keystring");
    }

    #[test]
    fn test_session_secret_rejects_empty() {
        assert!(matches!(
            SessionSecret::new(""),
            Err(ConfigError::EmptySessionSecret)
        ));
    }

    #[test]
    fn test_session_secret_debug_is_masked() {
        let secret = SessionSecret::new("super-secret-value").unwrap();
        let debug = format!("{secret:?}");
        assert_eq!(debug, "SessionSecret(*****)");
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_redirect_uri_accepts_http_and_https() {
        assert!(RedirectUri::new("http://localhost:3003/oauth/redirect").is_ok());
        assert!(RedirectUri::new("https://dashboard.example.com/oauth/redirect").is_ok());
    }

    #[test]
    fn test_redirect_uri_rejects_relative_and_malformed() {
        assert!(RedirectUri::new("/oauth/redirect").is_err());
        assert!(RedirectUri::new("ftp://example.com/cb").is_err());
        assert!(RedirectUri::new("https://").is_err());
        assert!(RedirectUri::new("https://bad host/cb").is_err());
    }

    #[test]
    fn test_redirect_uri_display_round_trips() {
        let uri = RedirectUri::new("http://localhost:3003/oauth/redirect").unwrap();
        assert_eq!(uri.to_string(), "http://localhost:3003/oauth/redirect");
    }
}

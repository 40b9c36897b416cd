//! OAuth scope handling.
//!
//! Etsy scopes are space-delimited in the authorization URL. This module
//! provides the [`Scopes`] type for parsing, normalizing, and formatting
//! scope sets.
//!
//! # Example
//!
//! ```rust
//! use etsy_dashboard::Scopes;
//!
//! let scopes: Scopes = "listings_r listings_w".parse().unwrap();
//! assert!(scopes.contains("listings_r"));
//! assert_eq!(scopes.to_string(), "listings_r listings_w");
//! ```

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The scope set the dashboard requests at login.
const DASHBOARD_SCOPES: [&str; 5] = [
    "email_r",
    "shops_r",
    "listings_r",
    "listings_w",
    "transactions_r",
];

/// An ordered, deduplicated set of OAuth scopes.
///
/// Scopes compare and serialize in insertion order with duplicates removed.
/// Parsing accepts space- or comma-delimited input; formatting is always
/// space-delimited (the form the authorization URL requires, before URL
/// encoding).
///
/// # Thread Safety
///
/// `Scopes` is `Send + Sync`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scopes(Vec<String>);

impl Scopes {
    /// Creates an empty scope set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` if the set contains the given scope.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.0.iter().any(|s| s == scope)
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of scopes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the scopes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for Scopes {
    /// The dashboard's standard scope set: read access to the account,
    /// shop, listings, and transactions, plus listing write access.
    fn default() -> Self {
        Self(DASHBOARD_SCOPES.iter().map(ToString::to_string).collect())
    }
}

impl FromStr for Scopes {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = Vec::new();
        for scope in s.split([' ', ',']) {
            let scope = scope.trim();
            if !scope.is_empty() && !scopes.iter().any(|existing| existing == scope) {
                scopes.push(scope.to_string());
            }
        }
        Ok(Self(scopes))
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

// Verify Scopes is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Scopes>();
};

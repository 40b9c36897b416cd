//! PKCE challenge generation for the OAuth authorization-code flow.
//!
//! Etsy requires Proof Key for Code Exchange (RFC 7636) on its
//! authorization-code flow. This module produces the verifier/challenge
//! pair plus the CSRF state nonce for a single login attempt.
//!
//! # Overview
//!
//! One [`PkceChallenge`] is generated per login attempt:
//!
//! 1. The `challenge` and `state` go into the authorization URL.
//! 2. The `verifier` and `state` are persisted server-side, keyed by the
//!    browser session, until the redirect callback consumes them.
//! 3. The pair is single use: the callback clears it whether or not the
//!    token exchange succeeds.
//!
//! # Example
//!
//! ```rust
//! use etsy_dashboard::auth::PkceChallenge;
//!
//! let pkce = PkceChallenge::generate();
//! assert_eq!(pkce.verifier.len(), 43); // base64url of 32 bytes, no padding
//! assert_eq!(pkce.challenge, PkceChallenge::challenge_for(&pkce.verifier));
//! ```

use base64::prelude::*;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes behind the code verifier.
const VERIFIER_BYTES: usize = 32;

/// Number of random bytes behind the state nonce.
const STATE_BYTES: usize = 16;

/// A verifier/challenge/state triple for one authorization attempt.
///
/// The verifier is the locally held secret; the challenge is its S256
/// commitment sent to the authorization endpoint; the state is an
/// independent CSRF nonce, not derived from the verifier.
///
/// # Thread Safety
///
/// `PkceChallenge` is `Send + Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PkceChallenge {
    /// Base64url (no padding) encoding of 32 cryptographically random bytes.
    pub verifier: String,
    /// `base64url(SHA-256(verifier_bytes))` per RFC 7636 S256.
    pub challenge: String,
    /// Hex encoding of 16 independent random bytes, used purely as a
    /// CSRF nonce.
    pub state: String,
}

impl PkceChallenge {
    /// Generates a fresh verifier/challenge/state triple from the OS RNG.
    ///
    /// Pure function of the secure random source; no side effects. Callers
    /// persist the verifier and state into the session before redirecting.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();

        let mut verifier_bytes = [0u8; VERIFIER_BYTES];
        rng.fill_bytes(&mut verifier_bytes);
        let verifier = BASE64_URL_SAFE_NO_PAD.encode(verifier_bytes);

        let challenge = Self::challenge_for(&verifier);

        let mut state_bytes = [0u8; STATE_BYTES];
        rng.fill_bytes(&mut state_bytes);
        let state = state_bytes.iter().fold(
            String::with_capacity(STATE_BYTES * 2),
            |mut out, byte| {
                use std::fmt::Write;
                let _ = write!(out, "{byte:02x}");
                out
            },
        );

        Self {
            verifier,
            challenge,
            state,
        }
    }

    /// Computes the S256 challenge for a verifier.
    ///
    /// The digest is computed over the verifier's ASCII byte sequence (the
    /// text form, not the decoded random bytes), then base64url-encoded
    /// without padding.
    #[must_use]
    pub fn challenge_for(verifier: &str) -> String {
        let digest = Sha256::digest(verifier.as_bytes());
        BASE64_URL_SAFE_NO_PAD.encode(digest)
    }
}

// Verify PkceChallenge is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PkceChallenge>();
};

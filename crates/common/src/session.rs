//! Signed session tokens.
//!
//! The session cookie carries a signed, expiring claim over the user ID
//! (HS256 JWT) instead of a raw identifying value. The externally observed
//! contract stays the same: one opaque cookie, `HttpOnly`, `SameSite=Lax`,
//! valid for seven days.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Default session lifetime in seconds (7 days).
pub const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject: the user ID.
    sub: String,
    /// Issued-at, seconds since epoch.
    iat: i64,
    /// Expiry, seconds since epoch.
    exp: i64,
}

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    max_age_secs: u64,
}

impl SessionSigner {
    /// Create a signer from a shared secret.
    pub fn new(secret: &str, max_age_secs: u64) -> AppResult<Self> {
        if secret.is_empty() {
            return Err(AppError::Config(
                "session secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            max_age_secs,
        })
    }

    /// Session lifetime in seconds, for cookie `max_age`.
    #[must_use]
    pub const fn max_age_secs(&self) -> u64 {
        self.max_age_secs
    }

    /// Issue a signed token for a user ID.
    pub fn issue(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let max_age = i64::try_from(self.max_age_secs)
            .map_err(|e| AppError::Config(format!("Invalid session lifetime: {e}")))?;
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + max_age,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {e}")))
    }

    /// Verify a token and return the user ID it was issued for.
    ///
    /// Expired or tampered tokens fail verification; the caller treats any
    /// failure as an unauthenticated request.
    pub fn verify(&self, token: &str) -> AppResult<String> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AppError::Unauthorized("Invalid session token".to_string()))?;

        Ok(data.claims.sub)
    }
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("max_age_secs", &self.max_age_secs)
            .finish_non_exhaustive()
    }
}

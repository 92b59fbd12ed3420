use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Access token payload.
///
/// `sub` carries the username. It stays optional on the wire so that a
/// token without a subject decodes and can be rejected with its own reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `sub` - Subject to embed (the username)
    /// * `ttl` - Lifetime of the token
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration falls outside the representable range
    pub fn for_subject(sub: impl ToString, ttl: Duration) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("Expiration out of range".to_string()))?;

        Ok(Self {
            sub: Some(sub.to_string()),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Check if the token is expired.
    ///
    /// A token is only valid while its expiration instant is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

/// Claims of a token that passed signature, expiry and subject checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub subject: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
}

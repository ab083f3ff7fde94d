use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Identity claims carried by an access token.
///
/// Custom fields `user_id` and `username` plus the registered RFC 7519
/// fields `iss`, `iat`, `nbf` and `exp`. Every field is required on decode,
/// a token missing any of them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject identifier (user record id)
    pub user_id: i64,

    /// Subject display name
    pub username: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid from now until `now + ttl`.
    ///
    /// # Arguments
    /// * `user_id` - User record identifier
    /// * `username` - Username
    /// * `issuer` - Issuer name written to `iss`
    /// * `ttl` - Lifetime of the token
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` is outside the representable time range
    pub fn for_user(
        user_id: i64,
        username: impl Into<String>,
        issuer: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        Self::for_user_at(Utc::now(), user_id, username, issuer, ttl)
    }

    /// Same as [`Claims::for_user`] with an explicit issuance instant.
    pub fn for_user_at(
        now: DateTime<Utc>,
        user_id: i64,
        username: impl Into<String>,
        issuer: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let issued_at = now.timestamp();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("token lifetime out of range: {}", ttl))
        })?;

        Ok(Self {
            user_id,
            username: username.into(),
            iss: issuer.into(),
            iat: issued_at,
            nbf: issued_at,
            exp: expires_at.timestamp(),
        })
    }

    /// Set not before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = nbf;
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Check if token is not valid yet.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        self.nbf > current_timestamp
    }
}

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// The only algorithm tokens are signed and accepted with.
pub const PINNED_ALGORITHM: Algorithm = Algorithm::HS256;
const PINNED_ALGORITHM_NAME: &str = "HS256";

/// JWT token handler for issuing and verifying access tokens.
///
/// Signs with HS256 (HMAC with SHA-256). The algorithm is pinned: it is never
/// taken from the presented token.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret invalidates every token issued with the old one
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let mut validation = Validation::new(PINNED_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "nbf", "iss"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Issue a token for a user, valid from now for `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - User record identifier
    /// * `username` - Username
    /// * `issuer` - Value of the `iss` claim
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed, or `ttl` overflows the
    ///   representable expiry
    pub fn issue(
        &self,
        user_id: i64,
        username: &str,
        issuer: &str,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::for_user(user_id, username, issuer, ttl)?)
    }

    /// Sign `claims` with the pinned algorithm.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(PINNED_ALGORITHM);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - JWT token string to verify
    ///
    /// # Returns
    /// The embedded claims, unchanged
    ///
    /// # Errors
    /// * `MalformedToken` - Token cannot be decoded or lacks required claims
    /// * `InvalidSignature` - Signature mismatch, or a declared algorithm other than HS256
    /// * `TokenExpired` - `exp` is in the past
    /// * `TokenNotYetValid` - `nbf` is in the future
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        check_declared_algorithm(token)?;

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        Ok(token_data.claims)
    }
}

/// Read the `alg` header field without trusting anything else in the token.
///
/// Done by hand because `jsonwebtoken` refuses to parse headers naming
/// algorithms it does not know (`none`), which would hide a substitution
/// attempt behind a generic decoding error.
fn check_declared_algorithm(token: &str) -> Result<(), JwtError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(JwtError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|e| JwtError::MalformedToken(format!("header is not base64url: {}", e)))?;
    let header: serde_json::Value = serde_json::from_slice(&header_bytes)
        .map_err(|e| JwtError::MalformedToken(format!("header is not JSON: {}", e)))?;

    match header.get("alg").and_then(|alg| alg.as_str()) {
        Some(PINNED_ALGORITHM_NAME) => Ok(()),
        Some(_) => Err(JwtError::InvalidSignature),
        None => Err(JwtError::MalformedToken("header has no alg".to_string())),
    }
}

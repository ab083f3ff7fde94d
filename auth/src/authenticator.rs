use chrono::Duration;

use crate::bearer::extract_bearer;
use crate::bearer::AuthFormatError;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the signing secret, issuer and token lifetime explicitly; nothing is
/// read from process globals. Stateless per call, share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    issuer: String,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No credential supplied: {0}")]
    MissingCredential(#[from] AuthFormatError),

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl AuthenticationError {
    /// Whether the caller presented bad credentials, as opposed to the
    /// server failing to hash or sign.
    pub fn is_credential_error(&self) -> bool {
        match self {
            AuthenticationError::InvalidCredentials
            | AuthenticationError::MissingCredential(_) => true,
            AuthenticationError::PasswordError(_) => false,
            AuthenticationError::JwtError(e) => e.is_credential_error(),
        }
    }
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `issuer` - Value written to the `iss` claim
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `MissingSecret` - `jwt_secret` is empty
    pub fn new(
        jwt_secret: &[u8],
        issuer: impl Into<String>,
        token_ttl: Duration,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret)?,
            issuer: issuer.into(),
            token_ttl,
        })
    }

    /// Replace the password hasher.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identifier written to the token
    /// * `username` - Username written to the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        username: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;

        let access_token = self.generate_token(user_id, username)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Takes as long as a wrong password and fails the same way.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_dummy(password).into()
    }

    /// Generate JWT token without password verification.
    ///
    /// Used right after registration, when the password was just set.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(user_id, username, &self.issuer, self.token_ttl)
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Authenticate a request from its `Authorization` header value.
    ///
    /// # Arguments
    /// * `authorization` - Header value, `None` when absent
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `MissingCredential` - Header absent or not `Bearer <token>`
    /// * `JwtError` - Token rejected
    pub fn authenticate_request(
        &self,
        authorization: Option<&str>,
    ) -> Result<Claims, AuthenticationError> {
        let token = extract_bearer(authorization)?;
        Ok(self.validate_token(token)?)
    }
}

//! Authentication primitives
//!
//! Framework-agnostic building blocks for authenticating API users:
//! - Password hashing (Argon2id, self-describing PHC strings)
//! - Access token issuance and verification (JWT, pinned HS256)
//! - Bearer credential extraction from `Authorization` header values
//! - Authentication coordination
//! - Access policies for gated operations
//!
//! Nothing here performs I/O or keeps mutable state, so every operation can
//! run concurrently and be abandoned mid-call.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("other_password", &hash).is_err());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = handler.issue(42, "alice", "social-api", Duration::hours(24)).unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", "social-api", Duration::hours(24)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, 42, "alice").unwrap();
//!
//! // Protected request: extract and validate bearer token
//! let header = format!("Bearer {}", result.access_token);
//! let claims = auth.authenticate_request(Some(header.as_str())).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;
pub mod policy;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer;
pub use bearer::AuthFormatError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use policy::AccessPolicy;
pub use policy::AnyAuthenticated;

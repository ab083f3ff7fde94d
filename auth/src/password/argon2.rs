use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id cost parameters used when hashing new passwords.
///
/// Stored hashes embed the parameters they were produced with, so raising
/// the cost only affects hashes created afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl HashCost {
    /// Fixed strong setting (OWASP recommendation for Argon2id).
    pub const STRONG: HashCost = HashCost {
        memory_kib: 19 * 1024,
        iterations: 2,
        parallelism: 1,
    };

    fn params(&self) -> Result<Params, PasswordError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordError::HashingFailed(format!("Invalid hash cost: {}", e)))
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self::STRONG
    }
}

// Well-formed PHC components that no password can match.
const DUMMY_SALT: &str = "c29tZXNhbHRzb21lc2FsdA";
const DUMMY_DIGEST: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: HashCost,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher configured with [`HashCost::STRONG`]
    pub fn new() -> Self {
        Self::with_cost(HashCost::STRONG)
    }

    /// Create a password hasher that hashes new passwords at `cost`.
    ///
    /// Hashes produced at any other cost keep verifying.
    pub fn with_cost(cost: HashCost) -> Self {
        let dummy_hash = format!(
            "$argon2id$v=19$m={},t={},p={}${}${}",
            cost.memory_kib, cost.iterations, cost.parallelism, DUMMY_SALT, DUMMY_DIGEST
        );
        Self { cost, dummy_hash }
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation. Callers are expected to
    /// reject empty passwords before getting here.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.cost.params()?);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest is re-derived with the algorithm and parameters embedded
    /// in `hash` and compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match, or the stored hash is unusable
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::Mismatch)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| PasswordError::Mismatch)
    }

    /// Spend one verification at the current cost and report a mismatch.
    ///
    /// Used when there is no stored hash to check against, so that the
    /// caller takes as long as it would for a wrong password.
    pub fn verify_dummy(&self, password: &str) -> PasswordError {
        let _ = self.verify(password, &self.dummy_hash);
        PasswordError::Mismatch
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

use chrono::Duration;

use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::VerifiedClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Built once at startup from configuration and shared read-only between
/// requests; every method is a pure function of its inputs and the fixed key.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Token lifetime used when none is configured.
    pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

    /// Create a new authenticator with the default token lifetime.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher with the configured cost
    /// * `jwt_handler` - Token codec holding the signing key
    pub fn new(password_hasher: PasswordHasher, jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher,
            jwt_handler,
            token_ttl: Duration::minutes(Self::DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    /// Override the default token lifetime.
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue an access token for `subject` with the default lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.jwt_handler.issue(subject, self.token_ttl)
    }

    /// Issue an access token with an explicit lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token_with_ttl(
        &self,
        subject: &str,
        ttl: Duration,
    ) -> Result<IssuedToken, JwtError> {
        self.jwt_handler.issue(subject, ttl)
    }

    /// Validate a token and return its verified claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, tampered, expired or has no subject
    pub fn validate_token(&self, token: &str) -> Result<VerifiedClaims, JwtError> {
        self.jwt_handler.verify(token)
    }
}

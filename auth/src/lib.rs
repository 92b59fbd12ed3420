//! Authentication utilities library
//!
//! Provides the stateless authentication primitives used by the todo service:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT access token issuance and verification (HMAC, pinned algorithm)
//! - Authentication coordination
//!
//! Identity lookup is deliberately absent; the service owns its persistence
//! ports and feeds stored hashes and usernames into these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let issued = handler.issue("alice", Duration::minutes(30)).unwrap();
//! let claims = handler.verify(&issued.access_token).unwrap();
//! assert_eq!(claims.subject, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, JwtHandler, PasswordHasher};
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::new(),
//!     JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap(),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! auth.verify_credentials("password123", &hash).unwrap();
//! let issued = auth.issue_token("alice").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.access_token).unwrap();
//! assert_eq!(claims.subject, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::parse_algorithm;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::VerifiedClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;

use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::claims::IssuedToken;
use super::claims::VerifiedClaims;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying access tokens.
///
/// Holds the process-wide signing key. Only symmetric HMAC algorithms are
/// accepted, and verification pins the configured algorithm so a token
/// cannot pick its own.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Minimum accepted secret length in bytes.
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new JWT handler using HS256.
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Self::with_algorithm(secret, Algorithm::HS256)
    }

    /// Create a new JWT handler with an explicit HMAC algorithm.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `algorithm` - One of HS256, HS384, HS512
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    /// * `UnsupportedAlgorithm` - Algorithm is not a symmetric HMAC algorithm
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(JwtError::WeakSecret {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        })
    }

    /// Encode arbitrary claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration out of range or token encoding failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, ttl)?;

        Ok(IssuedToken {
            access_token: self.encode(&claims)?,
        })
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the payload
    /// * `TokenExpired` - Expiration instant is not in the future
    /// * `MissingSubject` - Token carries no subject
    /// * `Malformed` - Token cannot be decoded or uses another algorithm
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::Malformed(e.to_string()),
            },
        )?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        let subject = claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(JwtError::MissingSubject)?;

        Ok(VerifiedClaims {
            subject,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

/// Parse an algorithm identifier such as `"HS256"`.
///
/// # Errors
/// * `UnsupportedAlgorithm` - Unknown identifier or not an HMAC algorithm
pub fn parse_algorithm(name: &str) -> Result<Algorithm, JwtError> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| JwtError::UnsupportedAlgorithm(name.to_string()))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
    }
}

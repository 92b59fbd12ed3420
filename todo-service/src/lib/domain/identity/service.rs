use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;
use chrono::Utc;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::CreateIdentityCommand;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::identity::ports::IdentityServicePort;

/// Domain service implementation for identity operations.
///
/// Concrete implementation of IdentityServicePort with dependency injection.
pub struct IdentityService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> IdentityService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `authenticator` - Password hasher and token codec, fixed at startup
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn find_by_username(&self, username: &Username) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| IdentityError::NotFoundByUsername(username.to_string()))
    }

    async fn verify_password(
        &self,
        password: &str,
        identity: &Identity,
    ) -> Result<(), IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_owned();
        let stored_hash = identity.password_hash.clone();

        tokio::task::spawn_blocking(move || {
            authenticator.verify_credentials(&password, &stored_hash)
        })
        .await
        .map_err(|e| IdentityError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => IdentityError::InvalidCredentials,
            AuthenticationError::PasswordError(err) => IdentityError::Password(err),
            AuthenticationError::JwtError(err) => IdentityError::InvalidToken(err),
        })
    }
}

/// Hash a password on the blocking thread pool.
///
/// # Errors
/// * `Password` - Hashing failed
/// * `Unknown` - The blocking task panicked or was cancelled
pub async fn hash_password_blocking(
    authenticator: &Arc<Authenticator>,
    password: &str,
) -> Result<String, IdentityError> {
    let authenticator = Arc::clone(authenticator);
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
        .await
        .map_err(|e| IdentityError::Unknown(format!("Password hashing task failed: {}", e)))?
        .map_err(IdentityError::from)
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: CreateIdentityCommand) -> Result<Identity, IdentityError> {
        if self
            .repository
            .exists_by_username_or_email(&command.username, &command.email)
            .await?
        {
            return Err(IdentityError::AlreadyExists);
        }

        let password_hash =
            hash_password_blocking(&self.authenticator, command.password.expose()).await?;

        let identity = Identity {
            id: IdentityId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            is_active: true,
            created_at: Utc::now(),
        };

        let created = self.repository.create(identity).await?;
        tracing::info!(
            identity_id = %created.id,
            username = %created.username,
            "Identity registered"
        );

        Ok(created)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, IdentityError> {
        let Ok(username) = Username::new(username.to_string()) else {
            return Err(IdentityError::InvalidCredentials);
        };

        let identity = match self.find_by_username(&username).await {
            Ok(identity) => identity,
            Err(IdentityError::NotFoundByUsername(name)) => {
                tracing::debug!(username = %name, "Login for unknown username");
                return Err(IdentityError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        self.verify_password(password, &identity).await?;

        Ok(identity)
    }

    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, IdentityError> {
        let identity = self.authenticate(username, password).await?;

        self.authenticator
            .issue_token(identity.username.as_str())
            .map_err(|e| IdentityError::TokenIssuance(e.to_string()))
    }

    async fn resolve(&self, token: &str) -> Result<Identity, IdentityError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(reason = %e, "Token validation failed");
            IdentityError::InvalidToken(e)
        })?;

        // A subject that is not a valid username can never be stored.
        let username = Username::new(claims.subject.clone())
            .map_err(|_| IdentityError::NotFoundByUsername(claims.subject.clone()))?;

        self.find_by_username(&username).await.map_err(|e| {
            if let IdentityError::NotFoundByUsername(name) = &e {
                tracing::warn!(subject = %name, "Token subject is not a known identity");
            }
            e
        })
    }

    async fn resolve_active(&self, token: &str) -> Result<Identity, IdentityError> {
        self.resolve(token).await?.ensure_active()
    }

    async fn set_active(
        &self,
        username: &Username,
        active: bool,
    ) -> Result<Identity, IdentityError> {
        let identity = self.find_by_username(username).await?;
        let updated = self.repository.update_active(&identity.id, active).await?;

        tracing::info!(
            identity_id = %updated.id,
            username = %updated.username,
            is_active = updated.is_active,
            "Identity activation changed"
        );

        Ok(updated)
    }
}

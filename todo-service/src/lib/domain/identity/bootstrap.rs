//! Startup seeding of the first identity.
//!
//! Runs once, to completion, before the listener accepts connections. There is
//! no cross-process lock: two instances starting against the same empty store
//! both see a count of zero, and the loser's insert fails on the unique
//! username constraint.

use std::sync::Arc;

use auth::Authenticator;
use chrono::Utc;

use crate::config::BootstrapConfig;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::identity::service::hash_password_blocking;

/// What a seeding run did.
#[derive(Debug, Clone)]
pub enum SeedOutcome {
    Created(Identity),
    AlreadySeeded,
}

/// Create the configured identity if the store holds none.
///
/// The configured password is hashed but not checked against the
/// registration policy.
///
/// # Errors
/// * `InvalidUsername` / `InvalidEmail` - Configured values are malformed
/// * `Password` - Hashing failed
/// * `DatabaseError` - Storage unavailable
pub async fn seed_initial_identity<IR>(
    repository: &IR,
    authenticator: &Arc<Authenticator>,
    bootstrap: &BootstrapConfig,
) -> Result<SeedOutcome, IdentityError>
where
    IR: IdentityRepository + ?Sized,
{
    if repository.count().await? > 0 {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let username = Username::new(bootstrap.username.clone())?;
    let email = EmailAddress::new(bootstrap.email.clone())?;

    let identity = Identity {
        id: IdentityId::new(),
        username,
        email,
        password_hash: hash_password_blocking(authenticator, &bootstrap.password).await?,
        is_active: true,
        created_at: Utc::now(),
    };

    repository.create(identity).await.map(SeedOutcome::Created)
}

/// Seed the store and log the outcome. Never fails startup.
pub async fn ensure_initial_identity<IR>(
    repository: &IR,
    authenticator: &Arc<Authenticator>,
    bootstrap: &BootstrapConfig,
) where
    IR: IdentityRepository + ?Sized,
{
    match seed_initial_identity(repository, authenticator, bootstrap).await {
        Ok(SeedOutcome::Created(identity)) => tracing::info!(
            identity_id = %identity.id,
            username = %identity.username,
            "Initial identity created"
        ),
        Ok(SeedOutcome::AlreadySeeded) => {
            tracing::info!("Identity store already populated, skipping seeding")
        }
        Err(e) => tracing::error!(error = %e, "Failed to seed initial identity"),
    }
}

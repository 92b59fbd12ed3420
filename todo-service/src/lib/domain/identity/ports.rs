use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::CreateIdentityCommand;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Username;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created identity, active
    ///
    /// # Errors
    /// * `AlreadyExists` - Username or email is already taken
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Lost a race on insert
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateIdentityCommand) -> Result<Identity, IdentityError>;

    /// Check a username and plaintext password against the store.
    ///
    /// Unknown usernames, malformed usernames and wrong passwords all fail
    /// with the same `InvalidCredentials`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Lookup or password check failed
    /// * `Password` - Stored hash could not be parsed
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<Identity, IdentityError>;

    /// Authenticate and issue an access token for the identity.
    ///
    /// # Errors
    /// * `InvalidCredentials` - See [`IdentityServicePort::authenticate`]
    /// * `TokenIssuance` - Signing failed
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, IdentityError>;

    /// Turn a bearer token into the identity it names.
    ///
    /// Does not look at the active flag; see [`IdentityServicePort::resolve_active`].
    ///
    /// # Errors
    /// * `InvalidToken` - Token failed verification
    /// * `NotFoundByUsername` - Token subject is not stored
    /// * `DatabaseError` - Database operation failed
    async fn resolve(&self, token: &str) -> Result<Identity, IdentityError>;

    /// Resolve a bearer token and require the identity to be active.
    ///
    /// # Errors
    /// * Everything [`IdentityServicePort::resolve`] returns
    /// * `Inactive` - Identity has been deactivated
    async fn resolve_active(&self, token: &str) -> Result<Identity, IdentityError>;

    /// Activate or deactivate an identity.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No identity with this username
    /// * `DatabaseError` - Database operation failed
    async fn set_active(&self, username: &Username, active: bool)
        -> Result<Identity, IdentityError>;
}

/// Persistence operations for the identity aggregate.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve identity by username.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Identity>, IdentityError>;

    /// Whether any identity holds this username or this email.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, IdentityError>;

    /// Number of stored identities.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self) -> Result<u64, IdentityError>;

    /// Set the active flag.
    ///
    /// # Returns
    /// Updated identity
    ///
    /// # Errors
    /// * `NotFound` - No identity with this ID
    /// * `DatabaseError` - Database operation failed
    async fn update_active(&self, id: &IdentityId, active: bool)
        -> Result<Identity, IdentityError>;
}

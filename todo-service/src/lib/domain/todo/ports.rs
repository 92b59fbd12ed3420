use async_trait::async_trait;

use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;

/// Port for todo operations. Every call is scoped to `owner`; another
/// owner's todo behaves exactly like a missing one.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Create a todo for `owner`.
    ///
    /// # Errors
    /// * `TitleAlreadyExists` - Owner already has a todo with this title
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(
        &self,
        owner: &IdentityId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// All todos of `owner`, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;

    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<Todo, TodoError>;

    /// Partially update a todo.
    ///
    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `TitleAlreadyExists` - Another todo of this owner has the new title
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        owner: &IdentityId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for todos.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// # Errors
    /// * `TitleAlreadyExists` - Unique (owner, title) violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;

    /// # Returns
    /// Optional todo (None if absent or owned by someone else)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id_for_owner(
        &self,
        owner: &IdentityId,
        id: &TodoId,
    ) -> Result<Option<Todo>, TodoError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_with_title(
        &self,
        owner: &IdentityId,
        title: &TodoTitle,
    ) -> Result<bool, TodoError>;

    /// Store new field values for an existing todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `TitleAlreadyExists` - Unique (owner, title) violated
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// # Returns
    /// Whether a row was removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_for_owner(&self, owner: &IdentityId, id: &TodoId) -> Result<bool, TodoError>;
}

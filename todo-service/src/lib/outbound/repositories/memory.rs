//! In-process adapters for the repository ports.
//!
//! Enforce the same uniqueness rules as the Postgres schema. Used by the
//! integration tests and by `database.backend = "memory"`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;

#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<HashMap<IdentityId, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;

        if identities
            .values()
            .any(|stored| stored.username == identity.username)
        {
            return Err(IdentityError::UsernameAlreadyExists(
                identity.username.to_string(),
            ));
        }
        if identities.values().any(|stored| stored.email == identity.email) {
            return Err(IdentityError::EmailAlreadyExists(
                identity.email.as_str().to_string(),
            ));
        }

        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .find(|stored| &stored.username == username)
            .cloned())
    }

    async fn exists_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, IdentityError> {
        let identities = self.identities.read().await;
        Ok(identities
            .values()
            .any(|stored| &stored.username == username || &stored.email == email))
    }

    async fn count(&self) -> Result<u64, IdentityError> {
        Ok(self.identities.read().await.len() as u64)
    }

    async fn update_active(
        &self,
        id: &IdentityId,
        active: bool,
    ) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;
        let identity = identities
            .get_mut(id)
            .ok_or_else(|| IdentityError::NotFound(id.to_string()))?;

        identity.is_active = active;
        Ok(identity.clone())
    }
}

/// Todos kept in insertion order, which is also creation order.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn title_taken(todos: &[Todo], todo: &Todo) -> bool {
    todos.iter().any(|stored| {
        stored.id != todo.id && stored.owner_id == todo.owner_id && stored.title == todo.title
    })
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;

        if title_taken(&todos, &todo) {
            return Err(TodoError::TitleAlreadyExists(todo.title.to_string()));
        }

        todos.push(todo.clone());
        Ok(todo)
    }

    async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .filter(|todo| &todo.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn find_by_id_for_owner(
        &self,
        owner: &IdentityId,
        id: &TodoId,
    ) -> Result<Option<Todo>, TodoError> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .find(|todo| &todo.id == id && &todo.owner_id == owner)
            .cloned())
    }

    async fn exists_with_title(
        &self,
        owner: &IdentityId,
        title: &TodoTitle,
    ) -> Result<bool, TodoError> {
        let todos = self.todos.read().await;
        Ok(todos
            .iter()
            .any(|todo| &todo.owner_id == owner && &todo.title == title))
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;

        if title_taken(&todos, &todo) {
            return Err(TodoError::TitleAlreadyExists(todo.title.to_string()));
        }

        let stored = todos
            .iter_mut()
            .find(|stored| stored.id == todo.id && stored.owner_id == todo.owner_id)
            .ok_or_else(|| TodoError::NotFound(todo.id.to_string()))?;

        *stored = todo.clone();
        Ok(todo)
    }

    async fn delete_for_owner(&self, owner: &IdentityId, id: &TodoId) -> Result<bool, TodoError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| !(&todo.id == id && &todo.owner_id == owner));
        Ok(todos.len() < before)
    }
}

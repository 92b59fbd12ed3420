use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;

/// Domain service implementation for todo operations.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(
        &self,
        owner: &IdentityId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        if self
            .repository
            .exists_with_title(owner, &command.title)
            .await?
        {
            return Err(TodoError::TitleAlreadyExists(command.title.to_string()));
        }

        let now = Utc::now();
        let todo = Todo {
            id: TodoId::new(),
            owner_id: *owner,
            title: command.title,
            description: command.description,
            done: command.done,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(todo).await
    }

    async fn list_todos(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError> {
        self.repository.find_by_owner(owner).await
    }

    async fn get_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<Todo, TodoError> {
        self.repository
            .find_by_id_for_owner(owner, id)
            .await?
            .ok_or_else(|| TodoError::NotFound(id.to_string()))
    }

    async fn update_todo(
        &self,
        owner: &IdentityId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.get_todo(owner, id).await?;

        if let Some(title) = &command.title {
            if *title != todo.title && self.repository.exists_with_title(owner, title).await? {
                return Err(TodoError::TitleAlreadyExists(title.to_string()));
            }
        }

        todo.apply(command);
        self.repository.update(todo).await
    }

    async fn delete_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<(), TodoError> {
        if self.repository.delete_for_owner(owner, id).await? {
            Ok(())
        } else {
            Err(TodoError::NotFound(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::todo::models::TodoTitle;

    mock! {
        pub TestTodoRepository {}

        #[async_trait]
        impl TodoRepository for TestTodoRepository {
            async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;
            async fn find_by_id_for_owner(&self, owner: &IdentityId, id: &TodoId) -> Result<Option<Todo>, TodoError>;
            async fn exists_with_title(&self, owner: &IdentityId, title: &TodoTitle) -> Result<bool, TodoError>;
            async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn delete_for_owner(&self, owner: &IdentityId, id: &TodoId) -> Result<bool, TodoError>;
        }
    }

    fn title(s: &str) -> TodoTitle {
        TodoTitle::new(s.to_string()).unwrap()
    }

    fn todo(owner: IdentityId, t: &str) -> Todo {
        let now = Utc::now();
        Todo {
            id: TodoId::new(),
            owner_id: owner,
            title: title(t),
            description: None,
            done: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_todo_success() {
        let owner = IdentityId::new();
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_exists_with_title()
            .times(1)
            .returning(|_, _| Ok(false));
        repository
            .expect_create()
            .withf(move |todo| todo.owner_id == owner && todo.title.as_str() == "buy milk")
            .times(1)
            .returning(|todo| Ok(todo));

        let service = TodoService::new(Arc::new(repository));

        let created = service
            .create_todo(
                &owner,
                CreateTodoCommand {
                    title: title("buy milk"),
                    description: Some("2 litres".to_string()),
                    done: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.description.as_deref(), Some("2 litres"));
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_create_duplicate_title() {
        let owner = IdentityId::new();
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_exists_with_title()
            .returning(|_, _| Ok(true));
        repository.expect_create().times(0);

        let service = TodoService::new(Arc::new(repository));

        let result = service
            .create_todo(
                &owner,
                CreateTodoCommand {
                    title: title("buy milk"),
                    description: None,
                    done: false,
                },
            )
            .await;
        assert!(matches!(result, Err(TodoError::TitleAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_todo_not_found() {
        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_id_for_owner()
            .returning(|_, _| Ok(None));

        let service = TodoService::new(Arc::new(repository));

        let result = service.get_todo(&IdentityId::new(), &TodoId::new()).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_own_title() {
        let owner = IdentityId::new();
        let existing = todo(owner, "buy milk");
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id_for_owner()
            .returning(move |_, _| Ok(Some(existing.clone())));
        repository.expect_exists_with_title().times(0);
        repository.expect_update().times(1).returning(|todo| Ok(todo));

        let service = TodoService::new(Arc::new(repository));

        let updated = service
            .update_todo(
                &owner,
                &TodoId::new(),
                UpdateTodoCommand {
                    title: Some(title("buy milk")),
                    done: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.done);
    }

    #[tokio::test]
    async fn test_update_rename_onto_existing_title() {
        let owner = IdentityId::new();
        let existing = todo(owner, "buy milk");
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id_for_owner()
            .returning(move |_, _| Ok(Some(existing.clone())));
        repository
            .expect_exists_with_title()
            .withf(|_, title| title.as_str() == "walk dog")
            .returning(|_, _| Ok(true));
        repository.expect_update().times(0);

        let service = TodoService::new(Arc::new(repository));

        let result = service
            .update_todo(
                &owner,
                &TodoId::new(),
                UpdateTodoCommand {
                    title: Some(title("walk dog")),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(TodoError::TitleAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_todo() {
        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_delete_for_owner()
            .returning(|_, _| Ok(false));

        let service = TodoService::new(Arc::new(repository));

        let result = service.delete_todo(&IdentityId::new(), &TodoId::new()).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }
}

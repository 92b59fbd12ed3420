use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: &PgRow) -> Result<Todo, TodoError> {
        Ok(Todo {
            id: TodoId(row.try_get("id").map_err(database_error)?),
            owner_id: IdentityId(row.try_get("owner_id").map_err(database_error)?),
            title: TodoTitle::new(row.try_get("title").map_err(database_error)?)
                .map_err(|e| TodoError::DatabaseError(format!("Stored title is invalid: {}", e)))?,
            description: row.try_get("description").map_err(database_error)?,
            done: row.try_get("done").map_err(database_error)?,
            created_at: row.try_get("created_at").map_err(database_error)?,
            updated_at: row.try_get("updated_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> TodoError {
    TodoError::DatabaseError(e.to_string())
}

fn write_error(e: sqlx::Error, title: &TodoTitle) -> TodoError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("todos_owner_id_title_key")
        {
            return TodoError::TitleAlreadyExists(title.to_string());
        }
    }
    database_error(e)
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, owner_id, title, description, done, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.owner_id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_deref())
        .bind(todo.done)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &todo.title))?;

        Ok(todo)
    }

    async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, description, done, created_at, updated_at
            FROM todos
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn find_by_id_for_owner(
        &self,
        owner: &IdentityId,
        id: &TodoId,
    ) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, description, done, created_at, updated_at
            FROM todos
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn exists_with_title(
        &self,
        owner: &IdentityId,
        title: &TodoTitle,
    ) -> Result<bool, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM todos WHERE owner_id = $1 AND title = $2
            ) AS taken
            "#,
        )
        .bind(owner.0)
        .bind(title.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        row.try_get("taken").map_err(database_error)
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $3, description = $4, done = $5, updated_at = $6
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.owner_id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_deref())
        .bind(todo.done)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &todo.title))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id.to_string()));
        }

        Ok(todo)
    }

    async fn delete_for_owner(&self, owner: &IdentityId, id: &TodoId) -> Result<bool, TodoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::errors::TodoIdError;
use super::errors::TodoTitleError;
use crate::domain::identity::models::IdentityId;

/// Todo entity, always owned by exactly one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub owner_id: IdentityId,
    pub title: TodoTitle,
    pub description: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Apply a partial update. Fields left as `None` keep their value.
    pub fn apply(&mut self, command: UpdateTodoCommand) {
        if let Some(title) = command.title {
            self.title = title;
        }
        if let Some(description) = command.description {
            self.description = Some(description);
        }
        if let Some(done) = command.done {
            self.done = done;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo title, trimmed, 1-200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MAX_LENGTH: usize = 200;

    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `TooLong` - More than 200 characters after trimming
    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        let trimmed = title.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(TodoTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TodoTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: Option<String>,
    pub done: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed() {
        let title = TodoTitle::new("  buy milk \n".to_string()).unwrap();
        assert_eq!(title.as_str(), "buy milk");
    }

    #[test]
    fn test_title_bounds() {
        assert_eq!(
            TodoTitle::new("   ".to_string()),
            Err(TodoTitleError::Empty)
        );
        assert!(TodoTitle::new("x".repeat(200)).is_ok());
        assert_eq!(
            TodoTitle::new("x".repeat(201)),
            Err(TodoTitleError::TooLong {
                max: 200,
                actual: 201
            })
        );
    }

    #[test]
    fn test_todo_id_parsing() {
        let id = TodoId::new();
        assert_eq!(TodoId::from_string(&id.to_string()), Ok(id));
        assert!(TodoId::from_string("42").is_err());
    }

    #[test]
    fn test_apply_partial_update() {
        let created_at = Utc::now();
        let mut todo = Todo {
            id: TodoId::new(),
            owner_id: IdentityId::new(),
            title: TodoTitle::new("write report".to_string()).unwrap(),
            description: Some("quarterly".to_string()),
            done: false,
            created_at,
            updated_at: created_at,
        };

        todo.apply(UpdateTodoCommand {
            done: Some(true),
            ..Default::default()
        });

        assert_eq!(todo.title.as_str(), "write report");
        assert_eq!(todo.description.as_deref(), Some("quarterly"));
        assert!(todo.done);
        assert!(todo.updated_at >= created_at);
    }
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TodoResponseData;
use crate::inbound::http::middleware::CurrentIdentity;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(CurrentIdentity(identity)): Extension<CurrentIdentity>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<ApiSuccess<TodoResponseData>, ApiError> {
    let command = CreateTodoCommand {
        title: TodoTitle::new(body.title)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?,
        description: body.description,
        done: body.done,
    };

    state
        .todo_service
        .create_todo(&identity.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    done: bool,
}

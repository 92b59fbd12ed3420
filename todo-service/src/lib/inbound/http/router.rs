use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_current_identity;
use super::handlers::health;
use super::handlers::login;
use super::handlers::register;
use super::handlers::todos::create_todo;
use super::handlers::todos::delete_todo;
use super::handlers::todos::get_todo;
use super::handlers::todos::list_todos;
use super::handlers::todos::update_todo;
use super::middleware::require_active;
use super::middleware::resolve_identity;
use crate::domain::identity::ports::IdentityServicePort;
use crate::domain::todo::ports::TodoServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
) -> Router {
    let state = AppState {
        identity_service,
        todo_service,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/users", post(register));

    // route_layer wraps outward: resolve_identity runs before require_active.
    let protected_routes = Router::new()
        .route("/users/me", get(get_current_identity))
        .route("/todos", post(create_todo).get(list_todos))
        .route(
            "/todos/:todo_id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route_layer(middleware::from_fn(require_active))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

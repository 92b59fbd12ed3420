use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity resolved from the bearer token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

/// Resolve the bearer token into a stored identity.
///
/// Does not check the active flag; stack [`require_active`] inside this
/// layer for routes that need it.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?.to_owned();

    let identity = state
        .identity_service
        .resolve(&token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(CurrentIdentity(identity));

    Ok(next.run(req).await)
}

/// Reject identities that have been deactivated.
pub async fn require_active(req: Request, next: Next) -> Result<Response, Response> {
    let Some(CurrentIdentity(identity)) = req.extensions().get::<CurrentIdentity>() else {
        tracing::error!("Active-user gate reached without a resolved identity");
        return Err(
            ApiError::Unauthorized("Not authenticated".to_string()).into_response(),
        );
    };

    if let Err(e) = identity.clone().ensure_active() {
        if let IdentityError::Inactive(username) = &e {
            tracing::info!(username = %username, "Request from inactive identity rejected");
        }
        return Err(ApiError::from(e).into_response());
    }

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let unauthenticated =
        || ApiError::Unauthorized("Not authenticated".to_string()).into_response();

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(unauthenticated)?;

    let auth_str = auth_header.to_str().map_err(|_| unauthenticated())?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err(unauthenticated()),
    }
}

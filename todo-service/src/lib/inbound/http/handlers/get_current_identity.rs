use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::IdentityResponseData;
use crate::inbound::http::middleware::CurrentIdentity;

pub async fn get_current_identity(
    Extension(CurrentIdentity(identity)): Extension<CurrentIdentity>,
) -> ApiSuccess<IdentityResponseData> {
    ApiSuccess::new(StatusCode::OK, (&identity).into())
}

//! Get user detail endpoint handler.
//!
//! GET /users/:name - Single-user lookup with sensitive fields masked.

use axum::{extract::Path, Extension, Json};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::middleware::CallerContext;
use crate::models::UserDetail;
use crate::services::DirectoryService;

/// Returns the detail view of one user record. The password field always
/// carries the fixed mask, never the stored credential.
#[utoipa::path(
    get,
    path = "/users/{name}",
    params(
        ("name" = String, Path, description = "User identifier"),
    ),
    responses(
        (status = 200, description = "User detail", body = UserDetail),
        (status = 400, description = "Missing identifier"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
pub async fn get_user_handler(
    Extension(caller): Extension<CallerContext>,
    Extension(service): Extension<Arc<DirectoryService>>,
    Path(name): Path<String>,
) -> Result<Json<UserDetail>, GatewayError> {
    tracing::info!(caller = %caller.user, user = %name, "Fetching user detail");

    let detail = service.user_detail(&name).await?;

    Ok(Json(detail))
}

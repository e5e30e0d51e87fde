//! Rename user endpoint handler.
//!
//! POST /users/:name/rename - Identifier change for a user record.

use axum::{extract::Path, Extension, Json};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::middleware::CallerContext;
use crate::models::{RenameUserRequest, RenameUserResponse};
use crate::services::DirectoryService;

/// Renames a user record. The new identifier must look like an email
/// address; the platform performs the rename (forced) and cascades
/// reference updates.
#[utoipa::path(
    post,
    path = "/users/{name}/rename",
    params(
        ("name" = String, Path, description = "Current user identifier"),
    ),
    request_body = RenameUserRequest,
    responses(
        (status = 200, description = "Rename confirmation", body = RenameUserResponse),
        (status = 400, description = "Missing or malformed identifier"),
        (status = 401, description = "Not authenticated"),
        (status = 502, description = "Platform failure, logged and re-raised"),
    ),
    tag = "Users"
)]
pub async fn rename_user_handler(
    Extension(caller): Extension<CallerContext>,
    Extension(service): Extension<Arc<DirectoryService>>,
    Path(name): Path<String>,
    Json(request): Json<RenameUserRequest>,
) -> Result<Json<RenameUserResponse>, GatewayError> {
    tracing::info!(
        caller = %caller.user,
        old = %name,
        new = %request.new_name,
        "Renaming user"
    );

    let message = service.rename_user(&name, &request).await?;

    Ok(Json(RenameUserResponse { message }))
}

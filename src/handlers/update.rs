//! Update user endpoint handler.
//!
//! PUT /users/:name - Permission-gated partial update of a user record.

use axum::{extract::Path, Extension, Json};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::middleware::CallerContext;
use crate::models::{UpdateUserRequest, UpdateUserResponse};
use crate::services::DirectoryService;

/// Updates a user's identity fields, role or password.
///
/// The caller's identity and role set come from the caller-context
/// middleware and are handed to the service explicitly; the service gates
/// the operation on a privileged-role allow-list before touching the
/// record.
#[utoipa::path(
    put,
    path = "/users/{name}",
    params(
        ("name" = String, Path, description = "User identifier"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Update outcome", body = UpdateUserResponse),
        (status = 400, description = "Missing identifier"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller lacks a privileged role"),
        (status = 404, description = "User not found"),
        (status = 502, description = "Platform failure, logged and re-raised"),
    ),
    tag = "Users"
)]
pub async fn update_user_handler(
    Extension(caller): Extension<CallerContext>,
    Extension(service): Extension<Arc<DirectoryService>>,
    Path(name): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, GatewayError> {
    tracing::info!(
        caller = %caller.user,
        user = %name,
        username = ?request.username,
        email = ?request.email,
        phone = ?request.phone,
        role = ?request.role,
        password_provided = request.password.is_some(),
        "Updating user details"
    );

    let response = service.update_user(&caller, &name, &request).await?;

    Ok(Json(response))
}

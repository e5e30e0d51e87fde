//! List users endpoint handler.
//!
//! GET /users - Paginated, filtered listing of user records, each
//! augmented with its assigned role names.

use axum::{extract::Query, Extension, Json};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::middleware::CallerContext;
use crate::models::{ListUsersQuery, UserSummary};
use crate::services::DirectoryService;

/// Lists user records with pagination and an optional filter expression.
///
/// `filters` is a serialized JSON predicate list passed through to the
/// platform; malformed input fails with 400.
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "List of users with roles", body = Vec<UserSummary>),
        (status = 400, description = "Malformed filter expression"),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "Users"
)]
pub async fn list_users_handler(
    Extension(caller): Extension<CallerContext>,
    Extension(service): Extension<Arc<DirectoryService>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserSummary>>, GatewayError> {
    tracing::info!(
        caller = %caller.user,
        page = query.page(),
        page_size = query.page_size(),
        offset = query.offset(),
        filters = ?query.filters,
        "Listing users"
    );

    let users = service.list_users(&query).await?;

    Ok(Json(users))
}

//! OpenAPI documentation for the gateway endpoints.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::error::ProblemDetails;
use crate::models::{
    RenameUserRequest, RenameUserResponse, UpdateUserRequest, UpdateUserResponse, UserDetail,
    UserSummary,
};

/// OpenAPI document covering all gateway endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::list::list_users_handler,
        crate::handlers::detail::get_user_handler,
        crate::handlers::update::update_user_handler,
        crate::handlers::rename::rename_user_handler,
        crate::handlers::purchase_orders::purchase_order_count_handler,
    ),
    components(schemas(
        UserSummary,
        UserDetail,
        UpdateUserRequest,
        UpdateUserResponse,
        RenameUserRequest,
        RenameUserResponse,
        ProblemDetails,
    )),
    tags(
        (name = "Users", description = "Account directory operations"),
        (name = "Purchase Orders", description = "Purchase-order reporting"),
    ),
    info(
        title = "Account Directory Gateway",
        description = "Thin gateway over the document platform's account and purchase-order records."
    )
)]
pub struct ApiDoc;

/// Router exposing the OpenAPI document at `/openapi.json`.
pub fn openapi_router() -> Router {
    Router::new().route("/openapi.json", get(serve_openapi))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
